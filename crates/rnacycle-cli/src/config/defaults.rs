use rnacycle::engine::config::BasisMode;

pub struct DefaultsConfig {
    pub mode: BasisMode,
    pub verify: bool,
    pub allow_two_cycles: bool,
    pub max_candidate_depth: usize,
    pub timeout_ms: Option<u64>,
    pub add_backbone: bool,
    pub default_weight: f64,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            mode: BasisMode::Minimum,
            verify: true,
            allow_two_cycles: true,
            max_candidate_depth: 0,
            timeout_ms: None,
            add_backbone: false,
            default_weight: 1.0,
        }
    }
}
