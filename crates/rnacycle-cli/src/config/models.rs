use rnacycle::engine::config::BasisConfig;
use std::path::PathBuf;

/// How interaction tables are turned into graphs.
#[derive(Debug, Clone, PartialEq)]
pub struct InputOptions {
    pub add_backbone: bool,
    pub default_weight: f64,
}

pub struct AppConfig {
    pub inputs: Vec<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub input: InputOptions,
    pub core_config: BasisConfig,
}
