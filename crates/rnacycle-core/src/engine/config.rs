pub use crate::core::cycles::basis::BasisMode;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
}

#[derive(Debug, Clone, PartialEq)]
pub struct BasisConfig {
    pub mode: BasisMode,
    /// Re-check the finished basis (closed walks, size, rank) before returning it.
    pub verify: bool,
    /// Whether two-interaction cycles formed by parallel edges may appear in the basis.
    pub allow_two_cycles: bool,
    /// Longest candidate cycle (in interactions) considered by the minimizer; 0 is unbounded.
    pub max_candidate_depth: usize,
    /// Wall-clock limit for one structure.
    pub timeout: Option<Duration>,
}

impl Default for BasisConfig {
    fn default() -> Self {
        Self {
            mode: BasisMode::Minimum,
            verify: true,
            allow_two_cycles: true,
            max_candidate_depth: 0,
            timeout: None,
        }
    }
}

#[derive(Default)]
pub struct BasisConfigBuilder {
    mode: Option<BasisMode>,
    verify: Option<bool>,
    allow_two_cycles: Option<bool>,
    max_candidate_depth: Option<usize>,
    timeout: Option<Duration>,
}

impl BasisConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(mut self, mode: BasisMode) -> Self {
        self.mode = Some(mode);
        self
    }
    pub fn verify(mut self, verify: bool) -> Self {
        self.verify = Some(verify);
        self
    }
    pub fn allow_two_cycles(mut self, allow: bool) -> Self {
        self.allow_two_cycles = Some(allow);
        self
    }
    pub fn max_candidate_depth(mut self, depth: usize) -> Self {
        self.max_candidate_depth = Some(depth);
        self
    }
    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn build(self) -> Result<BasisConfig, ConfigError> {
        let defaults = BasisConfig::default();
        Ok(BasisConfig {
            mode: self.mode.ok_or(ConfigError::MissingParameter("mode"))?,
            verify: self.verify.unwrap_or(defaults.verify),
            allow_two_cycles: self.allow_two_cycles.unwrap_or(defaults.allow_two_cycles),
            max_candidate_depth: self
                .max_candidate_depth
                .unwrap_or(defaults.max_candidate_depth),
            timeout: self.timeout,
        })
    }
}
