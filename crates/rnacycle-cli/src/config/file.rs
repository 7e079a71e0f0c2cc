use crate::error::{CliError, Result};
use rnacycle::engine::config::BasisMode;
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileBasisConfig {
    pub mode: Option<BasisMode>,
    pub verify: Option<bool>,
    pub allow_two_cycles: Option<bool>,
    pub max_candidate_depth: Option<usize>,
    pub timeout_ms: Option<u64>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileInputConfig {
    pub add_backbone: Option<bool>,
    pub default_weight: Option<f64>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub basis: Option<FileBasisConfig>,
    pub input: Option<FileInputConfig>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    fn from_toml_str(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}
