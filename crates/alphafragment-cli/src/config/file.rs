use crate::error::{CliError, Result};
use alphafragment::core::domains::thresholds::PartialThresholds;
use alphafragment::engine::config::Profile;
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

#[derive(Deserialize, Debug, Default, Clone, Copy)]
#[serde(deny_unknown_fields)]
pub struct FileProfile {
    pub min: Option<usize>,
    pub ideal: Option<usize>,
    pub max: Option<usize>,
}

impl FileProfile {
    /// Fills every missing bound from `fallback`.
    pub fn or_defaults(self, fallback: Profile) -> Profile {
        Profile::new(
            self.min.unwrap_or(fallback.min),
            self.ideal.unwrap_or(fallback.ideal),
            self.max.unwrap_or(fallback.max),
        )
    }
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct FileFragmentConfig {
    pub length: Option<FileProfile>,
    pub overlap: Option<FileProfile>,
    #[serde(rename = "length-increment")]
    pub length_increment: Option<usize>,
    /// Seconds.
    #[serde(rename = "time-limit")]
    pub time_limit: Option<f64>,
}

#[derive(Deserialize, Debug, Default, Clone, Copy)]
#[serde(deny_unknown_fields)]
pub struct FileThresholds {
    #[serde(rename = "distance-cutoff")]
    pub distance_cutoff: Option<usize>,
    #[serde(rename = "close-threshold")]
    pub close_threshold: Option<f64>,
    #[serde(rename = "far-threshold")]
    pub far_threshold: Option<f64>,
}

impl From<FileThresholds> for PartialThresholds {
    fn from(p: FileThresholds) -> Self {
        Self {
            distance_cutoff: p.distance_cutoff,
            close_threshold: p.close_threshold,
            far_threshold: p.far_threshold,
        }
    }
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct FileDomainConfig {
    pub method: Option<String>,
    #[serde(rename = "use-pae")]
    pub use_pae: Option<bool>,
    #[serde(rename = "use-manual")]
    pub use_manual: Option<bool>,
    pub custom: Option<FileThresholds>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub fragment: Option<FileFragmentConfig>,
    pub domains: Option<FileDomainConfig>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }
}
