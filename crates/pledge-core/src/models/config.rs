//! Configuration structures for the scraping pipeline.

use serde::{Deserialize, Serialize};

use crate::batch::BatchPolicy;

/// Main configuration for the pledge pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PledgeConfig {
    /// Page retrieval configuration.
    pub fetch: FetchConfig,

    /// Batch driver configuration.
    pub batch: BatchConfig,

    /// Output configuration.
    pub output: OutputConfig,
}

/// HTTP retrieval configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// User-Agent header sent with every request.
    pub user_agent: String,

    /// Accept-Language header sent with every request.
    pub accept_language: String,

    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: format!("pledge/{}", env!("CARGO_PKG_VERSION")),
            accept_language: "en-US,en;q=0.5".to_string(),
            timeout_secs: 30,
        }
    }
}

/// Batch driver configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Pages in flight at once. 1 processes strictly one after another.
    pub concurrency: usize,

    /// Keep going after a page fails instead of aborting the batch.
    pub continue_on_error: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            concurrency: 1,
            continue_on_error: false,
        }
    }
}

impl BatchConfig {
    /// Failure policy implied by `continue_on_error`.
    pub fn policy(&self) -> BatchPolicy {
        if self.continue_on_error {
            BatchPolicy::BestEffort
        } else {
            BatchPolicy::FailFast
        }
    }
}

/// Output configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format.
    pub format: OutputFormat,

    /// Pretty-print JSON output.
    pub pretty: bool,
}

/// Serialized form of extracted projects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// JSON array of projects.
    #[default]
    Json,
    /// One CSV row per project.
    Csv,
    /// Plain text summary.
    Text,
}

impl PledgeConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }
}
