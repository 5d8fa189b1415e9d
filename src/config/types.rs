//! Configuration type definitions.

use crate::constants::{DEFAULT_LABEL_COLUMN, encyclopedia};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Model and label source locations.
    pub model: ModelConfig,

    /// Reference table overrides.
    pub tables: TablesConfig,

    /// Encyclopedia lookup settings.
    pub encyclopedia: EncyclopediaConfig,

    /// Output settings.
    pub output: OutputConfig,
}

/// Location of the classifier and its label source.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Path to the ONNX model file.
    pub path: PathBuf,

    /// Path to the CSV label source.
    pub labels: PathBuf,

    /// Column of the label source holding species names.
    pub label_column: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("butterfly_expert_model.onnx"),
            labels: PathBuf::from("master_labels.csv"),
            label_column: DEFAULT_LABEL_COLUMN.to_string(),
        }
    }
}

/// Optional replacements for the bundled reference tables.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TablesConfig {
    /// JSON file mapping species name to conservation status label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conservation: Option<PathBuf>,

    /// JSON file mapping species name to `[latitude, longitude]`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub habitat: Option<PathBuf>,
}

/// Encyclopedia lookup settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EncyclopediaConfig {
    /// Whether to query the encyclopedia at all.
    pub enabled: bool,

    /// Wikipedia language edition (e.g. "en").
    pub language: String,

    /// Client identifier sent as the User-Agent.
    pub user_agent: String,

    /// Request timeout in seconds.
    pub timeout_secs: u64,

    /// Full API endpoint, overriding the one derived from `language`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,
}

impl Default for EncyclopediaConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            language: encyclopedia::DEFAULT_LANGUAGE.to_string(),
            user_agent: encyclopedia::USER_AGENT.to_string(),
            timeout_secs: encyclopedia::DEFAULT_TIMEOUT_SECS,
            api_url: None,
        }
    }
}

impl EncyclopediaConfig {
    /// API endpoint to query.
    pub fn endpoint(&self) -> String {
        self.api_url
            .clone()
            .unwrap_or_else(|| format!("https://{}.wikipedia.org/w/api.php", self.language))
    }
}

/// Output settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default report format.
    pub format: OutputFormat,
}

/// Supported report formats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable text report.
    #[default]
    Text,
    /// JSON envelope.
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "human" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown output format: {other}")),
        }
    }
}
