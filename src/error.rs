//! Error types for bioscan.

/// Result type alias for bioscan operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for bioscan.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration directory could not be determined.
    #[error("could not determine configuration directory for this platform")]
    ConfigDirNotFound,

    /// Failed to read configuration file.
    #[error("failed to read config file '{path}'")]
    ConfigRead {
        /// Path to the config file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse configuration file.
    #[error("failed to parse config file '{path}'")]
    ConfigParse {
        /// Path to the config file.
        path: std::path::PathBuf,
        /// Underlying parse error.
        #[source]
        source: toml::de::Error,
    },

    /// Failed to write configuration file.
    #[error("failed to write config file '{path}'")]
    ConfigWrite {
        /// Path to the config file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize configuration.
    #[error("failed to serialize config")]
    ConfigSerialize {
        /// Underlying serialization error.
        #[source]
        source: toml::ser::Error,
    },

    /// Configuration validation failed.
    #[error("configuration validation failed: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    /// Model file does not exist.
    #[error("model file does not exist: {path}")]
    ModelFileNotFound {
        /// Path to the missing model file.
        path: std::path::PathBuf,
    },

    /// Labels file does not exist.
    #[error("labels file does not exist: {path}")]
    LabelsFileNotFound {
        /// Path to the missing labels file.
        path: std::path::PathBuf,
    },

    /// Failed to load the ONNX model.
    #[error("failed to load model '{path}': {reason}")]
    ModelLoad {
        /// Path to the model file.
        path: std::path::PathBuf,
        /// Description of the load failure.
        reason: String,
    },

    /// Failed to read the label source.
    #[error("failed to read labels file '{path}'")]
    LabelsRead {
        /// Path to the labels file.
        path: std::path::PathBuf,
        /// Underlying CSV error.
        #[source]
        source: csv::Error,
    },

    /// Label source is structurally invalid.
    #[error("invalid labels file '{path}': {message}")]
    InvalidLabels {
        /// Path to the labels file.
        path: std::path::PathBuf,
        /// Description of the problem.
        message: String,
    },

    /// Model output width does not match the species index.
    #[error("model predicts {model_classes} species but labels define {label_classes}")]
    ModelLabelMismatch {
        /// Number of classes in the model's species head.
        model_classes: usize,
        /// Number of distinct species in the label source.
        label_classes: usize,
    },

    /// Failed to read a reference table file.
    #[error("failed to read {table} table '{path}'")]
    TableRead {
        /// Table kind (conservation or habitat).
        table: &'static str,
        /// Path to the table file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse a reference table.
    #[error("failed to parse {table} table '{path}'")]
    TableParse {
        /// Table kind (conservation or habitat).
        table: &'static str,
        /// Path to the table file.
        path: std::path::PathBuf,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// Invalid latitude value.
    #[error("invalid latitude for '{species}': {value} (must be -90.0 to 90.0)")]
    InvalidLatitude {
        /// Species the coordinate belongs to.
        species: String,
        /// Invalid latitude value.
        value: f64,
    },

    /// Invalid longitude value.
    #[error("invalid longitude for '{species}': {value} (must be -180.0 to 180.0)")]
    InvalidLongitude {
        /// Species the coordinate belongs to.
        species: String,
        /// Invalid longitude value.
        value: f64,
    },

    /// Uploaded image could not be decoded or resized.
    #[error("image unreadable: '{path}'")]
    ImageUnreadable {
        /// Path to the image file.
        path: std::path::PathBuf,
        /// Underlying error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// No image files were given.
    #[error("no image files found in the provided paths")]
    NoValidImageFiles,

    /// Inference failed.
    #[error("inference failed: {reason}")]
    Inference {
        /// Description of the inference failure.
        reason: String,
    },

    /// Encyclopedia request failed.
    #[error("encyclopedia request for '{title}' failed")]
    EncyclopediaRequest {
        /// Page title that was queried.
        title: String,
        /// Underlying error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Some images could not be analyzed.
    #[error("{failed} of {total} image(s) could not be analyzed")]
    AnalysisFailed {
        /// Number of failed images.
        failed: usize,
        /// Total number of images.
        total: usize,
    },

    /// Failed to write JSON output.
    #[error("failed to serialize JSON output")]
    JsonWrite {
        /// Underlying serialization error.
        #[source]
        source: serde_json::Error,
    },

    /// Internal error (for unexpected failures).
    #[error("internal error: {message}")]
    Internal {
        /// Error message.
        message: String,
    },
}

impl Error {
    /// Whether this error is a per-image input failure rather than a
    /// startup or internal failure.
    pub const fn is_input_failure(&self) -> bool {
        matches!(self, Self::ImageUnreadable { .. })
    }
}
