//! Application-wide constants.
//!
//! All magic numbers and strings are defined here to ensure consistency
//! and make changes easy to track.

/// Application name used for config directories and user-facing messages.
pub const APP_NAME: &str = "bioscan";

/// Default CSV column holding the species name in the label source.
pub const DEFAULT_LABEL_COLUMN: &str = "species_name";

/// Model input tensor constants.
pub mod input {
    /// Square edge length the image is resized to.
    pub const IMAGE_SIZE: u32 = 224;

    /// Color channels (RGB).
    pub const CHANNELS: usize = 3;

    /// Divisor that scales 8-bit pixel values into [0, 1].
    pub const PIXEL_SCALE: f32 = 255.0;

    /// Input tensor shape in NHWC layout with a batch of one.
    #[allow(clippy::cast_possible_wrap)]
    pub const SHAPE: [i64; 4] = [1, IMAGE_SIZE as i64, IMAGE_SIZE as i64, CHANNELS as i64];
}

/// Ecological trait head constants.
pub mod traits {
    /// Number of values in the trait head (mimic, model).
    pub const LEN: usize = 2;

    /// Index of the mimic-likelihood component.
    pub const MIMIC: usize = 0;

    /// Index of the model-species-likelihood component.
    pub const MODEL: usize = 1;

    /// Probability above which a trait is reported as likely.
    ///
    /// Applied to each trait independently.
    pub const FLAG_THRESHOLD: f32 = 0.5;
}

/// Encyclopedia lookup constants.
pub mod encyclopedia {
    /// Client identifier sent with every encyclopedia request.
    pub const USER_AGENT: &str = "BioScanAI/1.0 (bioscan command-line client)";

    /// Default Wikipedia language edition.
    pub const DEFAULT_LANGUAGE: &str = "en";

    /// Default request timeout in seconds.
    pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

    /// Suffix appended to the species name for the first candidate title.
    pub const TITLE_SUFFIX: &str = " butterfly";

    /// Text returned when no article matches any candidate title.
    pub const NOT_FOUND_TEXT: &str = "No Wikipedia article found.";
}

/// Habitat map constants.
pub mod map {
    /// Zoom level for habitat map links.
    pub const ZOOM: u8 = 4;

    /// Base URL for habitat map links.
    pub const BASE_URL: &str = "https://www.openstreetmap.org/";
}

/// Confidence value bounds.
pub mod confidence {
    /// Maximum confidence percentage.
    pub const MAX_PERCENT: f32 = 100.0;
    /// Decimal places for confidence formatting.
    pub const DECIMAL_PLACES: usize = 2;
}

/// Supported image file extensions when expanding directories.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];
