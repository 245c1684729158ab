//! Error types for SpamLens

/// Result type alias using SpamLens's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for SpamLens operations
///
/// Nothing in the scoring engine is fatal to the host: every variant is
/// contained to the single item (or config load) that produced it.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Engine configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// Phrase catalogue errors (empty phrases, bad weights, bad regexes)
    #[error("catalog error: {0}")]
    Catalog(String),

    /// Pixel source could not produce a pixel grid
    #[error("decode failure: {0}")]
    Decode(String),

    /// Pixel buffer length does not match the declared dimensions
    #[error("invalid dimensions: {width}x{height} needs {expected} pixels, got {actual}")]
    InvalidDimensions {
        width: usize,
        height: usize,
        expected: usize,
        actual: usize,
    },

    /// File IO errors
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Generic internal errors
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new catalog error
    pub fn catalog(msg: impl Into<String>) -> Self {
        Self::Catalog(msg.into())
    }

    /// Create a new decode error
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Create a new internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Whether this error came from turning a source into pixels
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode(_) | Self::InvalidDimensions { .. })
    }
}
