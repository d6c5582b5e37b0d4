use thiserror::Error;

/// Error types for setscout.
///
/// Expected extraction misses (no title element, no filming section, a
/// candidate that will not split) are NOT errors; parsers return `Option`
/// or empty collections for those. This enum covers the boundaries where
/// something genuinely failed: transport, configuration, export.
#[derive(Error, Debug)]
pub enum ScoutError {
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Invalid configuration file: {path}")]
    InvalidConfig { path: String },

    #[error("Network error: {message}")]
    Network { message: String },

    #[error("HTTP request failed: {url} - {status}")]
    HttpRequest { url: String, status: u16 },

    #[error("Parse error: {message}")]
    Parse { message: String },

    #[error("Export error: {message}")]
    Export { message: String },

    #[error("File write failed: {path}")]
    FileWrite { path: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl ScoutError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Configuration { message: message.into() }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::Network { message: message.into() }
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse { message: message.into() }
    }

    pub fn export(message: impl Into<String>) -> Self {
        Self::Export { message: message.into() }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal { message: message.into() }
    }

    /// Whether retrying the same operation could succeed.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Network { .. } | Self::HttpRequest { .. })
    }

    /// Error category for logging.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Configuration { .. } | Self::InvalidConfig { .. } => "configuration",
            Self::Network { .. } | Self::HttpRequest { .. } => "network",
            Self::Parse { .. } => "parse",
            Self::Export { .. } | Self::FileWrite { .. } => "export",
            Self::Internal { .. } => "internal",
        }
    }
}

pub type ScoutResult<T> = std::result::Result<T, ScoutError>;

impl From<reqwest::Error> for ScoutError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network { message: err.to_string() }
    }
}

impl From<std::io::Error> for ScoutError {
    fn from(err: std::io::Error) -> Self {
        Self::Internal { message: err.to_string() }
    }
}
