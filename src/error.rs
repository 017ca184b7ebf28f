/// Error types for multilingual template processing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum I18nError {
    /// Language is not a member of the allowed set, or is malformed
    InvalidLanguage(String),
    /// Translation file does not exist at the expected path
    FileNotFound(String),
    /// Translation file exists but could not be opened or read
    ReadError(String),
    /// Error propagated from the host template engine
    EngineError(String),
    /// Error loading or parsing configuration
    ConfigError(String),
}

impl std::fmt::Display for I18nError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            I18nError::InvalidLanguage(msg) => write!(f, "Invalid language: {}", msg),
            I18nError::FileNotFound(msg) => write!(f, "Translation file not found: {}", msg),
            I18nError::ReadError(msg) => write!(f, "Translation file read error: {}", msg),
            I18nError::EngineError(msg) => write!(f, "Template engine error: {}", msg),
            I18nError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for I18nError {}

/// Result type for multilingual template operations
pub type I18nResult<T> = Result<T, I18nError>;
