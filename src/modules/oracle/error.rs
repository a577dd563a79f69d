use thiserror::Error;

/// Result type for oracle operations.
pub type Result<T> = std::result::Result<T, OracleError>;

/// Failures talking to the completion provider.
#[derive(Debug, Error)]
pub enum OracleError {
    /// Missing credential or invalid client settings
    #[error("Configuration error: {0}")]
    Config(String),

    /// Connection failed or dropped
    #[error("Network error: {0}")]
    Network(String),

    /// Non-2xx response or an empty choice list
    #[error("API error: {0}")]
    Api(String),

    /// Response envelope could not be decoded
    #[error("Parse error: {0}")]
    Parse(String),
}
