use thiserror::Error;

/// Errors raised when loading or validating compiler settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The escape character would collide with LIKE syntax or quoting.
    #[error("'{0}' cannot be used as the LIKE escape character")]
    InvalidEscapeChar(char),

    #[error("Alias prefix length must be greater than zero")]
    ZeroAliasPrefix,

    #[error("Parameter prefix must not be empty")]
    EmptyParamPrefix,

    #[error("Format function name must not be empty")]
    EmptyFormatFunction,

    /// The settings document could not be decoded.
    #[error("Failed to decode settings: {0}")]
    Decode(#[from] serde_json::Error),
}
