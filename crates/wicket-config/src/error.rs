use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// A source failed to parse or a field has the wrong type.
    #[error("Failed to load configuration: {0}")]
    Figment(#[from] figment::Error),

    /// A setting the requested operation needs is empty.
    #[error("'{field}' is not set; {hint}")]
    NotConfigured { field: &'static str, hint: &'static str },

    /// A value is present but out of range.
    #[error("Invalid value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}
