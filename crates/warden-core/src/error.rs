use thiserror::Error;

/// Top-level error type for the Warden platform.
///
/// Each variant wraps a subsystem-specific failure. Subsystem crates define
/// their own error types and implement `From<SubsystemError> for WardenError`
/// so that the `?` operator works seamlessly across crate boundaries.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum WardenError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Queue error: {0}")]
    Queue(String),

    #[error("Effect error: {0}")]
    Effect(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<toml::de::Error> for WardenError {
    fn from(err: toml::de::Error) -> Self {
        WardenError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for WardenError {
    fn from(err: toml::ser::Error) -> Self {
        WardenError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for WardenError {
    fn from(err: serde_json::Error) -> Self {
        WardenError::Serialization(err.to_string())
    }
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, WardenError>;
