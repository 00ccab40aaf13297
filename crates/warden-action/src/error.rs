//! Error types for the policy-action engine.

use crate::types::ActionKind;
use warden_core::WardenError;

/// Errors from action dispatch.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("Unknown action kind: {0}")]
    UnknownKind(String),
    #[error("Action kind not registered: {0}")]
    UnregisteredKind(ActionKind),
    #[error("Missing required option: {0}")]
    MissingOption(&'static str),
    #[error("Effect collaborator failed: {0}")]
    Effect(#[from] WardenError),
    #[error("Queue put failed: {0}")]
    Queue(WardenError),
}

/// Errors from catalog and script-directory reconciliation.
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("Seed source unavailable: {0}")]
    SourceUnavailable(#[from] std::io::Error),
    #[error("Malformed catalog row at line {line}: {content}")]
    MalformedRow { line: usize, content: String },
    #[error("Store error: {0}")]
    Store(#[from] WardenError),
}

/// Errors from size quantization.
#[derive(Debug, thiserror::Error)]
pub enum QuantizeError {
    #[error("Invalid numeric input: {0}")]
    InvalidNumericInput(String),
}
