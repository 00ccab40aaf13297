//! Shared foundation for the Warden policy-automation subsystem.
//!
//! Provides the top-level error type, TOML configuration, tracing bootstrap,
//! and the domain vocabulary shared across Warden crates.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod types;

pub use config::WardenConfig;
pub use error::{Result, WardenError};
pub use types::{EventRecord, QueuePriority};
