//! External effect collaborators invoked by dispatch routines.
//!
//! Each trait is a boundary seam: recovery and retry policy for a failing
//! effect belongs to the collaborator (or the policy engine that fired the
//! action), never to this engine.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use uuid::Uuid;

use crate::types::PolicyTarget;
use warden_core::WardenError;

/// Queue class identity of the automation-workflow engine.
pub const AUTOMATION_ENGINE_CLASS: &str = "AutomationEngine";
/// Queue method identity of the automation-workflow delivery entry point.
pub const DELIVER_METHOD: &str = "deliver";

/// Queue class identity of the synthetic-event subsystem.
pub const AUTOMATION_EVENT_CLASS: &str = "AutomationEvent";
/// Queue method identity of the synthetic-event raise entry point.
pub const RAISE_SYNTHETIC_EVENT_METHOD: &str = "raise_synthetic_event";

/// Queue method identity for deferred retirement, addressed to the target's
/// own class.
pub const RETIRE_METHOD: &str = "retire";

/// The automation-workflow engine.
#[async_trait]
pub trait AutomationEngine: Send + Sync {
    async fn deliver(&self, args: Value) -> Result<Value, WardenError>;
}

/// The synthetic-event subsystem.
#[async_trait]
pub trait SyntheticEventRaiser: Send + Sync {
    async fn raise_synthetic_event(
        &self,
        event_name: &str,
        payload: Value,
    ) -> Result<(), WardenError>;
}

/// The inventory-refresh subsystem.
///
/// Owns its own internal queueing; the asynchronous path goes through
/// `queue_refresh`, not through this engine's queue projector.
#[async_trait]
pub trait InventoryRefresher: Send + Sync {
    async fn refresh(&self, target: &dyn PolicyTarget) -> Result<(), WardenError>;
    async fn queue_refresh(&self, target: &dyn PolicyTarget) -> Result<(), WardenError>;
}

/// The resource-retirement subsystem.
#[async_trait]
pub trait RetirementService: Send + Sync {
    async fn retire(&self, targets: Vec<Uuid>, date: DateTime<Utc>) -> Result<(), WardenError>;
}
