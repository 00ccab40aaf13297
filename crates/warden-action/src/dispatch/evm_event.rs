//! Platform-event construction routine.

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::dispatch::DispatchRoutine;
use crate::error::DispatchError;
use crate::types::{ActionKind, DispatchContext, EffectOutcome};
use warden_core::EventRecord;

/// Handler for `evm_event` actions.
///
/// Always runs in-process regardless of the synchronous flag: it constructs
/// and returns a timeline event record populated from the target's host and
/// management-system identifiers. Event handling is bypassed at creation
/// time; no collaborator and no queue traffic.
pub struct EvmEventRoutine;

impl EvmEventRoutine {
    pub fn new() -> Self {
        Self
    }
}

impl Default for EvmEventRoutine {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DispatchRoutine for EvmEventRoutine {
    fn kind(&self) -> ActionKind {
        ActionKind::EvmEvent
    }

    async fn dispatch(&self, ctx: &DispatchContext) -> Result<EffectOutcome, DispatchError> {
        let record = EventRecord {
            id: Uuid::new_v4(),
            event_type: ctx.action.name.clone(),
            vm_id: Some(ctx.target.object_id()),
            host_id: ctx.target.host_id(),
            ems_id: ctx.target.ems_id(),
            policy: ctx.options.policy.clone(),
            timestamp: Utc::now(),
        };

        tracing::debug!(event_type = %record.event_type, "Constructed platform event record");
        Ok(EffectOutcome::Event(record))
    }
}
