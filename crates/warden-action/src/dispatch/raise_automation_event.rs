//! Synthetic automation-event dispatch routine.

use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;

use crate::dispatch::DispatchRoutine;
use crate::effects::{
    SyntheticEventRaiser, AUTOMATION_EVENT_CLASS, RAISE_SYNTHETIC_EVENT_METHOD,
};
use crate::error::DispatchError;
use crate::queue::{QueueProjector, WorkQueue, AUTOMATE_ROLE};
use crate::types::{ActionKind, DispatchContext, EffectOutcome};
use warden_core::QueuePriority;

/// Handler for `raise_automation_event` actions.
///
/// The effective target is the `vm` invocation option when present, falling
/// back to the dispatch target. Deferred dispatch is pinned to the effective
/// target's owning zone.
pub struct RaiseAutomationEventRoutine {
    events: Arc<dyn SyntheticEventRaiser>,
    projector: QueueProjector,
}

impl RaiseAutomationEventRoutine {
    pub fn new(events: Arc<dyn SyntheticEventRaiser>, queue: Arc<dyn WorkQueue>) -> Self {
        Self {
            events,
            projector: QueueProjector::new(queue),
        }
    }
}

#[async_trait]
impl DispatchRoutine for RaiseAutomationEventRoutine {
    fn kind(&self) -> ActionKind {
        ActionKind::RaiseAutomationEvent
    }

    async fn dispatch(&self, ctx: &DispatchContext) -> Result<EffectOutcome, DispatchError> {
        let event_name = ctx
            .options
            .event
            .clone()
            .ok_or(DispatchError::MissingOption("event"))?;

        let effective = ctx
            .options
            .vm
            .clone()
            .unwrap_or_else(|| Arc::clone(&ctx.target));

        // host/ems/policy are tolerated as absent and pass through as null.
        let payload = json!({
            "vm": effective.object_id(),
            "host": ctx.options.host,
            "ems": ctx.options.ems,
            "policy": ctx.options.policy,
        });

        if ctx.options.synchronous {
            self.events
                .raise_synthetic_event(&event_name, payload)
                .await?;
            Ok(EffectOutcome::Completed)
        } else {
            let zone = effective.my_zone();
            let ack = self
                .projector
                .enqueue(
                    AUTOMATION_EVENT_CLASS,
                    RAISE_SYNTHETIC_EVENT_METHOD,
                    json!([event_name, payload]),
                    zone,
                    AUTOMATE_ROLE,
                    QueuePriority::High,
                )
                .await?;
            Ok(EffectOutcome::Deferred(ack))
        }
    }
}
