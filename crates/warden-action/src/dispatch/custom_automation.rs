//! Custom-automation dispatch routine.
//!
//! Builds an automation-workflow request from the firing definition and
//! either delivers it in-process or defers it to the queue.

use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::dispatch::DispatchRoutine;
use crate::effects::{AutomationEngine, AUTOMATION_ENGINE_CLASS, DELIVER_METHOD};
use crate::error::DispatchError;
use crate::queue::{QueueProjector, WorkQueue, AUTOMATE_ROLE};
use crate::types::{ActionKind, DispatchContext, EffectOutcome};
use warden_core::QueuePriority;

/// Handler for `custom_automation` actions.
///
/// The request name comes from the firing action definition's own options,
/// not from the per-invocation options.
pub struct CustomAutomationRoutine {
    engine: Arc<dyn AutomationEngine>,
    projector: QueueProjector,
}

impl CustomAutomationRoutine {
    pub fn new(engine: Arc<dyn AutomationEngine>, queue: Arc<dyn WorkQueue>) -> Self {
        Self {
            engine,
            projector: QueueProjector::new(queue),
        }
    }

    /// The argument tuple is identical for both paths, so deferred and
    /// immediate delivery are observably equivalent.
    fn build_args(ctx: &DispatchContext) -> Result<Value, DispatchError> {
        let request = ctx
            .action
            .options
            .get("request")
            .and_then(Value::as_str)
            .ok_or(DispatchError::MissingOption("request"))?;

        Ok(json!({
            "object_type": ctx.target.object_type(),
            "object_id": ctx.target.object_id(),
            "attrs": {"request": request},
            "instance_name": "REQUEST",
            "automate_message": "create",
        }))
    }
}

#[async_trait]
impl DispatchRoutine for CustomAutomationRoutine {
    fn kind(&self) -> ActionKind {
        ActionKind::CustomAutomation
    }

    async fn dispatch(&self, ctx: &DispatchContext) -> Result<EffectOutcome, DispatchError> {
        let args = Self::build_args(ctx)?;

        if ctx.options.synchronous {
            let result = self.engine.deliver(args).await?;
            Ok(EffectOutcome::Delivered(result))
        } else {
            let ack = self
                .projector
                .enqueue(
                    AUTOMATION_ENGINE_CLASS,
                    DELIVER_METHOD,
                    Value::Array(vec![args]),
                    None,
                    AUTOMATE_ROLE,
                    QueuePriority::High,
                )
                .await?;
            Ok(EffectOutcome::Deferred(ack))
        }
    }
}
