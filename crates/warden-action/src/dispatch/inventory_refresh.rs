//! Inventory-refresh dispatch routine.

use async_trait::async_trait;
use std::sync::Arc;

use crate::dispatch::DispatchRoutine;
use crate::effects::InventoryRefresher;
use crate::error::DispatchError;
use crate::types::{ActionKind, DispatchContext, EffectOutcome};

/// Handler for `ems_refresh` actions.
///
/// The refresh subsystem owns its own internal queueing, so the asynchronous
/// path calls its queue-refresh operation directly and never touches the
/// queue projector.
pub struct InventoryRefreshRoutine {
    refresher: Arc<dyn InventoryRefresher>,
}

impl InventoryRefreshRoutine {
    pub fn new(refresher: Arc<dyn InventoryRefresher>) -> Self {
        Self { refresher }
    }
}

#[async_trait]
impl DispatchRoutine for InventoryRefreshRoutine {
    fn kind(&self) -> ActionKind {
        ActionKind::EmsRefresh
    }

    async fn dispatch(&self, ctx: &DispatchContext) -> Result<EffectOutcome, DispatchError> {
        if ctx.options.synchronous {
            self.refresher.refresh(ctx.target.as_ref()).await?;
        } else {
            self.refresher.queue_refresh(ctx.target.as_ref()).await?;
        }
        Ok(EffectOutcome::Completed)
    }
}
