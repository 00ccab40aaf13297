//! Action dispatch: routine trait, fixed registry, and the dispatcher.
//!
//! Each action kind maps to exactly one routine in a closed table. A routine
//! decides, per firing, whether the effect runs immediately through its
//! collaborator or is deferred through the queue projector; exactly one of
//! the two happens per dispatch.

pub mod custom_automation;
pub mod evm_event;
pub mod inventory_refresh;
pub mod raise_automation_event;
pub mod vm_retire;

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

use crate::effects::{
    AutomationEngine, InventoryRefresher, RetirementService, SyntheticEventRaiser,
};
use crate::error::DispatchError;
use crate::queue::WorkQueue;
use crate::types::{ActionKind, DispatchContext, EffectOutcome};

pub use custom_automation::CustomAutomationRoutine;
pub use evm_event::EvmEventRoutine;
pub use inventory_refresh::InventoryRefreshRoutine;
pub use raise_automation_event::RaiseAutomationEventRoutine;
pub use vm_retire::VmRetireRoutine;

/// A dispatch routine for one action kind.
#[async_trait]
pub trait DispatchRoutine: Send + Sync {
    /// The kind this routine handles.
    fn kind(&self) -> ActionKind;

    /// Run or defer the action's effect for one firing.
    async fn dispatch(&self, ctx: &DispatchContext) -> Result<EffectOutcome, DispatchError>;
}

/// External collaborators the default routines are wired to.
#[derive(Clone)]
pub struct EffectPeers {
    pub automation: Arc<dyn AutomationEngine>,
    pub events: Arc<dyn SyntheticEventRaiser>,
    pub refresher: Arc<dyn InventoryRefresher>,
    pub retirement: Arc<dyn RetirementService>,
    pub queue: Arc<dyn WorkQueue>,
}

/// Fixed table mapping action kinds to their routines.
pub struct DispatchRegistry {
    routines: HashMap<ActionKind, Arc<dyn DispatchRoutine>>,
}

impl DispatchRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            routines: HashMap::new(),
        }
    }

    /// Register a routine under its declared kind, replacing any previous
    /// routine for that kind.
    pub fn register(&mut self, routine: Arc<dyn DispatchRoutine>) {
        self.routines.insert(routine.kind(), routine);
    }

    /// Register the default routine for every action kind.
    pub fn register_defaults(&mut self, peers: &EffectPeers) {
        self.register(Arc::new(CustomAutomationRoutine::new(
            Arc::clone(&peers.automation),
            Arc::clone(&peers.queue),
        )));
        self.register(Arc::new(RaiseAutomationEventRoutine::new(
            Arc::clone(&peers.events),
            Arc::clone(&peers.queue),
        )));
        self.register(Arc::new(InventoryRefreshRoutine::new(Arc::clone(
            &peers.refresher,
        ))));
        self.register(Arc::new(VmRetireRoutine::new(
            Arc::clone(&peers.retirement),
            Arc::clone(&peers.queue),
        )));
        self.register(Arc::new(EvmEventRoutine::new()));
    }

    /// Look up the routine for a kind.
    pub fn get(&self, kind: ActionKind) -> Option<Arc<dyn DispatchRoutine>> {
        self.routines.get(&kind).cloned()
    }
}

impl Default for DispatchRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// State-free decision layer routing each firing to its routine.
pub struct ActionDispatcher {
    registry: DispatchRegistry,
}

impl ActionDispatcher {
    /// Create a dispatcher over the given registry.
    pub fn new(registry: DispatchRegistry) -> Self {
        Self { registry }
    }

    /// Create a dispatcher with the default routine for every kind.
    pub fn with_defaults(peers: &EffectPeers) -> Self {
        let mut registry = DispatchRegistry::new();
        registry.register_defaults(peers);
        Self::new(registry)
    }

    /// Dispatch one action firing.
    pub async fn dispatch(
        &self,
        kind: ActionKind,
        ctx: &DispatchContext,
    ) -> Result<EffectOutcome, DispatchError> {
        let routine = self
            .registry
            .get(kind)
            .ok_or(DispatchError::UnregisteredKind(kind))?;

        tracing::debug!(kind = %kind, action = %ctx.action.name, "Dispatching action");
        routine.dispatch(ctx).await
    }
}

// =============================================================================
// Test support
// =============================================================================
