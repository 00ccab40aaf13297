//! Policy-action engine for Warden.
//!
//! Routes each policy-triggered action firing to an immediate in-process
//! effect or a deferred, zone-addressed unit of queued work, and keeps the
//! action-definition catalog reconciled with its declarative sources.

pub mod dispatch;
pub mod effects;
pub mod error;
pub mod quantize;
pub mod queue;
pub mod seed;
pub mod store;
pub mod types;

pub use dispatch::{ActionDispatcher, DispatchRegistry, DispatchRoutine, EffectPeers};
pub use error::{DispatchError, QuantizeError, SeedError};
pub use quantize::{round_to_nearest_4mb, round_up_to_block};
pub use queue::{DeferredWork, QueueAck, QueueProjector, WorkQueue, AUTOMATE_ROLE};
pub use seed::{CatalogReconciler, ScriptDirectoryReconciler, SeedReport};
pub use store::{DefinitionStore, DefinitionUpdate, MemoryDefinitionStore};
pub use types::{
    ActionDefinition, ActionKind, ActionOrigin, DispatchContext, EffectOutcome,
    InvocationOptions, PolicyTarget, ZoneAware,
};
