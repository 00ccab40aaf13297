//! Deferred-work projection onto the durable queue.
//!
//! Builds the serializable descriptor for a call to be performed later and
//! hands it to the external queue collaborator. The descriptor's `args` map
//! 1:1 to the parameter list of the equivalent synchronous call, so deferred
//! and immediate execution are observably equivalent modulo timing.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::DispatchError;
use warden_core::{QueuePriority, WardenError};

/// Server role that consumes deferred policy-action work.
pub const AUTOMATE_ROLE: &str = "automate";

/// A unit of deferred work addressed to the durable queue.
///
/// `zone = None` means any zone may execute the work; `Some` pins it to the
/// named zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeferredWork {
    pub class_name: String,
    pub method_name: String,
    pub args: Value,
    pub priority: QueuePriority,
    pub zone: Option<String>,
    pub role: String,
}

/// Acknowledgment returned by the queue collaborator for an accepted message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueAck {
    pub message_id: Uuid,
}

/// The durable queue collaborator.
///
/// Storage, retry, and delivery guarantees live behind this seam; from this
/// engine's perspective `put` is a fail-fast, non-retrying call.
#[async_trait]
pub trait WorkQueue: Send + Sync {
    async fn put(&self, work: DeferredWork) -> Result<QueueAck, WardenError>;
}

/// Builds deferred-work descriptors and hands them to the queue.
pub struct QueueProjector {
    queue: Arc<dyn WorkQueue>,
}

impl QueueProjector {
    pub fn new(queue: Arc<dyn WorkQueue>) -> Self {
        Self { queue }
    }

    /// Enqueue a deferred call.
    ///
    /// Pure builder plus a single `put`; `args` are passed through exactly as
    /// supplied, in order. A failing `put` surfaces as
    /// [`DispatchError::Queue`] with no fallback to synchronous execution.
    pub async fn enqueue(
        &self,
        class_name: &str,
        method_name: &str,
        args: Value,
        zone: Option<String>,
        role: &str,
        priority: QueuePriority,
    ) -> Result<QueueAck, DispatchError> {
        let work = DeferredWork {
            class_name: class_name.to_string(),
            method_name: method_name.to_string(),
            args,
            priority,
            zone,
            role: role.to_string(),
        };

        tracing::debug!(
            class = %work.class_name,
            method = %work.method_name,
            zone = ?work.zone,
            "Deferring work to queue"
        );

        self.queue.put(work).await.map_err(DispatchError::Queue)
    }
}
