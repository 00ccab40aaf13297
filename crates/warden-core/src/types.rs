use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

// =============================================================================
// Enums
// =============================================================================

/// Delivery priority tiers recognized by the durable work queue.
///
/// Every dispatch path in the policy-action engine enqueues at `High`; the
/// lower tiers exist for other queue producers on the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueuePriority {
    High,
    Normal,
    Low,
}

impl fmt::Display for QueuePriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueuePriority::High => write!(f, "high"),
            QueuePriority::Normal => write!(f, "normal"),
            QueuePriority::Low => write!(f, "low"),
        }
    }
}

impl std::str::FromStr for QueuePriority {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "high" => Ok(QueuePriority::High),
            "normal" => Ok(QueuePriority::Normal),
            "low" => Ok(QueuePriority::Low),
            _ => Err(format!("Unknown queue priority: {}", s)),
        }
    }
}

// =============================================================================
// Domain Structs
// =============================================================================

/// A synthetic platform event row, as shown on the resource timeline.
///
/// Constructed by the evm-event dispatch routine from the target resource's
/// host and management-system identifiers. Event handling is bypassed at
/// creation time; only the record itself is produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventRecord {
    pub id: Uuid,
    pub event_type: String,
    pub vm_id: Option<Uuid>,
    pub host_id: Option<Uuid>,
    pub ems_id: Option<Uuid>,
    pub policy: Option<String>,
    pub timestamp: DateTime<Utc>,
}
