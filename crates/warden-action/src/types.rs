//! Core types for the policy-action engine.
//!
//! Defines action definitions, dispatch kinds, target capabilities, and the
//! per-firing dispatch context.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::DispatchError;
use crate::queue::QueueAck;
use warden_core::EventRecord;

// =============================================================================
// Enums
// =============================================================================

/// Origin tag of an action definition.
///
/// Reconcilers only ever create `Default` (catalog) and `Script` (script
/// directory) definitions; `Custom` marks operator-defined rows, which no
/// reconciler touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionOrigin {
    Default,
    Script,
    Custom,
}

impl fmt::Display for ActionOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionOrigin::Default => write!(f, "default"),
            ActionOrigin::Script => write!(f, "script"),
            ActionOrigin::Custom => write!(f, "custom"),
        }
    }
}

impl std::str::FromStr for ActionOrigin {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "default" => Ok(ActionOrigin::Default),
            "script" => Ok(ActionOrigin::Script),
            "custom" => Ok(ActionOrigin::Custom),
            _ => Err(format!("Unknown action origin: {}", s)),
        }
    }
}

/// The closed set of dispatch kinds this engine knows how to route.
///
/// Each kind maps to exactly one registered routine; resolving an unknown
/// kind string fails with [`DispatchError::UnknownKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    CustomAutomation,
    RaiseAutomationEvent,
    EmsRefresh,
    VmRetire,
    EvmEvent,
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionKind::CustomAutomation => write!(f, "custom_automation"),
            ActionKind::RaiseAutomationEvent => write!(f, "raise_automation_event"),
            ActionKind::EmsRefresh => write!(f, "ems_refresh"),
            ActionKind::VmRetire => write!(f, "vm_retire"),
            ActionKind::EvmEvent => write!(f, "evm_event"),
        }
    }
}

impl std::str::FromStr for ActionKind {
    type Err = DispatchError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "custom_automation" => Ok(ActionKind::CustomAutomation),
            "raise_automation_event" => Ok(ActionKind::RaiseAutomationEvent),
            "ems_refresh" => Ok(ActionKind::EmsRefresh),
            "vm_retire" => Ok(ActionKind::VmRetire),
            "evm_event" => Ok(ActionKind::EvmEvent),
            _ => Err(DispatchError::UnknownKind(s.to_string())),
        }
    }
}

// =============================================================================
// Target capabilities
// =============================================================================

/// Capability of a resource to report the execution zone that owns it.
///
/// Deferred work is pinned to the reporting resource's zone; `None` means
/// "any zone may pick this up".
pub trait ZoneAware {
    fn my_zone(&self) -> Option<String>;
}

/// A resource a policy action applies to (e.g. a virtual machine).
pub trait PolicyTarget: ZoneAware + Send + Sync {
    /// Class identity of the resource, used to address deferred work.
    fn object_type(&self) -> &str;

    /// Stable identity of the resource.
    fn object_id(&self) -> Uuid;

    /// Host the resource runs on, if any.
    fn host_id(&self) -> Option<Uuid> {
        None
    }

    /// Management system the resource belongs to, if any.
    fn ems_id(&self) -> Option<Uuid> {
        None
    }
}

// =============================================================================
// Domain Structs
// =============================================================================

/// A named, typed unit of policy-triggered work.
///
/// `name` is unique across the whole catalog regardless of origin. The
/// `options` map is open; its shape depends on the kind (e.g. `{"filename":
/// path}` for script actions, `{"request": name}` for custom automation).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionDefinition {
    pub name: String,
    pub description: String,
    pub action_type: ActionOrigin,
    pub options: Value,
}

/// Per-invocation options accompanying a dispatch.
///
/// `synchronous` selects between immediate execution and queue deferral;
/// the remaining fields are kind-specific and tolerated as absent.
#[derive(Clone, Default)]
pub struct InvocationOptions {
    pub synchronous: bool,
    pub event: Option<String>,
    pub policy: Option<String>,
    pub vm: Option<Arc<dyn PolicyTarget>>,
    pub host: Option<Uuid>,
    pub ems: Option<Uuid>,
}

/// Ephemeral context for a single action firing.
///
/// References the firing definition and the target resource; one context per
/// firing, never persisted.
#[derive(Clone)]
pub struct DispatchContext {
    pub action: ActionDefinition,
    pub target: Arc<dyn PolicyTarget>,
    pub options: InvocationOptions,
}

impl DispatchContext {
    pub fn new(
        action: ActionDefinition,
        target: Arc<dyn PolicyTarget>,
        options: InvocationOptions,
    ) -> Self {
        Self {
            action,
            target,
            options,
        }
    }
}

/// What a dispatch produced.
#[derive(Debug)]
pub enum EffectOutcome {
    /// A direct void effect ran to completion.
    Completed,
    /// A direct call returned a result payload.
    Delivered(Value),
    /// The effect was deferred; the queue acknowledged the descriptor.
    Deferred(QueueAck),
    /// An event record was constructed (no effect invoked).
    Event(EventRecord),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_origin_display() {
        assert_eq!(ActionOrigin::Default.to_string(), "default");
        assert_eq!(ActionOrigin::Script.to_string(), "script");
        assert_eq!(ActionOrigin::Custom.to_string(), "custom");
    }

    #[test]
    fn test_action_origin_from_str() {
        assert_eq!("default".parse::<ActionOrigin>().unwrap(), ActionOrigin::Default);
        assert_eq!("script".parse::<ActionOrigin>().unwrap(), ActionOrigin::Script);
        assert_eq!("custom".parse::<ActionOrigin>().unwrap(), ActionOrigin::Custom);
        assert!("builtin".parse::<ActionOrigin>().is_err());
    }

    #[test]
    fn test_action_origin_serde_round_trip() {
        for variant in [ActionOrigin::Default, ActionOrigin::Script, ActionOrigin::Custom] {
            let json = serde_json::to_string(&variant).unwrap();
            let rt: ActionOrigin = serde_json::from_str(&json).unwrap();
            assert_eq!(variant, rt);
        }
    }

    #[test]
    fn test_action_kind_display() {
        assert_eq!(ActionKind::CustomAutomation.to_string(), "custom_automation");
        assert_eq!(
            ActionKind::RaiseAutomationEvent.to_string(),
            "raise_automation_event"
        );
        assert_eq!(ActionKind::EmsRefresh.to_string(), "ems_refresh");
        assert_eq!(ActionKind::VmRetire.to_string(), "vm_retire");
        assert_eq!(ActionKind::EvmEvent.to_string(), "evm_event");
    }

    #[test]
    fn test_action_kind_from_str() {
        assert_eq!(
            "custom_automation".parse::<ActionKind>().unwrap(),
            ActionKind::CustomAutomation
        );
        assert_eq!(
            "raise_automation_event".parse::<ActionKind>().unwrap(),
            ActionKind::RaiseAutomationEvent
        );
        assert_eq!("ems_refresh".parse::<ActionKind>().unwrap(), ActionKind::EmsRefresh);
        assert_eq!("vm_retire".parse::<ActionKind>().unwrap(), ActionKind::VmRetire);
        assert_eq!("evm_event".parse::<ActionKind>().unwrap(), ActionKind::EvmEvent);
    }

    #[test]
    fn test_action_kind_unknown_string() {
        let err = "snmp_trap".parse::<ActionKind>().unwrap_err();
        assert!(matches!(err, DispatchError::UnknownKind(_)));
        assert_eq!(err.to_string(), "Unknown action kind: snmp_trap");
    }

    #[test]
    fn test_action_kind_display_from_str_round_trip() {
        for variant in [
            ActionKind::CustomAutomation,
            ActionKind::RaiseAutomationEvent,
            ActionKind::EmsRefresh,
            ActionKind::VmRetire,
            ActionKind::EvmEvent,
        ] {
            let s = variant.to_string();
            let parsed: ActionKind = s.parse().unwrap();
            assert_eq!(variant, parsed);
        }
    }

    #[test]
    fn test_action_kind_serde_json_format() {
        assert_eq!(
            serde_json::to_string(&ActionKind::RaiseAutomationEvent).unwrap(),
            "\"raise_automation_event\""
        );
        assert_eq!(
            serde_json::to_string(&ActionKind::EmsRefresh).unwrap(),
            "\"ems_refresh\""
        );
    }

    #[test]
    fn test_action_definition_serde_round_trip() {
        let def = ActionDefinition {
            name: "script_1_sh".to_string(),
            description: "Execute script: script.1.sh".to_string(),
            action_type: ActionOrigin::Script,
            options: serde_json::json!({"filename": "/opt/scripts/script.1.sh"}),
        };
        let json = serde_json::to_string(&def).unwrap();
        let rt: ActionDefinition = serde_json::from_str(&json).unwrap();
        assert_eq!(def, rt);
    }

    #[test]
    fn test_invocation_options_default() {
        let options = InvocationOptions::default();
        assert!(!options.synchronous);
        assert!(options.event.is_none());
        assert!(options.policy.is_none());
        assert!(options.vm.is_none());
        assert!(options.host.is_none());
        assert!(options.ems.is_none());
    }
}
