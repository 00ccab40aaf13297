//! Virtual-machine retirement dispatch routine.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use serde_json::json;
use std::sync::Arc;

use crate::dispatch::DispatchRoutine;
use crate::effects::{RetirementService, RETIRE_METHOD};
use crate::error::DispatchError;
use crate::queue::{QueueProjector, WorkQueue, AUTOMATE_ROLE};
use crate::types::{ActionKind, DispatchContext, EffectOutcome};
use warden_core::QueuePriority;

/// Handler for `vm_retire` actions.
///
/// The retirement date is backdated by exactly one day from invocation time.
/// Deferred dispatch addresses the target's own class and is pinned to the
/// target's owning zone.
pub struct VmRetireRoutine {
    retirement: Arc<dyn RetirementService>,
    projector: QueueProjector,
}

impl VmRetireRoutine {
    pub fn new(retirement: Arc<dyn RetirementService>, queue: Arc<dyn WorkQueue>) -> Self {
        Self {
            retirement,
            projector: QueueProjector::new(queue),
        }
    }
}

#[async_trait]
impl DispatchRoutine for VmRetireRoutine {
    fn kind(&self) -> ActionKind {
        ActionKind::VmRetire
    }

    async fn dispatch(&self, ctx: &DispatchContext) -> Result<EffectOutcome, DispatchError> {
        let date = Utc::now() - Duration::days(1);
        let target_id = ctx.target.object_id();

        if ctx.options.synchronous {
            self.retirement.retire(vec![target_id], date).await?;
            Ok(EffectOutcome::Completed)
        } else {
            let ack = self
                .projector
                .enqueue(
                    ctx.target.object_type(),
                    RETIRE_METHOD,
                    json!([[target_id], {"date": date}]),
                    ctx.target.my_zone(),
                    AUTOMATE_ROLE,
                    QueuePriority::High,
                )
                .await?;
            Ok(EffectOutcome::Deferred(ack))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::testing::{context, recorders, TestVm};
    use crate::types::InvocationOptions;
    use chrono::DateTime;

    #[tokio::test]
    async fn test_synchronous_retires_with_backdated_date() {
        let (peers, recorders) = recorders();
        let routine = VmRetireRoutine::new(peers.retirement, peers.queue);
        let vm = Arc::new(TestVm::new());

        let before = Utc::now();
        let ctx = context(
            "vm_retire",
            json!({}),
            Arc::clone(&vm),
            InvocationOptions {
                synchronous: true,
                ..InvocationOptions::default()
            },
        );
        let outcome = routine.dispatch(&ctx).await.unwrap();
        let after = Utc::now();

        let calls = recorders.retirement.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        let (targets, date) = &calls[0];
        assert_eq!(*targets, vec![vm.id]);
        assert!(*date >= before - Duration::days(1));
        assert!(*date <= after - Duration::days(1));
        assert!(recorders.queue.puts.lock().unwrap().is_empty());
        assert!(matches!(outcome, EffectOutcome::Completed));
    }

    #[tokio::test]
    async fn test_asynchronous_queues_to_target_class_and_zone() {
        let (peers, recorders) = recorders();
        let routine = VmRetireRoutine::new(peers.retirement, peers.queue);
        let vm = Arc::new(TestVm::in_zone("Test Zone"));

        let before = Utc::now();
        let ctx = context(
            "vm_retire",
            json!({}),
            Arc::clone(&vm),
            InvocationOptions::default(),
        );
        let outcome = routine.dispatch(&ctx).await.unwrap();
        let after = Utc::now();

        assert!(recorders.retirement.calls.lock().unwrap().is_empty());
        let puts = recorders.queue.puts.lock().unwrap();
        assert_eq!(puts.len(), 1);
        let work = &puts[0];
        assert_eq!(work.class_name, "Vm");
        assert_eq!(work.method_name, "retire");
        assert_eq!(work.priority, QueuePriority::High);
        assert_eq!(work.zone.as_deref(), Some("Test Zone"));
        assert_eq!(work.role, "automate");

        // args are [[target], {date}], mirroring the synchronous call.
        assert_eq!(work.args[0], json!([vm.id]));
        let date: DateTime<Utc> =
            serde_json::from_value(work.args[1]["date"].clone()).unwrap();
        assert!(date >= before - Duration::days(1));
        assert!(date <= after - Duration::days(1));
        assert!(matches!(outcome, EffectOutcome::Deferred(_)));
    }

    #[test]
    fn test_kind() {
        let (peers, _) = recorders();
        let routine = VmRetireRoutine::new(peers.retirement, peers.queue);
        assert_eq!(routine.kind(), ActionKind::VmRetire);
    }
}
