//! Restart plan construction

use super::engine::EngineConfig;
use crate::cluster::{ComponentRole, ServiceRegistry};
use crate::dispatch::{BatchPlan, CommandDescriptor, Plan};
use crate::error::{Result, SigilError};

/// Build the plan restarting every host component with stale configuration.
///
/// A stale interactive query server means the scheduler queue configuration
/// must be refreshed before the restart: the refresh and the restart then
/// form one ordered batch with zero failure tolerance, so the restart never
/// runs if the refresh fails. Otherwise the restart is dispatched alone.
pub fn plan_restart_required(registry: &ServiceRegistry, config: &EngineConfig) -> Result<Plan> {
    let restart = CommandDescriptor::restart_stale_components();

    let queue_refresh_required = registry
        .find_component(ComponentRole::InteractiveQuery)?
        .map(|component| component.stale_configs)
        .unwrap_or(false);

    if !queue_refresh_required {
        return Ok(Plan::Single(restart));
    }

    let master = registry
        .find_component(ComponentRole::SchedulerMaster)?
        .ok_or_else(|| SigilError::ComponentNotFound("scheduler master".to_string()))?;

    let uri = config.requests_uri();
    let mut batch = BatchPlan::new(config.batch_interval_seconds, 0);
    batch.push(&uri, CommandDescriptor::refresh_scheduler_queues(&master));
    batch.push(&uri, restart);

    Ok(Plan::Ordered(batch))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cluster::{HostComponent, RegistrySnapshot};
    use crate::dispatch::CommandContext;

    fn config() -> EngineConfig {
        EngineConfig::for_cluster("test")
    }

    fn components(interactive_stale: bool) -> Vec<HostComponent> {
        let mut interactive = HostComponent::new(
            "QUERY_SERVER_INTERACTIVE",
            ComponentRole::InteractiveQuery,
            "host-2",
            "query",
        );
        interactive.stale_configs = interactive_stale;

        let master = HostComponent::new(
            "SCHEDULER_MASTER",
            ComponentRole::SchedulerMaster,
            "host-1",
            "scheduler",
        );

        vec![interactive, master]
    }

    fn registry(components: Vec<HostComponent>) -> ServiceRegistry {
        let registry = ServiceRegistry::new();
        registry
            .apply(RegistrySnapshot {
                services: vec![],
                components,
            })
            .unwrap();
        registry
    }

    #[test]
    fn test_single_plan_without_stale_interactive_query() {
        let plan = plan_restart_required(&registry(components(false)), &config()).unwrap();

        match plan {
            Plan::Single(descriptor) => {
                assert_eq!(descriptor.context, CommandContext::RestartAllRequired)
            }
            Plan::Ordered(_) => panic!("expected a single command"),
        }
    }

    #[test]
    fn test_ordered_batch_when_interactive_query_is_stale() {
        let plan = plan_restart_required(&registry(components(true)), &config()).unwrap();

        let batch = match plan {
            Plan::Ordered(batch) => batch,
            Plan::Single(_) => panic!("expected an ordered batch"),
        };

        assert_eq!(batch.len(), 2);
        assert_eq!(batch.tolerate_size, 0);
        assert_eq!(batch.interval_seconds, 1);
        assert_eq!(batch.steps[0].order, 1);
        assert_eq!(
            batch.steps[0].body.context,
            CommandContext::RefreshSchedulerQueues
        );
        assert_eq!(batch.steps[1].order, 2);
        assert_eq!(
            batch.steps[1].body.context,
            CommandContext::RestartAllRequired
        );
        assert_eq!(batch.steps[0].uri, "/api/v1/clusters/test/requests");
    }

    #[test]
    fn test_missing_scheduler_master_is_an_error() {
        let mut stale_only = components(true);
        stale_only.retain(|c| c.role != ComponentRole::SchedulerMaster);

        let result = plan_restart_required(&registry(stale_only), &config());
        assert!(matches!(result, Err(SigilError::ComponentNotFound(_))));
    }
}
