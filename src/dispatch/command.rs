//! Remote command descriptors

use crate::cluster::{HostComponent, WorkStatus};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Operation context tag recorded with each backend request.
///
/// The backend treats requests idempotently per context, so the same tag is
/// reused for every request of a given operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommandContext {
    /// Start every service in the cluster
    StartAllServices,
    /// Stop every service in the cluster
    StopAllServices,
    /// Restart every host component running stale configuration
    RestartAllRequired,
    /// Refresh the scheduler queue configuration
    RefreshSchedulerQueues,
}

impl CommandContext {
    /// Context string sent to the backend
    pub fn as_str(&self) -> &'static str {
        match self {
            CommandContext::StartAllServices => "Start all services",
            CommandContext::StopAllServices => "Stop all services",
            CommandContext::RestartAllRequired => "Restart all required services",
            CommandContext::RefreshSchedulerQueues => "Refresh scheduler queues",
        }
    }
}

impl std::fmt::Display for CommandContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single remote command ready for dispatch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandDescriptor {
    /// Operation context tag
    pub context: CommandContext,
    /// Wire payload forwarded verbatim by the dispatcher
    pub body: Value,
}

impl CommandDescriptor {
    /// Bulk transition setting every service's desired state
    pub fn set_all_services_state(state: WorkStatus) -> Self {
        let context = if state == WorkStatus::Installed {
            CommandContext::StopAllServices
        } else {
            CommandContext::StartAllServices
        };

        Self {
            context,
            body: json!({
                "ServiceInfo": {
                    "state": state.to_string()
                }
            }),
        }
    }

    /// Restart every host component running stale configuration
    pub fn restart_stale_components() -> Self {
        Self {
            context: CommandContext::RestartAllRequired,
            body: json!({
                "RequestInfo": {
                    "command": "RESTART",
                    "context": CommandContext::RestartAllRequired.as_str(),
                    "operation_level": "host_component"
                },
                "Requests/resource_filters": [
                    {
                        "hosts_predicate": "HostRoles/stale_configs=true"
                    }
                ]
            }),
        }
    }

    /// Refresh the scheduler queue configuration on the scheduler master host
    pub fn refresh_scheduler_queues(master: &HostComponent) -> Self {
        Self {
            context: CommandContext::RefreshSchedulerQueues,
            body: json!({
                "RequestInfo": {
                    "command": "REFRESHQUEUES",
                    "context": CommandContext::RefreshSchedulerQueues.as_str(),
                    "parameters/forceRefreshConfigTags": "scheduler-queues"
                },
                "Requests/resource_filters": [
                    {
                        "service_name": master.service,
                        "component_name": master.component_name,
                        "hosts": master.host_name
                    }
                ]
            }),
        }
    }
}
