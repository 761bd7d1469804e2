//! Host component model

use serde::{Deserialize, Serialize};

/// Role a component plays within its service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentRole {
    /// Master coordinating the cluster scheduler queues
    SchedulerMaster,
    /// Interactive query server whose restart depends on the scheduler
    /// queue configuration
    InteractiveQuery,
    /// Regular worker component
    Worker,
    /// Client-only component
    Client,
}

/// An instance of a service role running on a specific cluster host
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostComponent {
    /// Component name
    pub component_name: String,
    /// Component role
    pub role: ComponentRole,
    /// Host the component runs on
    pub host_name: String,
    /// Owning service name
    pub service: String,
    /// Whether the deployed configuration differs from the latest approved one
    pub stale_configs: bool,
}

impl HostComponent {
    /// Create a host component with fresh configuration
    pub fn new(component_name: &str, role: ComponentRole, host_name: &str, service: &str) -> Self {
        Self {
            component_name: component_name.to_string(),
            role,
            host_name: host_name.to_string(),
            service: service.to_string(),
            stale_configs: false,
        }
    }
}
