//! Cluster service model

use serde::{Deserialize, Serialize};

/// Work status of a cluster service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkStatus {
    /// Service is registered but not yet installed
    Init,
    /// Service is installing
    Installing,
    /// Installation failed
    InstallFailed,
    /// Service is installed and not running
    Installed,
    /// Service is starting
    Starting,
    /// Service is running
    Started,
    /// Service is stopping
    Stopping,
    /// Service is stopped
    Stopped,
    /// Status is unknown
    Unknown,
}

impl WorkStatus {
    /// Whether this status counts as a settled stop.
    ///
    /// `Stopping` is accepted alongside `Installed`: a stop that is still
    /// draining does not count as a failed stop.
    pub fn is_settled_stop(&self) -> bool {
        matches!(self, WorkStatus::Installed | WorkStatus::Stopping)
    }

    /// Whether the service is running
    pub fn is_started(&self) -> bool {
        matches!(self, WorkStatus::Started)
    }

    /// Whether the service is not running
    pub fn is_stopped(&self) -> bool {
        matches!(self, WorkStatus::Installed | WorkStatus::Stopped)
    }
}

impl std::fmt::Display for WorkStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WorkStatus::Init => write!(f, "INIT"),
            WorkStatus::Installing => write!(f, "INSTALLING"),
            WorkStatus::InstallFailed => write!(f, "INSTALL_FAILED"),
            WorkStatus::Installed => write!(f, "INSTALLED"),
            WorkStatus::Starting => write!(f, "STARTING"),
            WorkStatus::Started => write!(f, "STARTED"),
            WorkStatus::Stopping => write!(f, "STOPPING"),
            WorkStatus::Stopped => write!(f, "STOPPED"),
            WorkStatus::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

/// Service kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceKind {
    /// Stateful distributed filesystem; stopping is gated on a recent
    /// metadata checkpoint
    Filesystem,
    /// Cluster resource management and scheduling
    Scheduler,
    /// Interactive query execution
    Query,
    /// Any other managed service
    Generic,
}

/// A managed cluster service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Service {
    /// Service name
    pub name: String,
    /// Human-readable display name
    pub display_name: String,
    /// Service kind
    pub kind: ServiceKind,
    /// Current work status, reported by the backend
    pub work_status: WorkStatus,
    /// Whether any component of the service runs stale configuration
    pub stale_configs: bool,
    /// Whether the service consists of client components only
    pub is_client_only: bool,
}

impl Service {
    /// Create a service with an unknown work status
    pub fn new(name: &str, kind: ServiceKind) -> Self {
        Self {
            name: name.to_string(),
            display_name: name.to_string(),
            kind,
            work_status: WorkStatus::Unknown,
            stale_configs: false,
            is_client_only: false,
        }
    }

    /// Set the work status
    pub fn with_status(mut self, status: WorkStatus) -> Self {
        self.work_status = status;
        self
    }
}
