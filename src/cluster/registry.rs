//! Shared read view of known services and host components

use super::component::{ComponentRole, HostComponent};
use super::service::{Service, ServiceKind};
use crate::error::{Result, SigilError};
use std::sync::{Arc, RwLock};

/// Point-in-time cluster view applied by the backend state refresh
#[derive(Debug, Clone, Default)]
pub struct RegistrySnapshot {
    /// Known services
    pub services: Vec<Service>,
    /// Known host components
    pub components: Vec<HostComponent>,
}

/// Registry of known services and their work status.
///
/// Written only through the backend-reported refresh path; the orchestration
/// engine holds a read-only view and reacts to changes.
#[derive(Debug, Clone, Default)]
pub struct ServiceRegistry {
    inner: Arc<RwLock<RegistrySnapshot>>,
}

impl ServiceRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current view with a backend-reported snapshot
    pub fn apply(&self, snapshot: RegistrySnapshot) -> Result<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| SigilError::Lock("Failed to acquire write lock".to_string()))?;

        *inner = snapshot;
        Ok(())
    }

    /// List all known services
    pub fn all_services(&self) -> Result<Vec<Service>> {
        let inner = self
            .inner
            .read()
            .map_err(|_| SigilError::Lock("Failed to acquire read lock".to_string()))?;

        Ok(inner.services.clone())
    }

    /// List all known host components
    pub fn host_components(&self) -> Result<Vec<HostComponent>> {
        let inner = self
            .inner
            .read()
            .map_err(|_| SigilError::Lock("Failed to acquire read lock".to_string()))?;

        Ok(inner.components.clone())
    }

    /// Find the first host component with the given role
    pub fn find_component(&self, role: ComponentRole) -> Result<Option<HostComponent>> {
        let inner = self
            .inner
            .read()
            .map_err(|_| SigilError::Lock("Failed to acquire read lock".to_string()))?;

        Ok(inner
            .components
            .iter()
            .find(|component| component.role == role)
            .cloned())
    }

    /// Whether any service of the given kind is currently started
    pub fn any_kind_started(&self, kind: ServiceKind) -> Result<bool> {
        let inner = self
            .inner
            .read()
            .map_err(|_| SigilError::Lock("Failed to acquire read lock".to_string()))?;

        Ok(inner
            .services
            .iter()
            .any(|service| service.kind == kind && service.work_status.is_started()))
    }

    /// Whether any service is currently started
    pub fn any_started(&self) -> Result<bool> {
        let inner = self
            .inner
            .read()
            .map_err(|_| SigilError::Lock("Failed to acquire read lock".to_string()))?;

        Ok(inner
            .services
            .iter()
            .any(|service| service.work_status.is_started()))
    }

    /// Whether any non-client-only service is currently stopped
    pub fn any_stopped(&self) -> Result<bool> {
        let inner = self
            .inner
            .read()
            .map_err(|_| SigilError::Lock("Failed to acquire read lock".to_string()))?;

        Ok(inner
            .services
            .iter()
            .any(|service| !service.is_client_only && service.work_status.is_stopped()))
    }

    /// Whether any non-client-only service reports stale configuration
    pub fn any_stale(&self) -> Result<bool> {
        let inner = self
            .inner
            .read()
            .map_err(|_| SigilError::Lock("Failed to acquire read lock".to_string()))?;

        Ok(inner
            .services
            .iter()
            .any(|service| !service.is_client_only && service.stale_configs))
    }

    /// Unique display names of services owning components with stale
    /// configuration, in component order
    pub fn stale_service_display_names(&self) -> Result<Vec<String>> {
        let inner = self
            .inner
            .read()
            .map_err(|_| SigilError::Lock("Failed to acquire read lock".to_string()))?;

        let mut names = Vec::new();
        for component in inner.components.iter().filter(|c| c.stale_configs) {
            let display_name = inner
                .services
                .iter()
                .find(|service| service.name == component.service)
                .map(|service| service.display_name.clone())
                .unwrap_or_else(|| component.service.clone());

            if !names.contains(&display_name) {
                names.push(display_name);
            }
        }

        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cluster::service::WorkStatus;

    fn snapshot() -> RegistrySnapshot {
        let mut dfs = Service::new("dfs", ServiceKind::Filesystem).with_status(WorkStatus::Started);
        dfs.display_name = "Distributed FS".to_string();

        let scheduler =
            Service::new("scheduler", ServiceKind::Scheduler).with_status(WorkStatus::Installed);

        let mut clients = Service::new("clients", ServiceKind::Generic);
        clients.is_client_only = true;
        clients.work_status = WorkStatus::Installed;

        let mut master = HostComponent::new(
            "SCHEDULER_MASTER",
            ComponentRole::SchedulerMaster,
            "host-1",
            "scheduler",
        );
        master.stale_configs = true;

        let worker = HostComponent::new("DFS_WORKER", ComponentRole::Worker, "host-2", "dfs");

        RegistrySnapshot {
            services: vec![dfs, scheduler, clients],
            components: vec![master, worker],
        }
    }

    #[test]
    fn test_apply_and_read() {
        let registry = ServiceRegistry::new();
        assert!(registry.all_services().unwrap().is_empty());

        registry.apply(snapshot()).unwrap();
        assert_eq!(registry.all_services().unwrap().len(), 3);
        assert_eq!(registry.host_components().unwrap().len(), 2);
    }

    #[test]
    fn test_status_gates() {
        let registry = ServiceRegistry::new();
        registry.apply(snapshot()).unwrap();

        assert!(registry.any_started().unwrap());
        assert!(registry.any_stopped().unwrap());
        assert!(registry.any_kind_started(ServiceKind::Filesystem).unwrap());
        assert!(!registry.any_kind_started(ServiceKind::Scheduler).unwrap());
    }

    #[test]
    fn test_client_only_services_do_not_enable_operations() {
        let registry = ServiceRegistry::new();
        let mut clients = Service::new("clients", ServiceKind::Generic);
        clients.is_client_only = true;
        clients.work_status = WorkStatus::Installed;
        clients.stale_configs = true;

        registry
            .apply(RegistrySnapshot {
                services: vec![clients],
                components: vec![],
            })
            .unwrap();

        assert!(!registry.any_stopped().unwrap());
        assert!(!registry.any_stale().unwrap());
    }

    #[test]
    fn test_find_component() {
        let registry = ServiceRegistry::new();
        registry.apply(snapshot()).unwrap();

        let master = registry
            .find_component(ComponentRole::SchedulerMaster)
            .unwrap()
            .unwrap();
        assert_eq!(master.host_name, "host-1");

        assert!(registry
            .find_component(ComponentRole::InteractiveQuery)
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_stale_display_names_are_unique_and_resolved() {
        let registry = ServiceRegistry::new();
        let mut view = snapshot();
        let mut second = HostComponent::new(
            "SCHEDULER_WORKER",
            ComponentRole::Worker,
            "host-3",
            "scheduler",
        );
        second.stale_configs = true;
        view.components.push(second);
        registry.apply(view).unwrap();

        assert_eq!(
            registry.stale_service_display_names().unwrap(),
            vec!["scheduler".to_string()]
        );
    }
}
