//! Cluster service model
//!
//! This module provides the data model for managed cluster services and
//! their per-host components, plus the shared registry through which the
//! backend state refresh publishes the current view.

pub mod component;
pub mod registry;
pub mod service;

pub use component::{ComponentRole, HostComponent};
pub use registry::{RegistrySnapshot, ServiceRegistry};
pub use service::{Service, ServiceKind, WorkStatus};
