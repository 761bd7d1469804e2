//! Orchestration engine and restart cycle
//!
//! The engine coordinates bulk lifecycle transitions for every service in
//! the cluster: start-all, stop-all, restart of components with stale
//! configuration, and the silent stop-then-start cycle used for a full
//! cluster restart.

pub mod capabilities;
pub mod cycle;
pub mod engine;
pub mod planner;

pub use capabilities::{OperationsIndicator, PreconditionChecker};
pub use cycle::{CycleState, RestartCycle};
pub use engine::{EngineConfig, OrchestrationEngine};
pub use planner::plan_restart_required;
