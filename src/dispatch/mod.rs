//! Remote command dispatch
//!
//! Commands are described as plans (a single descriptor or an ordered
//! batch) and handed to an external dispatcher; each request's outcome is
//! observed through a handle.

pub mod command;
pub mod dispatcher;
pub mod handle;
pub mod plan;

pub use command::{CommandContext, CommandDescriptor};
pub use dispatcher::CommandDispatcher;
pub use handle::{OutcomeMarker, OutcomeStatus, TransitionHandle};
pub use plan::{BatchPlan, BatchStep, Plan};
