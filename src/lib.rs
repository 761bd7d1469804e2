//! Sigil - cluster service lifecycle orchestration
//!
//! Sigil coordinates bulk state transitions for the services of a managed
//! cluster. It provides:
//!
//! - Start-all and stop-all of cluster services as single logical operations
//! - Safety preconditions ahead of destructive stops
//! - Restart of every host component running stale configuration, with
//!   dependent sub-operations sequenced in a fixed order
//! - A silent stop-then-start cycle for a full cluster restart
//!
//! The engine is embedded programmatically: operator confirmation, indicator
//! rendering and the command transport are supplied by the host application.

pub mod cluster;
pub mod dispatch;
pub mod error;
pub mod logging;
pub mod ops;
pub mod orchestrator;

pub use error::{Result, SigilError};
