//! External capabilities consumed by the engine

use async_trait::async_trait;

/// Safety gate consulted before a destructive bulk stop.
///
/// For a stateful filesystem service the check verifies the last metadata
/// checkpoint is recent enough to stop without data-loss risk.
/// `check_safe_to_stop` resolves only once stopping is safe; the engine
/// defers dispatch behind it instead of failing the request.
#[async_trait]
pub trait PreconditionChecker: Send + Sync {
    /// Resolve once stopping is safe
    async fn check_safe_to_stop(&self);
}

/// Presentation hook for the background-operations indicator.
///
/// Called after each successful dispatch; whether anything is actually
/// shown is up to the host application and the operator's settings.
#[async_trait]
pub trait OperationsIndicator: Send + Sync {
    /// Surface the indicator if the operator has it enabled
    async fn surface(&self);
}
