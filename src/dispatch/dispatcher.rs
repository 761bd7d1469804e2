//! Command dispatcher seam

use super::plan::Plan;
use crate::error::Result;
use async_trait::async_trait;
use serde_json::Value;

/// Accepts plans for execution by the command backend.
///
/// Implementations forward the plan and resolve once the backend has
/// accepted or rejected it. For an ordered batch with `tolerate_size = 0`
/// the backend must not begin a step before the previous one completes;
/// that ordering contract belongs to the dispatcher and is not re-validated
/// by callers.
#[async_trait]
pub trait CommandDispatcher: Send + Sync {
    /// Dispatch a plan and resolve with the backend response payload
    async fn send(&self, plan: Plan) -> Result<Value>;
}
