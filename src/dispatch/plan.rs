//! Dispatch plans

use super::command::CommandDescriptor;
use serde::{Deserialize, Serialize};

/// One step of an ordered batch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchStep {
    /// 1-based order index; the dispatcher must not begin a step before the
    /// previous one completes
    pub order: u32,
    /// Target URI for the step
    pub uri: String,
    /// Command dispatched by the step
    pub body: CommandDescriptor,
}

/// Ordered batch of remote commands with a failure tolerance policy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchPlan {
    /// Steps in dispatch order
    pub steps: Vec<BatchStep>,
    /// Spacing between steps, in seconds
    pub interval_seconds: u64,
    /// Number of failed steps tolerated before the batch aborts
    pub tolerate_size: usize,
}

impl BatchPlan {
    /// Create an empty batch
    pub fn new(interval_seconds: u64, tolerate_size: usize) -> Self {
        Self {
            steps: Vec::new(),
            interval_seconds,
            tolerate_size,
        }
    }

    /// Append a step; order indices are assigned starting at 1
    pub fn push(&mut self, uri: &str, body: CommandDescriptor) {
        let order = self.steps.len() as u32 + 1;
        self.steps.push(BatchStep {
            order,
            uri: uri.to_string(),
            body,
        });
    }

    /// Number of steps in the batch
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether the batch has no steps
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// A dispatchable unit: one command, or ordered steps
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Plan {
    /// A single unordered command
    Single(CommandDescriptor),
    /// Ordered steps with inter-step spacing and failure tolerance
    Ordered(BatchPlan),
}

impl Plan {
    /// Whether the plan is an ordered batch
    pub fn is_ordered(&self) -> bool {
        matches!(self, Plan::Ordered(_))
    }
}
