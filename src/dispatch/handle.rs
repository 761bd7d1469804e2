//! Pending operation handles

use super::command::CommandContext;
use crate::cluster::WorkStatus;
use chrono::{DateTime, Utc};
use tokio::sync::watch;
use uuid::Uuid;

/// Final outcome of a dispatched request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeStatus {
    /// Dispatch has not resolved yet
    Pending,
    /// The backend accepted the request
    Success,
    /// Dispatch failed; the request is terminal and is not retried
    Fail,
}

/// Handle representing one pending operation.
///
/// The engine marks the handle when the dispatcher resolves; callers only
/// observe it. Failures never surface anywhere else.
#[derive(Debug, Clone)]
pub struct TransitionHandle {
    /// Request id
    pub request_id: Uuid,
    /// Operation context tag
    pub context: CommandContext,
    /// Target desired state, for bulk transitions
    pub desired_state: Option<WorkStatus>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    status: watch::Receiver<OutcomeStatus>,
}

impl TransitionHandle {
    /// Create a handle and its engine-side marker
    pub fn new(context: CommandContext, desired_state: Option<WorkStatus>) -> (Self, OutcomeMarker) {
        let (tx, rx) = watch::channel(OutcomeStatus::Pending);

        let handle = Self {
            request_id: Uuid::new_v4(),
            context,
            desired_state,
            created_at: Utc::now(),
            status: rx,
        };

        (handle, OutcomeMarker { tx })
    }

    /// Current outcome status
    pub fn status(&self) -> OutcomeStatus {
        *self.status.borrow()
    }

    /// Wait until the handle resolves
    pub async fn resolved(&mut self) -> OutcomeStatus {
        while *self.status.borrow() == OutcomeStatus::Pending {
            if self.status.changed().await.is_err() {
                break;
            }
        }
        *self.status.borrow()
    }
}

/// Engine-side writer for a handle's outcome
#[derive(Debug)]
pub struct OutcomeMarker {
    tx: watch::Sender<OutcomeStatus>,
}

impl OutcomeMarker {
    /// Mark the request successful
    pub fn succeed(&self) {
        let _ = self.tx.send(OutcomeStatus::Success);
    }

    /// Mark the request failed
    pub fn fail(&self) {
        let _ = self.tx.send(OutcomeStatus::Fail);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_marker_resolves_handle() {
        let (mut handle, marker) = TransitionHandle::new(
            CommandContext::StopAllServices,
            Some(WorkStatus::Installed),
        );
        assert_eq!(handle.status(), OutcomeStatus::Pending);

        marker.succeed();
        assert_eq!(handle.resolved().await, OutcomeStatus::Success);
    }

    #[tokio::test]
    async fn test_failure_is_terminal() {
        let (mut handle, marker) =
            TransitionHandle::new(CommandContext::RestartAllRequired, None);

        marker.fail();
        assert_eq!(handle.resolved().await, OutcomeStatus::Fail);
        assert_eq!(handle.status(), OutcomeStatus::Fail);
    }
}
