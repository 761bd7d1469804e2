//! Silent stop-then-start restart cycle

use crate::cluster::Service;

/// State of the restart cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleState {
    /// No restart in progress
    Idle,
    /// Silent stop-all dispatched, awaiting its resolution
    StoppingAll,
    /// Stop accepted; waiting for in-flight operations to drain and for the
    /// dwell timer
    AwaitingStartEligibility,
    /// Start-all dispatched; a fresh restart request is required to re-enter
    StartingAll,
}

/// Stop-then-start state machine for a full cluster restart.
///
/// Fields are mutated only by the cycle's own transition methods, invoked
/// with the engine's cycle lock held. Re-evaluating a transition that has
/// already fired is a no-op.
#[derive(Debug)]
pub struct RestartCycle {
    state: CycleState,
    start_eligible: bool,
}

impl RestartCycle {
    /// Create an idle cycle
    pub fn new() -> Self {
        Self {
            state: CycleState::Idle,
            start_eligible: false,
        }
    }

    /// Current state
    pub fn state(&self) -> CycleState {
        self.state
    }

    /// Whether the dwell timer has raised start eligibility
    pub fn start_eligible(&self) -> bool {
        self.start_eligible
    }

    /// Begin a new cycle. Returns `false` while a cycle is mid-flight.
    pub fn begin(&mut self) -> bool {
        match self.state {
            CycleState::Idle | CycleState::StartingAll => {
                self.state = CycleState::StoppingAll;
                self.start_eligible = false;
                true
            }
            CycleState::StoppingAll | CycleState::AwaitingStartEligibility => false,
        }
    }

    /// Record the outcome of the silent stop dispatch
    pub fn stop_dispatched(&mut self, success: bool) {
        if self.state == CycleState::StoppingAll {
            self.state = if success {
                CycleState::AwaitingStartEligibility
            } else {
                CycleState::Idle
            };
        }
    }

    /// Raise the eligibility flag armed by the dwell timer
    pub fn mark_start_eligible(&mut self) {
        if self.state == CycleState::AwaitingStartEligibility {
            self.start_eligible = true;
        }
    }

    /// Attempt the stop-to-start transition.
    ///
    /// Fires only when the in-flight count is zero, eligibility is raised,
    /// and every service ended the stop phase in a settled-stop status.
    /// Clears eligibility on firing, so the transition fires at most once
    /// per cycle.
    pub fn try_advance(&mut self, in_flight: usize, services: &[Service]) -> bool {
        if self.state != CycleState::AwaitingStartEligibility {
            return false;
        }
        if in_flight != 0 || !self.start_eligible {
            return false;
        }
        if stop_phase_failed(services) {
            return false;
        }

        self.start_eligible = false;
        self.state = CycleState::StartingAll;
        true
    }
}

impl Default for RestartCycle {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether any service ended the stop phase outside `INSTALLED`/`STOPPING`
pub fn stop_phase_failed(services: &[Service]) -> bool {
    services
        .iter()
        .any(|service| !service.work_status.is_settled_stop())
}
