//! Bulk transition orchestration

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::Notify;
use tracing::{debug, info, warn};

use super::capabilities::{OperationsIndicator, PreconditionChecker};
use super::cycle::{stop_phase_failed, CycleState, RestartCycle};
use super::planner;
use crate::cluster::{ServiceKind, ServiceRegistry, WorkStatus};
use crate::dispatch::{
    CommandContext, CommandDescriptor, CommandDispatcher, OutcomeMarker, Plan, TransitionHandle,
};
use crate::error::{Result, SigilError};
use crate::ops::OperationLedger;

/// Engine configuration
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Backend API prefix
    pub api_prefix: String,
    /// Cluster name targeted by batch step URIs
    pub cluster_name: String,
    /// Dwell between the silent stop and start eligibility
    pub bg_update_interval: Duration,
    /// Spacing between ordered batch steps, in seconds
    pub batch_interval_seconds: u64,
}

impl EngineConfig {
    /// Configuration for the named cluster with default timings
    pub fn for_cluster(cluster_name: &str) -> Self {
        Self {
            api_prefix: "/api/v1".to_string(),
            cluster_name: cluster_name.to_string(),
            bg_update_interval: Duration::from_secs(6),
            batch_interval_seconds: 1,
        }
    }

    /// URI accepting new requests for the cluster
    pub fn requests_uri(&self) -> String {
        format!("{}/clusters/{}/requests", self.api_prefix, self.cluster_name)
    }
}

/// Result of one restart-cycle evaluation
enum CycleEvaluation {
    /// The stop-to-start transition fired
    Fired,
    /// Conditions not met yet; keep watching
    Parked,
    /// The cycle is no longer awaiting; stop watching
    Done,
}

/// Cluster-wide service lifecycle orchestration engine.
///
/// Coordinates bulk state transitions (start-all, stop-all,
/// restart-all-required) as single logical operations and drives the silent
/// stop-then-start restart cycle. The engine only reads cluster state; it
/// never mutates the registry or the operation ledger. Failures stay local:
/// requests that are currently no-ops return `None`, dispatch failures are
/// reported through the returned handle.
#[derive(Clone)]
pub struct OrchestrationEngine {
    registry: ServiceRegistry,
    ledger: OperationLedger,
    dispatcher: Arc<dyn CommandDispatcher>,
    checker: Arc<dyn PreconditionChecker>,
    indicator: Arc<dyn OperationsIndicator>,
    config: EngineConfig,
    cycle: Arc<Mutex<RestartCycle>>,
    cycle_wakeup: Arc<Notify>,
}

impl OrchestrationEngine {
    /// Create an engine over the given cluster view and collaborators
    pub fn new(
        registry: ServiceRegistry,
        ledger: OperationLedger,
        dispatcher: Arc<dyn CommandDispatcher>,
        checker: Arc<dyn PreconditionChecker>,
        indicator: Arc<dyn OperationsIndicator>,
        config: EngineConfig,
    ) -> Self {
        Self {
            registry,
            ledger,
            dispatcher,
            checker,
            indicator,
            config,
            cycle: Arc::new(Mutex::new(RestartCycle::new())),
            cycle_wakeup: Arc::new(Notify::new()),
        }
    }

    /// Engine configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Current restart cycle state
    pub fn cycle_state(&self) -> Result<CycleState> {
        self.with_cycle(|cycle| cycle.state())
    }

    /// Display names of services that currently require a restart
    pub fn stale_service_display_names(&self) -> Result<Vec<String>> {
        self.registry.stale_service_display_names()
    }

    /// Request a bulk transition of every service to `desired`.
    ///
    /// `confirmation_granted` records that the caller already obtained
    /// operator confirmation; the engine never prompts. Returns `None` when
    /// the request is currently a no-op: confirmation missing, an
    /// unsupported target state, operations already in flight, or a cluster
    /// that already satisfies the transition. A stop while a filesystem
    /// service is running is deferred behind the checkpoint safety check;
    /// the handle resolves once the deferred dispatch does.
    pub fn request_transition(
        &self,
        desired: WorkStatus,
        confirmation_granted: bool,
    ) -> Option<TransitionHandle> {
        if !confirmation_granted {
            debug!(state = %desired, "bulk transition without confirmation ignored");
            return None;
        }
        if !matches!(desired, WorkStatus::Started | WorkStatus::Installed) {
            debug!(state = %desired, "unsupported bulk transition target");
            return None;
        }
        if self.ledger.in_flight() != 0 {
            debug!("bulk transition unavailable while operations are in flight");
            return None;
        }

        let available = match desired {
            WorkStatus::Started => self.registry.any_stopped(),
            _ => self.registry.any_started(),
        };
        match available {
            Ok(true) => {}
            Ok(false) => {
                debug!(state = %desired, "bulk transition already satisfied");
                return None;
            }
            Err(err) => {
                warn!(error = %err, "registry read failed");
                return None;
            }
        }

        let gated = if desired == WorkStatus::Installed {
            match self.registry.any_kind_started(ServiceKind::Filesystem) {
                Ok(gated) => gated,
                Err(err) => {
                    warn!(error = %err, "registry read failed");
                    return None;
                }
            }
        } else {
            false
        };

        let descriptor = CommandDescriptor::set_all_services_state(desired);
        let (handle, marker) = TransitionHandle::new(descriptor.context, Some(desired));

        info!(
            context = descriptor.context.as_str(),
            state = %desired,
            gated,
            "bulk transition requested"
        );
        self.spawn_dispatch(Plan::Single(descriptor), marker, gated);

        Some(handle)
    }

    /// Restart every host component running stale configuration.
    ///
    /// Returns `None` when no non-client-only service reports stale
    /// configuration. When the interactive query server is itself stale,
    /// the scheduler queues are refreshed first as step 1 of an ordered
    /// batch and the restart runs as step 2.
    pub fn request_restart_required(&self) -> Option<TransitionHandle> {
        match self.registry.any_stale() {
            Ok(true) => {}
            Ok(false) => {
                debug!("no stale configuration; restart not required");
                return None;
            }
            Err(err) => {
                warn!(error = %err, "registry read failed");
                return None;
            }
        }

        let plan = match planner::plan_restart_required(&self.registry, &self.config) {
            Ok(plan) => plan,
            Err(err) => {
                warn!(error = %err, "restart planning failed");
                return None;
            }
        };

        let (handle, marker) = TransitionHandle::new(CommandContext::RestartAllRequired, None);

        info!(ordered = plan.is_ordered(), "restart of stale components requested");
        self.spawn_dispatch(plan, marker, false);

        Some(handle)
    }

    /// Restart every service: a silent stop-all, a dwell for the stop to
    /// settle, then a start-all once all in-flight operations have drained.
    ///
    /// No confirmation and no checkpoint gate apply on this path. The start
    /// phase is withheld if any service ends the stop phase outside
    /// `INSTALLED`/`STOPPING`, leaving the cluster stopped. Returns a handle
    /// for the stop phase, or `None` while a cycle is already mid-flight.
    pub fn restart_all_services(&self) -> Option<TransitionHandle> {
        let begun = match self.with_cycle(|cycle| cycle.begin()) {
            Ok(begun) => begun,
            Err(err) => {
                warn!(error = %err, "restart cycle unavailable");
                return None;
            }
        };
        if !begun {
            debug!("restart cycle already in progress");
            return None;
        }

        let descriptor = CommandDescriptor::set_all_services_state(WorkStatus::Installed);
        let (handle, marker) = TransitionHandle::new(descriptor.context, Some(WorkStatus::Installed));

        info!("restart cycle: silent stop of all services");

        let engine = self.clone();
        tokio::spawn(async move {
            match engine.dispatcher.send(Plan::Single(descriptor)).await {
                Ok(_) => {
                    let _ = engine.with_cycle(|cycle| cycle.stop_dispatched(true));
                    engine.indicator.surface().await;
                    engine.arm_start_eligibility();
                    engine.spawn_cycle_watcher();
                    marker.succeed();
                }
                Err(err) => {
                    warn!(error = %err, "restart cycle stop dispatch failed");
                    let _ = engine.with_cycle(|cycle| cycle.stop_dispatched(false));
                    marker.fail();
                }
            }
        });

        Some(handle)
    }

    /// Dispatch a plan on a background task, optionally deferred behind the
    /// stop-safety check, and mark the handle from the outcome
    fn spawn_dispatch(&self, plan: Plan, marker: OutcomeMarker, gated: bool) {
        let dispatcher = self.dispatcher.clone();
        let checker = self.checker.clone();
        let indicator = self.indicator.clone();

        tokio::spawn(async move {
            if gated {
                checker.check_safe_to_stop().await;
            }

            match dispatcher.send(plan).await {
                Ok(_) => {
                    marker.succeed();
                    indicator.surface().await;
                }
                Err(err) => {
                    warn!(error = %err, "dispatch failed");
                    marker.fail();
                }
            }
        });
    }

    /// Arm the dwell timer that raises start eligibility
    fn arm_start_eligibility(&self) {
        let engine = self.clone();

        tokio::spawn(async move {
            tokio::time::sleep(engine.config.bg_update_interval).await;
            if engine
                .with_cycle(|cycle| cycle.mark_start_eligible())
                .is_ok()
            {
                engine.cycle_wakeup.notify_one();
            }
        });
    }

    /// Watch the ledger and the eligibility flag, funneling every change
    /// into one idempotent evaluation of the stop-to-start transition
    fn spawn_cycle_watcher(&self) {
        let engine = self.clone();
        let mut ledger_rx = self.ledger.subscribe();

        tokio::spawn(async move {
            loop {
                match engine.evaluate_cycle() {
                    CycleEvaluation::Fired => {
                        engine.dispatch_cycle_start().await;
                        break;
                    }
                    CycleEvaluation::Parked => {}
                    CycleEvaluation::Done => break,
                }

                tokio::select! {
                    changed = ledger_rx.changed() => {
                        if changed.is_err() {
                            break;
                        }
                    }
                    _ = engine.cycle_wakeup.notified() => {}
                }
            }
        });
    }

    /// Evaluate the stop-to-start transition once
    fn evaluate_cycle(&self) -> CycleEvaluation {
        let services = match self.registry.all_services() {
            Ok(services) => services,
            Err(err) => {
                warn!(error = %err, "registry read failed during cycle evaluation");
                return CycleEvaluation::Parked;
            }
        };
        let in_flight = self.ledger.in_flight();

        let evaluation = self.with_cycle(|cycle| {
            if cycle.state() != CycleState::AwaitingStartEligibility {
                return CycleEvaluation::Done;
            }
            if in_flight == 0 && cycle.start_eligible() && stop_phase_failed(&services) {
                warn!("restart cycle: stop phase left services running; start withheld");
            }
            if cycle.try_advance(in_flight, &services) {
                CycleEvaluation::Fired
            } else {
                CycleEvaluation::Parked
            }
        });

        match evaluation {
            Ok(evaluation) => evaluation,
            Err(err) => {
                warn!(error = %err, "cycle state unavailable");
                CycleEvaluation::Done
            }
        }
    }

    /// Dispatch the silent start-all that completes the restart cycle
    async fn dispatch_cycle_start(&self) {
        let descriptor = CommandDescriptor::set_all_services_state(WorkStatus::Started);

        info!("restart cycle: silent start of all services");
        match self.dispatcher.send(Plan::Single(descriptor)).await {
            Ok(_) => {
                self.indicator.surface().await;
            }
            Err(err) => {
                warn!(error = %err, "restart cycle start dispatch failed");
            }
        }
    }

    fn with_cycle<T>(&self, f: impl FnOnce(&mut RestartCycle) -> T) -> Result<T> {
        let mut cycle = self
            .cycle
            .lock()
            .map_err(|_| SigilError::Lock("Failed to acquire cycle lock".to_string()))?;

        Ok(f(&mut cycle))
    }
}
