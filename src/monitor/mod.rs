//! Real-Time Monitor Loop
//!
//! A periodic actor that owns all writes to the registry and history store.
//! Each tick it perturbs every device's live metrics, recomputes the
//! bandwidth allocation, and appends a snapshot to history.
//!
//! `start`/`stop` are idempotent and safe to call from any task. Exactly one
//! loop may be active per registry; a duplicate `start` is a logged no-op.
//! `stop` cancels via a [`CancellationToken`] observed inside the tick
//! `select!`, then joins the task, so no mutation happens after it returns.

mod clock;
mod drift;

pub use clock::{Clock, ManualClock, SystemClock};
pub use drift::{DriftSource, UniformDrift};

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::allocation;
use crate::config::NetworkConfig;
use crate::history::HistoryStore;
use crate::registry::{MonitorStatus, SharedRegistry};
use crate::types::{Allocation, Device, Snapshot};

/// Handle to a monitor loop bound to one registry + history store pair.
pub struct Monitor {
    registry: SharedRegistry,
    history: HistoryStore,
    total_bandwidth: f64,
    tick_period: Duration,
    clock: Arc<dyn Clock>,
    drift: Arc<Mutex<Box<dyn DriftSource>>>,
    /// Single-instance guard: holds the active loop's token and join handle.
    active: Mutex<Option<ActiveLoop>>,
}

struct ActiveLoop {
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

impl Monitor {
    /// Build a monitor with production time and randomness sources.
    pub fn new(registry: SharedRegistry, history: HistoryStore, config: &NetworkConfig) -> Self {
        Self::with_parts(
            registry,
            history,
            config,
            Box::new(UniformDrift::from_entropy()),
            Arc::new(SystemClock),
        )
    }

    /// Build a monitor with injected drift and clock (tests, replay).
    pub fn with_parts(
        registry: SharedRegistry,
        history: HistoryStore,
        config: &NetworkConfig,
        drift: Box<dyn DriftSource>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            registry,
            history,
            total_bandwidth: config.network.total_bandwidth_mbps,
            tick_period: config.tick_period(),
            clock,
            drift: Arc::new(Mutex::new(drift)),
            active: Mutex::new(None),
        }
    }

    /// Start the tick loop. No-op (logged) if already running.
    pub async fn start(&self) {
        let mut active = self.active.lock().await;
        if let Some(existing) = active.as_ref() {
            if !existing.handle.is_finished() {
                warn!("Monitor already running, ignoring duplicate start");
                return;
            }
        }

        let cancel = CancellationToken::new();
        let handle = tokio::spawn(run_loop(
            self.registry.clone(),
            self.history.clone(),
            self.drift.clone(),
            self.clock.clone(),
            self.total_bandwidth,
            self.tick_period,
            cancel.clone(),
        ));
        {
            let mut state = self.registry.write().await;
            state.status = MonitorStatus::Running;
            if state.started_at.is_none() {
                state.started_at = Some(self.clock.now());
            }
        }
        *active = Some(ActiveLoop { cancel, handle });

        info!(
            tick_period_secs = self.tick_period.as_secs(),
            total_bandwidth_mbps = self.total_bandwidth,
            "Monitor started"
        );
    }

    /// Stop the tick loop and wait for it to exit. No-op if already stopped.
    ///
    /// After this returns, the loop has performed its last mutation.
    pub async fn stop(&self) {
        let mut active = self.active.lock().await;
        match active.take() {
            Some(running) => {
                running.cancel.cancel();
                if let Err(e) = running.handle.await {
                    warn!(error = %e, "Monitor task did not shut down cleanly");
                }
                self.registry.write().await.status = MonitorStatus::Idle;
                info!("Monitor stopped");
            }
            None => {
                debug!("Stop requested but monitor is not running");
            }
        }
    }

    /// Whether a loop is currently active.
    pub async fn is_running(&self) -> bool {
        self.active
            .lock()
            .await
            .as_ref()
            .is_some_and(|running| !running.handle.is_finished())
    }

    /// Consistent `(devices, allocation)` snapshot for display code.
    pub async fn current_state(&self) -> (Vec<Device>, Allocation) {
        self.registry.read().await.snapshot()
    }

    /// Clone of the history store handle for consumers.
    pub fn history(&self) -> HistoryStore {
        self.history.clone()
    }
}

/// The tick loop body. Runs until cancellation.
async fn run_loop(
    registry: SharedRegistry,
    history: HistoryStore,
    drift: Arc<Mutex<Box<dyn DriftSource>>>,
    clock: Arc<dyn Clock>,
    total_bandwidth: f64,
    tick_period: Duration,
    cancel: CancellationToken,
) {
    let mut interval = tokio::time::interval(tick_period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                debug!("Cancellation observed, exiting tick loop");
                break;
            }
            _ = interval.tick() => {}
        }

        run_tick(&registry, &history, &drift, clock.as_ref(), total_bandwidth).await;
    }
}

/// One tick: drift every device, re-allocate, record a snapshot.
async fn run_tick(
    registry: &SharedRegistry,
    history: &HistoryStore,
    drift: &Mutex<Box<dyn DriftSource>>,
    clock: &dyn Clock,
    total_bandwidth: f64,
) {
    let now = clock.now();

    let snapshot = {
        let mut drift = drift.lock().await;
        let mut state = registry.write().await;

        for device in &mut state.devices {
            device.apply_usage_delta(drift.usage_delta());
            device.apply_signal_delta(drift.signal_delta());
            device.record_transfer(drift.transfer_delta());
            if let Some(activity) = drift.activity_change() {
                device.activity = activity;
            }
        }

        let allocation = allocation::allocate(&mut state.devices, total_bandwidth);
        state.latest_allocation = allocation.clone();
        state.ticks_completed += 1;
        state.last_tick_time = Some(now);

        debug!(
            tick = state.ticks_completed,
            devices = state.devices.len(),
            total_usage_mbps = state.total_usage(),
            allocated_mbps = allocation.values().sum::<f64>(),
            "Tick complete"
        );

        Snapshot {
            timestamp: now,
            devices: state.devices.clone(),
            allocation,
        }
    };

    // Registry lock is released before touching history; append prunes the
    // retention window itself.
    history.append(snapshot).await;
}
