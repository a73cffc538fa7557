//! Device Registry: the shared mutable state of a monitoring session.
//!
//! Wrapped in `Arc<RwLock<_>>` for access across the async runtime: the
//! monitor task is the only writer, display/consumer code takes read locks
//! and never observes a partially-updated device record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::types::{Allocation, Device};

/// Shared handle to the registry.
pub type SharedRegistry = Arc<RwLock<NetworkState>>;

/// Wrap an initial device set in a shared registry handle.
pub fn shared(devices: Vec<Device>) -> SharedRegistry {
    Arc::new(RwLock::new(NetworkState::new(devices)))
}

/// Current state of the monitored network.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkState {
    /// Every tracked device with its live metrics.
    pub devices: Vec<Device>,

    /// Allocation computed on the most recent tick (empty before the first).
    pub latest_allocation: Allocation,

    /// Ticks completed since the session started.
    pub ticks_completed: u64,

    /// When the most recent tick completed.
    pub last_tick_time: Option<DateTime<Utc>>,

    /// When the monitor loop was first started, if ever.
    pub started_at: Option<DateTime<Utc>>,

    /// Monitor lifecycle status.
    pub status: MonitorStatus,
}

impl NetworkState {
    /// Create a session state around an initial device set.
    pub fn new(devices: Vec<Device>) -> Self {
        Self {
            devices,
            latest_allocation: Allocation::new(),
            ticks_completed: 0,
            last_tick_time: None,
            started_at: None,
            status: MonitorStatus::Idle,
        }
    }

    /// Consistent copy of `(devices, allocation)` for display code.
    pub fn snapshot(&self) -> (Vec<Device>, Allocation) {
        (self.devices.clone(), self.latest_allocation.clone())
    }

    /// Total demanded bandwidth across all devices (Mbps).
    pub fn total_usage(&self) -> f64 {
        self.devices.iter().map(|d| d.usage).sum()
    }

    /// Number of devices currently demanding any bandwidth.
    pub fn active_devices(&self) -> usize {
        self.devices.iter().filter(|d| d.usage > 0.0).count()
    }
}

/// Monitor lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MonitorStatus {
    /// No monitor loop is active.
    Idle,
    /// The monitor loop is ticking.
    Running,
}

impl std::fmt::Display for MonitorStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MonitorStatus::Idle => write!(f, "Idle"),
            MonitorStatus::Running => write!(f, "Running"),
        }
    }
}
