//! Historical snapshot type

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Allocation, Device};

/// One point-in-time record of the registry and its allocation.
///
/// Snapshots are immutable once appended to the history store; the store
/// only ever drops whole entries during retention pruning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    /// When the tick that produced this snapshot completed.
    pub timestamp: DateTime<Utc>,

    /// Copy of every device at tick time, in registry order.
    pub devices: Vec<Device>,

    /// Allocation computed from those devices.
    pub allocation: Allocation,
}

impl Snapshot {
    /// Total bandwidth handed out in this snapshot (Mbps).
    pub fn allocated_total(&self) -> f64 {
        self.allocation.values().sum()
    }

    /// Total bandwidth demanded in this snapshot (Mbps).
    pub fn demanded_total(&self) -> f64 {
        self.devices.iter().map(|d| d.usage).sum()
    }
}
