//! Bandwatch: Smart Home Network Bandwidth Manager Core
//!
//! Monitors a fixed pool of network clients and repeatedly re-partitions a
//! shared bandwidth budget among them by priority and activity type.
//!
//! ## Architecture
//!
//! - **Allocation Engine**: pure priority-weighted greedy allocation
//! - **Device Registry**: the only mutable shared state, `Arc<RwLock<_>>`
//! - **Monitor**: periodic actor that drifts device metrics and re-allocates
//! - **History Store**: append-only snapshot log with rolling retention
//!
//! The dashboard/presentation layer is an external collaborator: it supplies
//! an initial device set and a budget, and reads the registry and history.

pub mod allocation;
pub mod config;
pub mod generator;
pub mod history;
pub mod monitor;
pub mod registry;
pub mod types;

// Re-export configuration
pub use config::NetworkConfig;

// Re-export commonly used types
pub use types::{Activity, Allocation, Device, Snapshot};

// Re-export the engine entry point
pub use allocation::allocate;

// Re-export shared state
pub use registry::{MonitorStatus, NetworkState, SharedRegistry};

// Re-export monitor components
pub use monitor::{Clock, DriftSource, ManualClock, Monitor, SystemClock, UniformDrift};

// Re-export history
pub use history::{HistoryStats, HistoryStore};
