//! System-wide default constants.
//!
//! Centralises the numeric ranges and defaults used across the registry,
//! monitor, and configuration layers. Grouped by subsystem.

// ============================================================================
// Device Ranges
// ============================================================================

/// Lower bound for demanded bandwidth (Mbps).
pub const USAGE_MIN_MBPS: f64 = 0.0;

/// Upper bound for demanded bandwidth (Mbps).
pub const USAGE_MAX_MBPS: f64 = 1000.0;

/// Lower bound for signal strength (%).
pub const SIGNAL_MIN_PCT: f64 = 50.0;

/// Upper bound for signal strength (%).
pub const SIGNAL_MAX_PCT: f64 = 100.0;

// ============================================================================
// Per-Tick Drift
// ============================================================================

/// Maximum absolute per-tick usage perturbation (Mbps). Draws are uniform
/// in [-50, +50].
pub const USAGE_DRIFT_MBPS: f64 = 50.0;

/// Maximum absolute per-tick signal perturbation (%). Draws are uniform
/// in [-5, +5].
pub const SIGNAL_DRIFT_PCT: f64 = 5.0;

/// Smallest per-tick data-transfer increment (GB).
pub const TRANSFER_DELTA_MIN_GB: f64 = 0.01;

/// Largest per-tick data-transfer increment (GB).
pub const TRANSFER_DELTA_MAX_GB: f64 = 0.1;

/// Probability that a device switches activity on a given tick.
pub const ACTIVITY_CHANGE_PROBABILITY: f64 = 0.1;

// ============================================================================
// Configuration Defaults & Valid Ranges
// ============================================================================

/// Default shared bandwidth budget (Mbps).
pub const DEFAULT_TOTAL_BANDWIDTH_MBPS: f64 = 500.0;

/// Smallest configurable bandwidth budget (Mbps).
pub const TOTAL_BANDWIDTH_MIN_MBPS: f64 = 100.0;

/// Largest configurable bandwidth budget (Mbps).
pub const TOTAL_BANDWIDTH_MAX_MBPS: f64 = 1000.0;

/// Default monitor tick period (seconds).
pub const DEFAULT_TICK_PERIOD_SECS: u64 = 1;

/// Smallest configurable tick period (seconds).
pub const TICK_PERIOD_MIN_SECS: u64 = 1;

/// Largest configurable tick period (seconds).
pub const TICK_PERIOD_MAX_SECS: u64 = 60;

/// Default history retention window (hours).
pub const DEFAULT_RETENTION_WINDOW_HOURS: u64 = 24;

// ============================================================================
// Mock Fleet Generator
// ============================================================================

/// Smallest generated fleet size.
pub const DEFAULT_DEVICE_COUNT_MIN: usize = 8;

/// Largest generated fleet size.
pub const DEFAULT_DEVICE_COUNT_MAX: usize = 15;
