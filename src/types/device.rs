//! Device and allocation types

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::config::defaults::{SIGNAL_MAX_PCT, SIGNAL_MIN_PCT, USAGE_MAX_MBPS, USAGE_MIN_MBPS};

/// Bandwidth allocation: device name -> allocated Mbps.
///
/// A `BTreeMap` keeps iteration and serialization order deterministic, so two
/// allocation passes over identical inputs produce byte-identical output.
pub type Allocation = BTreeMap<String, f64>;

/// What a device is currently doing on the network.
///
/// The activity determines the multiplier applied on top of the device's base
/// priority during allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Activity {
    Streaming,
    Gaming,
    #[serde(rename = "Web Browsing")]
    WebBrowsing,
    #[serde(rename = "Video Call")]
    VideoCall,
    Download,
    Upload,
    #[serde(rename = "IoT Communication")]
    IoTCommunication,
}

impl Activity {
    /// Every activity, for uniform reassignment draws.
    pub const ALL: [Activity; 7] = [
        Activity::Streaming,
        Activity::Gaming,
        Activity::WebBrowsing,
        Activity::VideoCall,
        Activity::Download,
        Activity::Upload,
        Activity::IoTCommunication,
    ];

    /// Priority multiplier for this activity.
    ///
    /// Latency-sensitive activities (video calls, gaming) rank above bulk
    /// transfers; background IoT chatter ranks below everything else.
    pub fn multiplier(self) -> f64 {
        match self {
            Activity::VideoCall => 1.5,
            Activity::Gaming => 1.3,
            Activity::Streaming => 1.2,
            Activity::Download | Activity::Upload => 1.0,
            Activity::WebBrowsing => 0.8,
            Activity::IoTCommunication => 0.5,
        }
    }
}

impl std::fmt::Display for Activity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Activity::Streaming => write!(f, "Streaming"),
            Activity::Gaming => write!(f, "Gaming"),
            Activity::WebBrowsing => write!(f, "Web Browsing"),
            Activity::VideoCall => write!(f, "Video Call"),
            Activity::Download => write!(f, "Download"),
            Activity::Upload => write!(f, "Upload"),
            Activity::IoTCommunication => write!(f, "IoT Communication"),
        }
    }
}

/// One network client tracked by the registry.
///
/// All numeric mutations go through the clamping methods below, which keep
/// `usage` and `signal_strength` inside their declared ranges and
/// `data_transferred` non-decreasing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Device {
    /// Display identity. Also the allocation key (not guaranteed unique;
    /// duplicate names are last-writer-wins in the allocation map).
    pub name: String,

    /// Currently demanded bandwidth (Mbps), held in [0, 1000].
    pub usage: f64,

    /// Base priority, 1..=3 (3 = highest).
    pub priority: u8,

    /// Current activity, drives the allocation multiplier.
    pub activity: Activity,

    /// Signal strength (%), held in [50, 100].
    pub signal_strength: f64,

    /// Cumulative data transferred (GB). Never decreases.
    pub data_transferred: f64,

    /// Derived rank weight. Recomputed by every allocation pass; not
    /// meaningful between passes.
    #[serde(default)]
    pub adjusted_priority: f64,
}

impl Device {
    /// Create a device with fields clamped into their declared ranges.
    pub fn new(
        name: impl Into<String>,
        usage: f64,
        priority: u8,
        activity: Activity,
        signal_strength: f64,
    ) -> Self {
        Self {
            name: name.into(),
            usage: usage.clamp(USAGE_MIN_MBPS, USAGE_MAX_MBPS),
            priority: priority.clamp(1, 3),
            activity,
            signal_strength: signal_strength.clamp(SIGNAL_MIN_PCT, SIGNAL_MAX_PCT),
            data_transferred: 0.0,
            adjusted_priority: 0.0,
        }
    }

    /// Shift demanded bandwidth by `delta` Mbps, clamped to [0, 1000].
    pub fn apply_usage_delta(&mut self, delta: f64) {
        self.usage = (self.usage + delta).clamp(USAGE_MIN_MBPS, USAGE_MAX_MBPS);
    }

    /// Shift signal strength by `delta` percentage points, clamped to [50, 100].
    pub fn apply_signal_delta(&mut self, delta: f64) {
        self.signal_strength = (self.signal_strength + delta).clamp(SIGNAL_MIN_PCT, SIGNAL_MAX_PCT);
    }

    /// Add transferred data. Negative increments are ignored so the counter
    /// never moves backwards.
    pub fn record_transfer(&mut self, gigabytes: f64) {
        if gigabytes > 0.0 {
            self.data_transferred += gigabytes;
        }
    }
}
