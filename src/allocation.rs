//! Priority-Weighted Greedy Bandwidth Allocation
//!
//! Pure function from a device set and a budget to an allocation mapping.
//! Each device is ranked by `priority * activity multiplier * signal factor`
//! and the budget is handed out greedily in rank order.
//!
//! The only input mutation is stamping the transient `adjusted_priority`
//! field used for ranking; device order itself is never changed.

use crate::types::{Allocation, Device};

/// Allocate `total_bandwidth` Mbps across `devices`.
///
/// Guarantees:
/// - the sum of allocated values never exceeds the budget,
/// - every value is >= 0,
/// - a negative budget is treated as zero,
/// - identical inputs yield byte-identical output (ties between devices
///   preserve input order via a stable sort).
pub fn allocate(devices: &mut [Device], total_bandwidth: f64) -> Allocation {
    let budget = total_bandwidth.max(0.0);

    for device in devices.iter_mut() {
        device.adjusted_priority = f64::from(device.priority)
            * device.activity.multiplier()
            * (device.signal_strength / 100.0);
    }

    // Rank indices rather than reordering the registry. The sort is stable,
    // so devices tied on both keys keep their input order.
    let mut order: Vec<usize> = (0..devices.len()).collect();
    order.sort_by(|&a, &b| {
        devices[b]
            .adjusted_priority
            .total_cmp(&devices[a].adjusted_priority)
            .then(devices[b].usage.total_cmp(&devices[a].usage))
    });

    let mut allocation = Allocation::new();
    let mut remaining = budget;

    for idx in order {
        let device = &devices[idx];
        let share = if remaining <= 0.0 {
            0.0
        } else {
            (device.usage * device.adjusted_priority).min(remaining)
        };
        remaining -= share;
        allocation.insert(device.name.clone(), round2(share));
    }

    allocation
}

/// Round to 2 decimal places for display stability. Only the stored value is
/// rounded; the running budget is decremented by the exact share.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
