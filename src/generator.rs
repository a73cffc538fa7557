//! Mock Device Generator
//!
//! Stands in for the external device-discovery feed during development and
//! tests. Produces records conforming to the [`Device`](crate::types::Device)
//! schema; the exact randomization is not part of the core contract.

use rand::Rng;

use crate::types::{Activity, Device};

const DEVICE_TYPES: [&str; 8] = [
    "Smartphone",
    "Laptop",
    "Smart TV",
    "Gaming Console",
    "Tablet",
    "Security Camera",
    "Smart Speaker",
    "Desktop PC",
];

const MANUFACTURERS: [&str; 8] = [
    "Apple", "Samsung", "Sony", "Microsoft", "Google", "Amazon", "LG", "Dell",
];

/// Generate `count` devices with randomized but in-range metrics.
///
/// Names follow the "<Manufacturer> <DeviceType>" convention and are not
/// guaranteed unique, matching what a real discovery feed reports.
pub fn mock_devices<R: Rng>(rng: &mut R, count: usize) -> Vec<Device> {
    (0..count)
        .map(|_| {
            let manufacturer = MANUFACTURERS[rng.gen_range(0..MANUFACTURERS.len())];
            let device_type = DEVICE_TYPES[rng.gen_range(0..DEVICE_TYPES.len())];
            let activity = Activity::ALL[rng.gen_range(0..Activity::ALL.len())];

            let mut device = Device::new(
                format!("{manufacturer} {device_type}"),
                rng.gen_range(1.0..=1000.0),
                rng.gen_range(1..=3),
                activity,
                rng.gen_range(50.0..=100.0),
            );
            // Fleets arrive with some accumulated transfer history.
            device.record_transfer(round2(rng.gen_range(0.1..=10.0)));
            device
        })
        .collect()
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_generates_requested_count() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(mock_devices(&mut rng, 12).len(), 12);
        assert!(mock_devices(&mut rng, 0).is_empty());
    }

    #[test]
    fn test_generated_devices_are_in_range() {
        let mut rng = StdRng::seed_from_u64(2);
        for device in mock_devices(&mut rng, 200) {
            assert!((1.0..=1000.0).contains(&device.usage), "{}", device.usage);
            assert!((1..=3).contains(&device.priority));
            assert!((50.0..=100.0).contains(&device.signal_strength));
            assert!((0.1..=10.0).contains(&device.data_transferred));
            assert_eq!(device.adjusted_priority, 0.0);
        }
    }

    #[test]
    fn test_names_are_manufacturer_plus_type() {
        let mut rng = StdRng::seed_from_u64(3);
        for device in mock_devices(&mut rng, 50) {
            let mut parts = device.name.splitn(2, ' ');
            let manufacturer = parts.next().unwrap_or_default();
            let device_type = parts.next().unwrap_or_default();
            assert!(MANUFACTURERS.contains(&manufacturer), "{}", device.name);
            assert!(DEVICE_TYPES.contains(&device_type), "{}", device.name);
        }
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let mut a = StdRng::seed_from_u64(9);
        let mut b = StdRng::seed_from_u64(9);
        let fleet_a = mock_devices(&mut a, 10);
        let fleet_b = mock_devices(&mut b, 10);
        for (x, y) in fleet_a.iter().zip(&fleet_b) {
            assert_eq!(x.name, y.name);
            assert_eq!(x.usage, y.usage);
            assert_eq!(x.activity, y.activity);
        }
    }
}
