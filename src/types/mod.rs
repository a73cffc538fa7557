//! Core data types for the bandwidth manager.

mod device;
mod history;

pub use device::{Activity, Allocation, Device};
pub use history::Snapshot;
