//! Adapters and the ports they implement.

pub mod content;
pub mod persistence;
pub mod ports;
pub mod settings;
