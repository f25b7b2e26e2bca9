//! Patient registration for antenatal visits.

pub mod patient;

pub use patient::*;
