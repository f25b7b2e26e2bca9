//! Vitals model for the matri maternal risk engine.

pub mod error;
pub mod vitals;

pub use error::*;
pub use vitals::*;
