//! Predictive-signal providers.
//!
//! A provider turns a vitals reading into a probability in `[0, 1]`. The risk
//! engine treats the probability as an optional extra input: a provider that is
//! missing, slow or broken never prevents an assessment from being produced.

pub mod error;
pub mod linear;
pub mod provider;

pub use error::SignalError;
pub use linear::{features, LinearSignal, FEATURE_COUNT};
#[cfg(any(test, feature = "mock"))]
pub use provider::MockPredictiveSignal;
pub use provider::{observe, PredictiveSignal, SignalOutcome, StubSignal};
