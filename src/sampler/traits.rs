//! Trait definitions for metric sampling
//!
//! These traits abstract over the host OS to enable testing with mocks.

use crate::domain::{Metric, Usage};
use crate::error::SampleError;

/// A source of one utilization reading per call
///
/// Samplers report only the current value and keep no history.
pub trait Sampler: Send {
    /// Which metric this sampler reads
    fn metric(&self) -> Metric;

    /// Take one reading
    ///
    /// May block; the CPU sampler waits for its observation window.
    fn sample(&mut self) -> Result<Usage, SampleError>;
}
