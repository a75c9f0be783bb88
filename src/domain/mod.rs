//! Domain models for hostwatch
//!
//! Types are validated on construction (fail-fast pattern).

pub mod metric;
pub mod threshold;

pub use metric::{Metric, Usage};
pub use threshold::{breached, Threshold};
