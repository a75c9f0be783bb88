//! Host metric sampling layer
//!
//! Provides the [`Sampler`] abstraction and its sysinfo-backed implementations.

mod host;
mod traits;

pub use host::{CpuSampler, DiskSampler, MemorySampler};
pub use traits::Sampler;
