//! Metric kinds and sampled usage values

use std::fmt;

/// The host resources the agent watches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    Cpu,
    Memory,
    Disk,
}

impl Metric {
    /// Name used inside sentences ("High memory usage")
    pub fn name(&self) -> &'static str {
        match self {
            Metric::Cpu => "CPU",
            Metric::Memory => "memory",
            Metric::Disk => "disk",
        }
    }

    /// Name used as a label ("Memory: 41.0%")
    pub fn label(&self) -> &'static str {
        match self {
            Metric::Cpu => "CPU",
            Metric::Memory => "Memory",
            Metric::Disk => "Disk",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A single utilization reading, in percent
///
/// Readings come straight from OS counters and are clamped to 0-100 so that
/// rounding noise never produces values outside the range.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Usage(f64);

impl Usage {
    /// Create a reading, clamping into 0-100
    pub fn new(percent: f64) -> Self {
        if percent.is_nan() {
            return Self(0.0);
        }
        Self(percent.clamp(0.0, 100.0))
    }

    /// Create a reading from a used/total pair
    ///
    /// Returns `None` when `total` is zero.
    pub fn from_ratio(used: u64, total: u64) -> Option<Self> {
        if total == 0 {
            return None;
        }
        Some(Self::new(used as f64 / total as f64 * 100.0))
    }

    #[inline]
    pub fn as_percent(&self) -> f64 {
        self.0
    }
}

impl fmt::Display for Usage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}%", self.0)
    }
}
