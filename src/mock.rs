//! Mock implementations for testing
//!
//! Provides a scripted sampler, a recording notifier and an in-memory log
//! sink for unit testing without real hardware or a mail relay.

use crate::alerts::{Alert, Notifier};
use crate::domain::{Metric, Usage};
use crate::error::{NotifyError, SampleError};
use crate::sampler::Sampler;

use std::collections::VecDeque;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

/// Sampler that replays a fixed script of readings
///
/// `None` in the script produces a sampling error. Once the script runs out
/// the last reading repeats.
#[derive(Debug)]
pub struct ScriptedSampler {
    metric: Metric,
    script: VecDeque<Option<f64>>,
    last: Option<f64>,
    calls: Arc<Mutex<usize>>,
}

impl ScriptedSampler {
    pub fn new(metric: Metric, script: impl IntoIterator<Item = Option<f64>>) -> Self {
        Self {
            metric,
            script: script.into_iter().collect(),
            last: Some(0.0),
            calls: Arc::new(Mutex::new(0)),
        }
    }

    /// Sampler that always reads `value`
    pub fn constant(metric: Metric, value: f64) -> Self {
        Self::new(metric, [Some(value)])
    }

    /// Shared counter of `sample` calls, readable after the sampler is boxed
    pub fn call_counter(&self) -> Arc<Mutex<usize>> {
        Arc::clone(&self.calls)
    }
}

impl Sampler for ScriptedSampler {
    fn metric(&self) -> Metric {
        self.metric
    }

    fn sample(&mut self) -> Result<Usage, SampleError> {
        *self.calls.lock().unwrap() += 1;

        let step = match self.script.pop_front() {
            Some(step) => {
                self.last = step;
                step
            }
            None => self.last,
        };

        step.map(Usage::new).ok_or_else(|| {
            SampleError::Unavailable(format!("scripted {} failure", self.metric.name()))
        })
    }
}

/// Notifier that records alert messages instead of sending them
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    sent: Arc<Mutex<Vec<String>>>,
    attempts: Arc<Mutex<usize>>,
    fail: bool,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Notifier whose every send fails with a transport error
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Messages delivered so far
    pub fn sent(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }

    /// Number of notify calls, including failed ones
    pub fn attempts(&self) -> usize {
        *self.attempts.lock().unwrap()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, alert: &Alert) -> Result<(), NotifyError> {
        *self.attempts.lock().unwrap() += 1;

        if self.fail {
            return Err(NotifyError::Transport(
                "connection refused (mock)".to_string(),
            ));
        }

        self.sent.lock().unwrap().push(alert.message());
        Ok(())
    }

    fn name(&self) -> &str {
        "recording"
    }
}

/// Cloneable in-memory writer
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, split into lines
    pub fn lines(&self) -> Vec<String> {
        let bytes = self.bytes.lock().unwrap();
        String::from_utf8_lossy(&bytes)
            .lines()
            .map(str::to_string)
            .collect()
    }

    /// Lines tagged with `level` (e.g. "WARNING")
    pub fn lines_at(&self, level: &str) -> Vec<String> {
        let tag = format!(" - {} - ", level);
        self.lines()
            .into_iter()
            .filter(|line| line.contains(&tag))
            .collect()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.bytes.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_sampler_replays_then_repeats() {
        let mut sampler = ScriptedSampler::new(Metric::Cpu, [Some(10.0), None, Some(30.0)]);
        let calls = sampler.call_counter();

        assert_eq!(sampler.sample().unwrap().as_percent(), 10.0);
        assert!(sampler.sample().is_err());
        assert_eq!(sampler.sample().unwrap().as_percent(), 30.0);
        assert_eq!(sampler.sample().unwrap().as_percent(), 30.0);
        assert_eq!(*calls.lock().unwrap(), 4);
    }

    #[test]
    fn test_shared_buffer_lines_at() {
        let mut buffer = SharedBuffer::new();
        writeln!(buffer, "t - INFO - a").unwrap();
        writeln!(buffer, "t - WARNING - b").unwrap();
        assert_eq!(buffer.lines_at("WARNING"), vec!["t - WARNING - b".to_string()]);
    }
}
