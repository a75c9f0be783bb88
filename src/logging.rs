//! Persistent status log
//!
//! An append-only sink of `<timestamp> - <LEVEL> - <message>` lines. The log
//! is an ordinary value owned by the monitor rather than process-wide state.
//! Every line is also forwarded to the `log` facade so the console logger
//! shows it.

use chrono::{DateTime, Local};
use std::fmt;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;

/// Log file used when none is given
pub const DEFAULT_LOG_PATH: &str = "system_monitor.log";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S,%3f";

/// Severity of a status line
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    Debug,
    Info,
    Warning,
    Error,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warning => "WARNING",
            Level::Error => "ERROR",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Render one status line (without the trailing newline)
pub fn format_line(timestamp: &DateTime<Local>, level: Level, message: &str) -> String {
    format!(
        "{} - {} - {}",
        timestamp.format(TIMESTAMP_FORMAT),
        level,
        message
    )
}

/// Append-only status log
pub struct StatusLog {
    sink: Box<dyn Write + Send>,
    min_level: Level,
}

impl StatusLog {
    /// Open (or create) a log file for appending
    pub fn open<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path.as_ref())?;
        Ok(Self::new(Box::new(file)))
    }

    /// Log to an arbitrary writer
    pub fn new(sink: Box<dyn Write + Send>) -> Self {
        Self {
            sink,
            min_level: Level::Info,
        }
    }

    /// Change the static minimum level (INFO by default)
    pub fn with_min_level(mut self, level: Level) -> Self {
        self.min_level = level;
        self
    }

    pub fn min_level(&self) -> Level {
        self.min_level
    }

    pub fn debug(&mut self, message: impl AsRef<str>) {
        self.write(Level::Debug, message.as_ref());
    }

    pub fn info(&mut self, message: impl AsRef<str>) {
        self.write(Level::Info, message.as_ref());
    }

    pub fn warning(&mut self, message: impl AsRef<str>) {
        self.write(Level::Warning, message.as_ref());
    }

    pub fn error(&mut self, message: impl AsRef<str>) {
        self.write(Level::Error, message.as_ref());
    }

    /// Write one line at `level`
    ///
    /// A failing sink must not take the monitor down with it, so write errors
    /// are reported on the console and otherwise dropped.
    pub fn write(&mut self, level: Level, message: &str) {
        match level {
            Level::Debug => log::debug!("{}", message),
            Level::Info => log::info!("{}", message),
            Level::Warning => log::warn!("{}", message),
            Level::Error => log::error!("{}", message),
        }

        if level < self.min_level {
            return;
        }

        let line = format_line(&Local::now(), level, message);
        if let Err(e) = writeln!(self.sink, "{}", line).and_then(|_| self.sink.flush()) {
            log::warn!("Failed to write status log: {}", e);
        }
    }
}
