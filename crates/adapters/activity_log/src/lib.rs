//! # heatgate-adapter-activity-log
//!
//! File-backed implementation of the [`ActivityLog`] port.
//!
//! Every record becomes one line, `DD-MM-YYYY HH:MM:SS # <message>` in local
//! time, which is appended to the configured file and written to stdout.
//!
//! The file is opened, appended and closed on every record; no handle is
//! kept between calls. Any failure (missing directory, read-only file,
//! closed stdout) drops the line silently.
//!
//! ## Dependency rule
//!
//! Depends on `heatgate-app` (port traits) only.

mod config;

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, TimeZone};
use heatgate_app::ports::ActivityLog;

pub use config::ActivityLogConfig;

const TIMESTAMP_FORMAT: &str = "%d-%m-%Y %H:%M:%S";

/// Activity log writing to a file and to stdout.
#[derive(Debug, Clone)]
pub struct FileActivityLog {
    path: PathBuf,
    mirror_stdout: bool,
}

impl FileActivityLog {
    pub fn new(config: &ActivityLogConfig) -> Self {
        Self {
            path: config.path.clone(),
            mirror_stdout: config.stdout,
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn append(&self, line: &str) -> std::io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(line.as_bytes())
    }

    fn echo(line: &str) -> std::io::Result<()> {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(line.as_bytes())?;
        stdout.flush()
    }
}

impl ActivityLog for FileActivityLog {
    fn record(&self, message: &str) {
        let line = format_line(&Local::now(), message);
        let _ = self.append(&line);
        if self.mirror_stdout {
            let _ = Self::echo(&line);
        }
    }
}

/// Render one log line, newline included.
pub fn format_line<Tz>(at: &DateTime<Tz>, message: &str) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    format!("{} # {message}\n", at.format(TIMESTAMP_FORMAT))
}
