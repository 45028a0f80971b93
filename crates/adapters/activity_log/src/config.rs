//! Activity log configuration.

use std::path::PathBuf;

use serde::Deserialize;

/// Configuration for the file activity log.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ActivityLogConfig {
    /// File the lines are appended to.
    pub path: PathBuf,
    /// Also write every line to stdout.
    pub stdout: bool,
}

impl Default for ActivityLogConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("/l.log"),
            stdout: true,
        }
    }
}
