//! Activation status of a vendor session (device-code pairing).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Where the device-activation handshake currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivationStatus {
    NotStarted,
    /// Waiting for the user to open the verification URL.
    Pending,
    Completed,
    /// Expired, rejected, or any state the vendor reports that we don't know.
    Failed,
}

impl ActivationStatus {
    /// Only a completed session can issue zone commands.
    #[must_use]
    pub const fn is_ready(self) -> bool {
        matches!(self, Self::Completed)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotStarted => "NOT_STARTED",
            Self::Pending => "PENDING",
            Self::Completed => "COMPLETED",
            Self::Failed => "FAILED",
        }
    }
}

impl fmt::Display for ActivationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActivationStatus {
    type Err = std::convert::Infallible;

    /// Unknown values collapse into [`ActivationStatus::Failed`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_ascii_uppercase().as_str() {
            "NOT_STARTED" => Self::NotStarted,
            "PENDING" => Self::Pending,
            "COMPLETED" => Self::Completed,
            _ => Self::Failed,
        })
    }
}
