//! Zone: a heating-controlled room as reported by the vendor API.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Vendor-assigned zone identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ZoneId(u32);

impl ZoneId {
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ZoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A heating zone. Read-only from heatgate's point of view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    pub id: ZoneId,
    pub name: String,
    /// Vendor zone type (`HEATING`, `HOT_WATER`, …) when reported.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl Zone {
    #[must_use]
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id: ZoneId::new(id),
            name: name.into(),
            kind: None,
        }
    }

    /// Case-insensitive comparison against a caller-supplied zone name.
    #[must_use]
    pub fn matches_name(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }
}

/// Return the first zone whose name matches `name`, in the given order.
#[must_use]
pub fn find_by_name<'a>(zones: &'a [Zone], name: &str) -> Option<&'a Zone> {
    zones.iter().find(|zone| zone.matches_name(name))
}

/// Open-window detection state of a single zone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowState {
    #[serde(rename = "openWindowDetected", default)]
    pub open_window_detected: bool,
}

impl WindowState {
    #[must_use]
    pub const fn detected() -> Self {
        Self {
            open_window_detected: true,
        }
    }

    #[must_use]
    pub const fn closed() -> Self {
        Self {
            open_window_detected: false,
        }
    }
}
