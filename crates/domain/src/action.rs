//! Zone actions: the commands heatgate issues and what it reports back.

use serde::Serialize;

/// A command applied to a single zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoneAction {
    /// Open-window override: the heater is forced off.
    HeaterOff,
    /// Active override cancelled: the zone returns to its schedule.
    HeaterOn,
}

/// Result of a successful zone command.
///
/// `zone` is the name the caller supplied for by-name commands, and the
/// vendor's name when the zone was found by an open-window scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionOutcome {
    pub action: ZoneAction,
    pub zone: String,
}

impl ActionOutcome {
    #[must_use]
    pub fn new(action: ZoneAction, zone: impl Into<String>) -> Self {
        Self {
            action,
            zone: zone.into(),
        }
    }
}
