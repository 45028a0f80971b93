//! Heating port: the vendor API session and how to open one.

use std::future::Future;

use heatgate_domain::activation::ActivationStatus;
use heatgate_domain::error::HeatGateError;
use heatgate_domain::zone::{WindowState, Zone, ZoneId};

/// An open session against the vendor heating API.
///
/// A freshly connected client is not necessarily usable: callers check
/// [`activation_status`](Self::activation_status) and drive the device
/// handshake with [`activate`](Self::activate) while it is `Pending`.
pub trait HeatingClient: Send + Sync {
    /// Current state of the device-activation handshake.
    fn activation_status(
        &self,
    ) -> impl Future<Output = Result<ActivationStatus, HeatGateError>> + Send;

    /// URL the user must open to approve this device.
    fn verification_url(&self) -> impl Future<Output = Result<String, HeatGateError>> + Send;

    /// Wait until the user approves the device or the request expires.
    ///
    /// Blocks the calling task for as long as the vendor allows.
    fn activate(&self) -> impl Future<Output = Result<(), HeatGateError>> + Send;

    /// All zones of the home, in vendor order.
    fn get_zones(&self) -> impl Future<Output = Result<Vec<Zone>, HeatGateError>> + Send;

    /// Open-window detection state of one zone.
    fn get_window_state(
        &self,
        zone: ZoneId,
    ) -> impl Future<Output = Result<WindowState, HeatGateError>> + Send;

    /// Activate the open-window override, forcing the heater off.
    fn set_open_window(&self, zone: ZoneId)
    -> impl Future<Output = Result<(), HeatGateError>> + Send;

    /// Remove any manual override so the zone follows its schedule again.
    fn cancel_overlay(&self, zone: ZoneId)
    -> impl Future<Output = Result<(), HeatGateError>> + Send;
}

/// Builds [`HeatingClient`]s bound to the persisted token file.
pub trait HeatingConnector: Send + Sync {
    type Client: HeatingClient + 'static;

    /// Whether a refresh token is currently persisted.
    fn has_stored_token(&self) -> bool;

    /// Open a new session, reusing the stored refresh token when possible.
    ///
    /// A permission problem with the token file is reported as
    /// [`HeatGateError::Fatal`]; every other failure is retryable.
    fn connect(&self) -> impl Future<Output = Result<Self::Client, HeatGateError>> + Send;
}
