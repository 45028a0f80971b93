//! Zone service: resolves zones and turns their heaters off or on.

use heatgate_domain::action::{ActionOutcome, ZoneAction};
use heatgate_domain::error::{HeatGateError, NotFoundError};
use heatgate_domain::zone::{Zone, find_by_name};

use crate::ports::{ActivityLog, HeatingClient};

/// Application service for zone commands.
///
/// Stateless apart from the activity log: the vendor session is passed in
/// per call, so callers decide how it was obtained.
pub struct ZoneService<L> {
    log: L,
}

impl<L: ActivityLog> ZoneService<L> {
    /// Create a new service writing actions to `log`.
    pub fn new(log: L) -> Self {
        Self { log }
    }

    /// Force the heater of the zone called `zone_name` off.
    ///
    /// The name is matched case-insensitively; the outcome carries the name
    /// as the caller spelled it.
    ///
    /// # Errors
    ///
    /// Returns [`NotFoundError::Zone`] when no zone matches, or a vendor
    /// error from the client.
    #[tracing::instrument(skip(self, client))]
    pub async fn turn_off_zone<C: HeatingClient>(
        &self,
        client: &C,
        zone_name: &str,
    ) -> Result<ActionOutcome, HeatGateError> {
        let zone = Self::resolve(client, zone_name).await?;
        client.set_open_window(zone.id).await?;
        self.log
            .record(&format!("{}: set to Open Window (heater off).", zone.name));
        Ok(ActionOutcome::new(ZoneAction::HeaterOff, zone_name))
    }

    /// Force the heater off in the first zone that reports an open window.
    ///
    /// Zones are scanned in vendor order. A zone whose state cannot be read
    /// or whose override fails is logged and skipped.
    ///
    /// # Errors
    ///
    /// Returns [`NotFoundError::NoOpenWindow`] when the scan finds nothing,
    /// or a vendor error if the zone list itself cannot be fetched.
    #[tracing::instrument(skip(self, client))]
    pub async fn turn_off_detected<C: HeatingClient>(
        &self,
        client: &C,
    ) -> Result<ActionOutcome, HeatGateError> {
        for zone in client.get_zones().await? {
            match Self::override_if_open(client, &zone).await {
                Ok(true) => {
                    self.log
                        .record(&format!("{}: detected open window, heater off.", zone.name));
                    return Ok(ActionOutcome::new(ZoneAction::HeaterOff, zone.name));
                }
                Ok(false) => {}
                Err(err) => {
                    tracing::warn!(zone = %zone.name, error = %err.describe(), "zone check failed");
                    self.log.record(&format!(
                        "Error checking zone {}: {}",
                        zone.name,
                        err.describe()
                    ));
                }
            }
        }
        Err(NotFoundError::NoOpenWindow.into())
    }

    /// Cancel the active override of the zone called `zone_name`, handing
    /// it back to its schedule.
    ///
    /// # Errors
    ///
    /// Returns [`NotFoundError::Zone`] when no zone matches, or a vendor
    /// error from the client.
    #[tracing::instrument(skip(self, client))]
    pub async fn turn_on_zone<C: HeatingClient>(
        &self,
        client: &C,
        zone_name: &str,
    ) -> Result<ActionOutcome, HeatGateError> {
        let zone = Self::resolve(client, zone_name).await?;
        client.cancel_overlay(zone.id).await?;
        self.log
            .record(&format!("{}: overlay cancelled (heater on).", zone.name));
        Ok(ActionOutcome::new(ZoneAction::HeaterOn, zone_name))
    }

    /// Names of all zones, in vendor order.
    ///
    /// # Errors
    ///
    /// Returns a vendor error from the client.
    pub async fn list_zone_names<C: HeatingClient>(
        &self,
        client: &C,
    ) -> Result<Vec<String>, HeatGateError> {
        let zones = client.get_zones().await?;
        Ok(zones.into_iter().map(|zone| zone.name).collect())
    }

    async fn resolve<C: HeatingClient>(client: &C, zone_name: &str) -> Result<Zone, HeatGateError> {
        let zones = client.get_zones().await?;
        find_by_name(&zones, zone_name)
            .cloned()
            .ok_or_else(|| NotFoundError::Zone(zone_name.to_string()).into())
    }

    async fn override_if_open<C: HeatingClient>(
        client: &C,
        zone: &Zone,
    ) -> Result<bool, HeatGateError> {
        if !client.get_window_state(zone.id).await?.open_window_detected {
            return Ok(false);
        }
        client.set_open_window(zone.id).await?;
        Ok(true)
    }
}
