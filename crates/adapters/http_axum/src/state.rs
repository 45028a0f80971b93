//! Shared application state for axum handlers.

use std::sync::Arc;

use axum::extract::FromRef;

use heatgate_app::ports::{ActivityLog, HeatingConnector, Terminator};
use heatgate_app::services::activation_service::ActivationService;
use heatgate_app::services::zone_service::ZoneService;

use crate::auth::ApiKey;

/// Application state shared across all axum handlers.
///
/// Generic over the connector, activity log and terminator to avoid dynamic
/// dispatch. `Clone` is implemented manually so the underlying types
/// themselves do not need to be `Clone`; only the `Arc` wrappers are cloned.
pub struct AppState<N: HeatingConnector, L, T> {
    /// Owner of the vendor session.
    pub activation: Arc<ActivationService<N, L, T>>,
    /// Zone commands.
    pub zones: Arc<ZoneService<L>>,
    /// Shared secret expected in `X-API-KEY`.
    pub api_key: ApiKey,
}

impl<N: HeatingConnector, L, T> Clone for AppState<N, L, T> {
    fn clone(&self) -> Self {
        Self {
            activation: Arc::clone(&self.activation),
            zones: Arc::clone(&self.zones),
            api_key: self.api_key.clone(),
        }
    }
}

impl<N: HeatingConnector, L, T> FromRef<AppState<N, L, T>> for ApiKey {
    fn from_ref(state: &AppState<N, L, T>) -> Self {
        state.api_key.clone()
    }
}

impl<N, L, T> AppState<N, L, T>
where
    N: HeatingConnector + 'static,
    L: ActivityLog + 'static,
    T: Terminator + 'static,
{
    /// Create a new application state from service instances.
    pub fn new(
        activation: ActivationService<N, L, T>,
        zones: ZoneService<L>,
        api_key: ApiKey,
    ) -> Self {
        Self::from_arcs(Arc::new(activation), Arc::new(zones), api_key)
    }

    /// Create a new application state from pre-wrapped `Arc` services.
    ///
    /// Use this when the activation service is shared with the startup
    /// warm-up task before constructing the HTTP state.
    pub fn from_arcs(
        activation: Arc<ActivationService<N, L, T>>,
        zones: Arc<ZoneService<L>>,
        api_key: ApiKey,
    ) -> Self {
        Self {
            activation,
            zones,
            api_key,
        }
    }
}
