//! JSON API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod heater;
#[allow(clippy::missing_errors_doc)]
pub mod zones;

use axum::Router;
use axum::routing::{get, put};

use heatgate_app::ports::{ActivityLog, HeatingConnector, Terminator};

use crate::state::AppState;

/// Build the authenticated API routes.
pub fn routes<N, L, T>() -> Router<AppState<N, L, T>>
where
    N: HeatingConnector + 'static,
    L: ActivityLog + 'static,
    T: Terminator + 'static,
{
    Router::new()
        .route("/heater/off", put(heater::off::<N, L, T>))
        .route("/heater/on", put(heater::on::<N, L, T>))
        .route("/zones", get(zones::list::<N, L, T>))
}
