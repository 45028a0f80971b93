//! Heater on/off handlers.

use axum::Json;
use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use heatgate_app::ports::{ActivityLog, HeatingConnector, Terminator};
use heatgate_domain::action::{ActionOutcome, ZoneAction};
use heatgate_domain::error::{HeatGateError, ValidationError};

use crate::auth::RequireApiKey;
use crate::error::ApiError;
use crate::state::AppState;

/// `?zone=<name>`; an empty value counts as absent.
#[derive(Debug, Deserialize)]
pub struct ZoneQuery {
    pub zone: Option<String>,
}

impl ZoneQuery {
    fn zone(self) -> Option<String> {
        self.zone.filter(|zone| !zone.is_empty())
    }
}

/// Body of a successful heater command.
#[derive(Debug, Serialize)]
pub struct ActionBody {
    pub status: &'static str,
    pub action: ZoneAction,
    pub zone: String,
}

impl From<ActionOutcome> for ActionBody {
    fn from(outcome: ActionOutcome) -> Self {
        Self {
            status: "ok",
            action: outcome.action,
            zone: outcome.zone,
        }
    }
}

/// Possible responses from the heater endpoints.
pub enum HeaterResponse {
    Ok(Json<ActionBody>),
}

impl IntoResponse for HeaterResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `PUT /heater/off`
pub async fn off<N, L, T>(
    _: RequireApiKey,
    State(state): State<AppState<N, L, T>>,
    Query(query): Query<ZoneQuery>,
) -> Result<HeaterResponse, ApiError>
where
    N: HeatingConnector + 'static,
    L: ActivityLog + 'static,
    T: Terminator + 'static,
{
    let client = state.activation.ensure_client().await?;
    let outcome = match query.zone() {
        Some(zone) => state.zones.turn_off_zone(client.as_ref(), &zone).await?,
        None => state.zones.turn_off_detected(client.as_ref()).await?,
    };
    Ok(HeaterResponse::Ok(Json(outcome.into())))
}

/// `PUT /heater/on`
pub async fn on<N, L, T>(
    _: RequireApiKey,
    State(state): State<AppState<N, L, T>>,
    Query(query): Query<ZoneQuery>,
) -> Result<HeaterResponse, ApiError>
where
    N: HeatingConnector + 'static,
    L: ActivityLog + 'static,
    T: Terminator + 'static,
{
    let zone = query
        .zone
        .ok_or(HeatGateError::Validation(ValidationError::MissingZone))?;
    let client = state.activation.ensure_client().await?;
    let outcome = state.zones.turn_on_zone(client.as_ref(), &zone).await?;
    Ok(HeaterResponse::Ok(Json(outcome.into())))
}
