//! Zone listing handler.

use axum::Json;
use axum::extract::State;
use axum::response::{IntoResponse, Response};

use heatgate_app::ports::{ActivityLog, HeatingConnector, Terminator};

use crate::auth::RequireApiKey;
use crate::error::ApiError;
use crate::state::AppState;

/// Possible responses from the zone listing endpoint.
pub enum ListResponse {
    Ok(Json<Vec<String>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `GET /zones`
pub async fn list<N, L, T>(
    _: RequireApiKey,
    State(state): State<AppState<N, L, T>>,
) -> Result<ListResponse, ApiError>
where
    N: HeatingConnector + 'static,
    L: ActivityLog + 'static,
    T: Terminator + 'static,
{
    let client = state.activation.ensure_client().await?;
    let names = state.zones.list_zone_names(client.as_ref()).await?;
    Ok(ListResponse::Ok(Json(names)))
}
