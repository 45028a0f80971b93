//! Shared-secret check on the `X-API-KEY` header.

use std::sync::Arc;

use axum::extract::{FromRef, FromRequestParts};
use axum::http::HeaderMap;
use axum::http::request::Parts;

use heatgate_domain::error::HeatGateError;

use crate::error::ApiError;

/// Header carrying the shared secret.
pub const API_KEY_HEADER: &str = "x-api-key";

/// The configured shared secret.
#[derive(Clone)]
pub struct ApiKey(Arc<str>);

impl ApiKey {
    #[must_use]
    pub fn new(secret: impl Into<Arc<str>>) -> Self {
        Self(secret.into())
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

/// Whether `headers` carry exactly the configured secret.
#[must_use]
pub fn is_authorized(headers: &HeaderMap, secret: &ApiKey) -> bool {
    headers
        .get(API_KEY_HEADER)
        .is_some_and(|value| value.as_bytes() == secret.0.as_bytes())
}

/// Extractor guarding a handler; put it first so nothing else runs for
/// unauthorized requests.
#[derive(Debug, Clone, Copy)]
pub struct RequireApiKey;

impl<S> FromRequestParts<S> for RequireApiKey
where
    ApiKey: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let secret = ApiKey::from_ref(state);
        if is_authorized(&parts.headers, &secret) {
            Ok(Self)
        } else {
            Err(HeatGateError::Forbidden.into())
        }
    }
}
