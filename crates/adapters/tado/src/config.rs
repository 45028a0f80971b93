//! tado integration configuration.

use std::path::PathBuf;

use serde::Deserialize;

/// Public OAuth client id of the tado web app, used for the device flow.
pub const DEFAULT_CLIENT_ID: &str = "1bb50063-6b0c-4d11-bd99-387f4a91cc46";

/// Configuration for the tado integration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TadoConfig {
    /// Where the refresh token is persisted between restarts.
    pub token_file: PathBuf,
    /// Base URL of the OAuth2 endpoints (`device_authorize`, `token`).
    pub auth_url: String,
    /// Base URL of the REST API (`/me`, `/homes/...`).
    pub api_url: String,
    /// OAuth client identifier.
    pub client_id: String,
    /// Per-request timeout in seconds. `None` keeps the HTTP client default.
    pub request_timeout_secs: Option<u64>,
}

impl Default for TadoConfig {
    fn default() -> Self {
        Self {
            token_file: PathBuf::from("/tado_token/token"),
            auth_url: "https://login.tado.com/oauth2".to_string(),
            api_url: "https://my.tado.com/api/v2".to_string(),
            client_id: DEFAULT_CLIENT_ID.to_string(),
            request_timeout_secs: None,
        }
    }
}
