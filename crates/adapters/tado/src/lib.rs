//! # heatgate-adapter-tado
//!
//! tado° adapter: implements the heating ports against the tado cloud API.
//!
//! ## Responsibilities
//! - Run the OAuth2 device-code flow and report its progress as an
//!   [`ActivationStatus`](heatgate_domain::activation::ActivationStatus)
//! - Persist the rotating refresh token to the configured token file
//! - Keep the short-lived access token fresh
//! - List zones, read open-window detection, set the open-window override
//!   and cancel overlays on the first home of the account
//!
//! ## Dependency rule
//! Depends on `heatgate-app` (port traits) and `heatgate-domain` only.

mod auth;
mod client;
mod config;
mod error;
mod token;

use std::time::Duration;

use heatgate_app::ports::HeatingConnector;
use heatgate_domain::error::HeatGateError;

pub use client::TadoClient;
pub use config::{DEFAULT_CLIENT_ID, TadoConfig};
pub use error::TadoError;

use auth::AuthClient;
use token::TokenStore;

/// Creates [`TadoClient`] sessions bound to one token file.
pub struct TadoConnector {
    http: reqwest::Client,
    config: TadoConfig,
    store: TokenStore,
}

impl TadoConnector {
    /// Build a connector and its shared HTTP client.
    ///
    /// # Errors
    ///
    /// Returns [`TadoError::Http`] if the HTTP client cannot be initialised
    /// (e.g. the TLS backend fails to load).
    pub fn new(config: TadoConfig) -> Result<Self, TadoError> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder.build()?;
        let store = TokenStore::new(config.token_file.clone());
        Ok(Self {
            http,
            config,
            store,
        })
    }

    #[must_use]
    pub fn config(&self) -> &TadoConfig {
        &self.config
    }
}

impl HeatingConnector for TadoConnector {
    type Client = TadoClient;

    fn has_stored_token(&self) -> bool {
        self.store.exists()
    }

    async fn connect(&self) -> Result<TadoClient, HeatGateError> {
        let auth = AuthClient::new(
            self.http.clone(),
            &self.config.auth_url,
            &self.config.client_id,
        );
        tracing::debug!(token_file = %self.store.path().display(), "connecting to tado");
        TadoClient::connect(
            self.http.clone(),
            auth,
            &self.config.api_url,
            self.store.clone(),
        )
        .await
        .map_err(TadoError::into_domain)
    }
}
