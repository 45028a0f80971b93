//! tado session: activation state, access token, zone endpoints.

use std::time::Duration;

use heatgate_app::ports::HeatingClient;
use heatgate_domain::activation::ActivationStatus;
use heatgate_domain::error::HeatGateError;
use heatgate_domain::zone::{WindowState, Zone, ZoneId};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;
use tokio::time::Instant;

use crate::auth::{AuthClient, DeviceAuthorization, Poll, TokenGrant, check};
use crate::error::TadoError;
use crate::token::TokenStore;

/// Refresh the access token this long before it actually expires.
const EXPIRY_MARGIN: Duration = Duration::from_secs(30);

/// Extra delay the vendor asks for on `slow_down`.
const SLOW_DOWN_STEP: Duration = Duration::from_secs(5);

#[derive(Debug, Clone)]
struct Tokens {
    access_token: String,
    refresh_token: String,
    expires_at: Instant,
}

impl Tokens {
    fn from_grant(grant: TokenGrant) -> Self {
        Self {
            access_token: grant.access_token,
            refresh_token: grant.refresh_token,
            expires_at: Instant::now() + Duration::from_secs(grant.expires_in),
        }
    }

    fn is_fresh(&self) -> bool {
        Instant::now() + EXPIRY_MARGIN < self.expires_at
    }
}

#[derive(Debug)]
struct Session {
    status: ActivationStatus,
    device: Option<DeviceAuthorization>,
    tokens: Option<Tokens>,
    home_id: Option<u64>,
}

#[derive(Deserialize)]
struct Me {
    #[serde(default)]
    homes: Vec<HomeRef>,
}

#[derive(Deserialize)]
struct HomeRef {
    id: u64,
}

/// An authenticated (or authenticating) session against the tado API.
pub struct TadoClient {
    http: reqwest::Client,
    auth: AuthClient,
    api_url: String,
    store: TokenStore,
    session: Mutex<Session>,
}

impl TadoClient {
    /// Open a session, reusing the stored refresh token when it is still
    /// accepted and starting a device authorization otherwise.
    pub(crate) async fn connect(
        http: reqwest::Client,
        auth: AuthClient,
        api_url: &str,
        store: TokenStore,
    ) -> Result<Self, TadoError> {
        let client = Self {
            http,
            auth,
            api_url: api_url.trim_end_matches('/').to_string(),
            store,
            session: Mutex::new(Session {
                status: ActivationStatus::NotStarted,
                device: None,
                tokens: None,
                home_id: None,
            }),
        };

        if let Some(refresh_token) = client.store.load().await? {
            match client.auth.refresh(&refresh_token).await {
                Ok(grant) => {
                    client.complete(grant).await?;
                    return Ok(client);
                }
                Err(TadoError::Status { status, .. }) if (400..500).contains(&status) => {
                    tracing::warn!(status, "stored refresh token rejected, starting device flow");
                }
                Err(err) => return Err(err),
            }
        }

        let device = client.auth.authorize_device().await?;
        let mut session = client.session.lock().await;
        session.status = ActivationStatus::Pending;
        session.device = Some(device);
        drop(session);
        Ok(client)
    }

    /// Store a fresh grant, resolve the home, mark the session completed.
    async fn complete(&self, grant: TokenGrant) -> Result<(), TadoError> {
        self.store.save(&grant.refresh_token).await?;
        let tokens = Tokens::from_grant(grant);
        let me: Me = self.fetch_json(&format!("{}/me", self.api_url), &tokens.access_token).await?;
        let home_id = me.homes.first().map(|home| home.id).ok_or(TadoError::NoHome)?;

        let mut session = self.session.lock().await;
        session.tokens = Some(tokens);
        session.home_id = Some(home_id);
        session.device = None;
        session.status = ActivationStatus::Completed;
        tracing::info!(home_id, "tado session ready");
        Ok(())
    }

    async fn poll_until_approved(&self, device: DeviceAuthorization) -> Result<(), TadoError> {
        let deadline = Instant::now() + Duration::from_secs(device.expires_in);
        let mut interval = Duration::from_secs(device.interval);
        tracing::info!(user_code = %device.user_code, "waiting for device approval");

        while Instant::now() < deadline {
            tokio::time::sleep(interval).await;
            match self.auth.poll_device_token(&device.device_code).await? {
                Poll::Granted(grant) => return self.complete(grant).await,
                Poll::Pending => {}
                Poll::SlowDown => interval += SLOW_DOWN_STEP,
                Poll::Rejected(reason) => {
                    tracing::warn!(%reason, "device authorization rejected");
                    break;
                }
            }
        }

        tracing::warn!("device authorization did not complete");
        self.session.lock().await.status = ActivationStatus::Failed;
        Ok(())
    }

    /// Current access token and home, refreshing the token when it is
    /// about to expire.
    async fn credentials(&self) -> Result<(String, u64), TadoError> {
        let mut session = self.session.lock().await;
        let home_id = session.home_id.ok_or(TadoError::NotActivated)?;
        let tokens = session.tokens.as_ref().ok_or(TadoError::NotActivated)?;
        if tokens.is_fresh() {
            return Ok((tokens.access_token.clone(), home_id));
        }

        tracing::debug!("refreshing tado access token");
        let grant = match self.auth.refresh(&tokens.refresh_token).await {
            Ok(grant) => grant,
            Err(err) => {
                if matches!(err, TadoError::Status { status, .. } if (400..500).contains(&status)) {
                    session.status = ActivationStatus::Failed;
                }
                return Err(err);
            }
        };
        self.store.save(&grant.refresh_token).await?;
        let tokens = Tokens::from_grant(grant);
        let access_token = tokens.access_token.clone();
        session.tokens = Some(tokens);
        Ok((access_token, home_id))
    }

    fn zone_url(&self, home_id: u64, zone: ZoneId, suffix: &str) -> String {
        format!("{}/homes/{home_id}/zones/{zone}{suffix}", self.api_url)
    }

    async fn fetch_json<T: DeserializeOwned>(
        &self,
        url: &str,
        token: &str,
    ) -> Result<T, TadoError> {
        let response = self.http.get(url).bearer_auth(token).send().await?;
        Ok(check(response).await?.json().await?)
    }

    async fn zones(&self) -> Result<Vec<Zone>, TadoError> {
        let (token, home_id) = self.credentials().await?;
        let url = format!("{}/homes/{home_id}/zones", self.api_url);
        self.fetch_json(&url, &token).await
    }

    async fn window_state(&self, zone: ZoneId) -> Result<WindowState, TadoError> {
        let (token, home_id) = self.credentials().await?;
        self.fetch_json(&self.zone_url(home_id, zone, "/state"), &token)
            .await
    }

    async fn activate_open_window(&self, zone: ZoneId) -> Result<(), TadoError> {
        let (token, home_id) = self.credentials().await?;
        let url = self.zone_url(home_id, zone, "/state/openWindow/activate");
        let response = self.http.post(url).bearer_auth(token).send().await?;
        check(response).await?;
        Ok(())
    }

    async fn delete_overlay(&self, zone: ZoneId) -> Result<(), TadoError> {
        let (token, home_id) = self.credentials().await?;
        let url = self.zone_url(home_id, zone, "/overlay");
        let response = self.http.delete(url).bearer_auth(token).send().await?;
        check(response).await?;
        Ok(())
    }
}

impl HeatingClient for TadoClient {
    async fn activation_status(&self) -> Result<ActivationStatus, HeatGateError> {
        Ok(self.session.lock().await.status)
    }

    async fn verification_url(&self) -> Result<String, HeatGateError> {
        let session = self.session.lock().await;
        session
            .device
            .as_ref()
            .map(|device| device.verification_uri_complete.clone())
            .ok_or_else(|| TadoError::NotActivated.into_domain())
    }

    async fn activate(&self) -> Result<(), HeatGateError> {
        let device = self.session.lock().await.device.clone();
        match device {
            Some(device) => self.poll_until_approved(device).await.map_err(TadoError::into_domain),
            None => Ok(()),
        }
    }

    async fn get_zones(&self) -> Result<Vec<Zone>, HeatGateError> {
        Ok(self.zones().await?)
    }

    async fn get_window_state(&self, zone: ZoneId) -> Result<WindowState, HeatGateError> {
        Ok(self.window_state(zone).await?)
    }

    async fn set_open_window(&self, zone: ZoneId) -> Result<(), HeatGateError> {
        Ok(self.activate_open_window(zone).await?)
    }

    async fn cancel_overlay(&self, zone: ZoneId) -> Result<(), HeatGateError> {
        Ok(self.delete_overlay(zone).await?)
    }
}
