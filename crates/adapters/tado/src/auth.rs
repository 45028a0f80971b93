//! OAuth2 endpoints: device authorization, device-code polling, refresh.

use serde::Deserialize;

use crate::error::TadoError;

const DEVICE_CODE_GRANT: &str = "urn:ietf:params:oauth:grant-type:device_code";

/// Answer to a device authorization request.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct DeviceAuthorization {
    pub device_code: String,
    #[serde(default)]
    pub user_code: String,
    pub verification_uri_complete: String,
    /// Seconds to wait between two polls.
    #[serde(default = "default_interval")]
    pub interval: u64,
    /// Seconds until `device_code` expires.
    pub expires_in: u64,
}

const fn default_interval() -> u64 {
    5
}

/// Tokens issued by the token endpoint.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct TokenGrant {
    pub access_token: String,
    pub refresh_token: String,
    /// Access-token lifetime in seconds.
    pub expires_in: u64,
}

#[derive(Deserialize)]
struct OAuthErrorBody {
    error: String,
}

/// Result of one device-code poll.
#[derive(Debug)]
pub(crate) enum Poll {
    Granted(TokenGrant),
    Pending,
    SlowDown,
    /// The request expired or was denied; carries the OAuth error code.
    Rejected(String),
}

/// Thin client over the OAuth2 endpoints.
#[derive(Debug, Clone)]
pub(crate) struct AuthClient {
    http: reqwest::Client,
    base_url: String,
    client_id: String,
}

impl AuthClient {
    pub(crate) fn new(http: reqwest::Client, base_url: &str, client_id: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            client_id: client_id.to_string(),
        }
    }

    pub(crate) async fn authorize_device(&self) -> Result<DeviceAuthorization, TadoError> {
        let response = self
            .http
            .post(format!("{}/device_authorize", self.base_url))
            .form(&[("client_id", self.client_id.as_str()), ("scope", "offline_access")])
            .send()
            .await?;
        Ok(check(response).await?.json().await?)
    }

    pub(crate) async fn poll_device_token(&self, device_code: &str) -> Result<Poll, TadoError> {
        let response = self
            .http
            .post(format!("{}/token", self.base_url))
            .form(&[
                ("client_id", self.client_id.as_str()),
                ("device_code", device_code),
                ("grant_type", DEVICE_CODE_GRANT),
            ])
            .send()
            .await?;

        if response.status().is_success() {
            return Ok(Poll::Granted(response.json().await?));
        }
        let status = response.status().as_u16();
        let body = response.text().await?;
        match serde_json::from_str::<OAuthErrorBody>(&body) {
            Ok(err) if err.error == "authorization_pending" => Ok(Poll::Pending),
            Ok(err) if err.error == "slow_down" => Ok(Poll::SlowDown),
            Ok(err) if status == 400 => Ok(Poll::Rejected(err.error)),
            _ => Err(TadoError::Status { status, body }),
        }
    }

    pub(crate) async fn refresh(&self, refresh_token: &str) -> Result<TokenGrant, TadoError> {
        let response = self
            .http
            .post(format!("{}/token", self.base_url))
            .form(&[
                ("client_id", self.client_id.as_str()),
                ("grant_type", "refresh_token"),
                ("refresh_token", refresh_token),
            ])
            .send()
            .await?;
        Ok(check(response).await?.json().await?)
    }
}

/// Turn a non-success response into [`TadoError::Status`].
pub(crate) async fn check(response: reqwest::Response) -> Result<reqwest::Response, TadoError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "unable to read error body".to_owned());
    Err(TadoError::Status {
        status: status.as_u16(),
        body,
    })
}
