//! Activation service: owns the single vendor session and keeps it usable.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::sync::Mutex;

use heatgate_domain::activation::ActivationStatus;
use heatgate_domain::error::HeatGateError;

use crate::ports::{ActivityLog, HeatingClient, HeatingConnector, Terminator};

/// Delay between two activation attempts.
pub const DEFAULT_RETRY_INTERVAL: Duration = Duration::from_secs(30);

/// Exit code used when a fatal error stops the process.
const FATAL_EXIT_CODE: i32 = 0;

/// Application service that lazily creates, activates and caches the
/// vendor session.
///
/// `ensure_client` is serialized: while one caller is activating, the others
/// wait on the lock and then reuse the session it produced.
pub struct ActivationService<N: HeatingConnector, L, T> {
    connector: N,
    log: L,
    terminator: T,
    retry_interval: Duration,
    client: Mutex<Option<Arc<N::Client>>>,
    activating: AtomicBool,
}

enum Attempt<C> {
    Ready(C),
    NotReady(ActivationStatus),
}

impl<N, L, T> ActivationService<N, L, T>
where
    N: HeatingConnector,
    L: ActivityLog,
    T: Terminator,
{
    /// Create a new service; nothing is contacted until the first
    /// [`ensure_client`](Self::ensure_client).
    pub fn new(connector: N, log: L, terminator: T) -> Self {
        Self {
            connector,
            log,
            terminator,
            retry_interval: DEFAULT_RETRY_INTERVAL,
            client: Mutex::new(None),
            activating: AtomicBool::new(false),
        }
    }

    #[must_use]
    pub fn with_retry_interval(mut self, retry_interval: Duration) -> Self {
        self.retry_interval = retry_interval;
        self
    }

    /// Whether an activation attempt is currently running.
    #[must_use]
    pub fn is_activating(&self) -> bool {
        self.activating.load(Ordering::SeqCst)
    }

    /// Return a session whose activation is completed, creating one if needed.
    ///
    /// Retries forever with a fixed delay on failed activations and on
    /// connection errors. Waits for as long as the user takes to approve the
    /// device.
    ///
    /// # Errors
    ///
    /// Returns [`HeatGateError::Fatal`] only after the [`Terminator`] was
    /// asked to end the process and returned.
    #[tracing::instrument(skip(self))]
    pub async fn ensure_client(&self) -> Result<Arc<N::Client>, HeatGateError> {
        let mut slot = self.client.lock().await;

        if let Some(client) = slot.as_ref() {
            match client.activation_status().await {
                Ok(status) if status.is_ready() => return Ok(Arc::clone(client)),
                Ok(status) => tracing::info!(%status, "session no longer active"),
                Err(err) => tracing::warn!(error = %err.describe(), "session status unavailable"),
            }
        }
        *slot = None;

        let _activating = ActivatingFlag::raise(&self.activating);
        loop {
            match self.attempt().await {
                Ok(Attempt::Ready(client)) => {
                    let client = Arc::new(client);
                    *slot = Some(Arc::clone(&client));
                    return Ok(client);
                }
                Ok(Attempt::NotReady(status)) => {
                    self.log
                        .record(&format!("Login failed. Current status: {status}\nRetrying..."));
                }
                Err(err) if err.is_fatal() => {
                    self.log
                        .record(&format!("Login permission error: {}", err.describe()));
                    tracing::error!(error = %err.describe(), "cannot use token file, terminating");
                    self.terminator.terminate(FATAL_EXIT_CODE);
                    return Err(err);
                }
                Err(err) => {
                    self.log.record(&format!(
                        "Connection error, retrying in {} seconds... \n{}",
                        self.retry_interval.as_secs(),
                        err.describe()
                    ));
                }
            }
            tokio::time::sleep(self.retry_interval).await;
        }
    }

    async fn attempt(&self) -> Result<Attempt<N::Client>, HeatGateError> {
        let client = self.connector.connect().await?;
        let mut status = client.activation_status().await?;
        let token_existed = self.connector.has_stored_token();

        if status == ActivationStatus::Pending {
            let url = client.verification_url().await?;
            self.log.record("Visit this URL for authentication:");
            self.log.record(&url);
            client.activate().await?;
            status = client.activation_status().await?;
        }

        if !status.is_ready() {
            return Ok(Attempt::NotReady(status));
        }

        if token_existed {
            self.log.record("Login successful.");
        } else {
            self.log.record("Login successful. Refresh token saved.");
        }
        Ok(Attempt::Ready(client))
    }
}

/// Keeps the `activating` flag raised for the lifetime of the guard.
struct ActivatingFlag<'a>(&'a AtomicBool);

impl<'a> ActivatingFlag<'a> {
    fn raise(flag: &'a AtomicBool) -> Self {
        flag.store(true, Ordering::SeqCst);
        Self(flag)
    }
}

impl Drop for ActivatingFlag<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}
