//! # heatgated: heatgate daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Parse configuration (env vars, config file)
//! - Initialize `tracing` diagnostics
//! - Construct the tado connector and the file activity log (adapters)
//! - Construct application services, injecting adapters via port traits
//! - Start the vendor activation in the background
//! - Build the axum router, bind to a TCP port and serve
//! - Handle Ctrl-C, including an interrupted activation
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer: no domain logic belongs here.

mod config;

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use heatgate_adapter_activity_log::FileActivityLog;
use heatgate_adapter_http_axum::auth::ApiKey;
use heatgate_adapter_http_axum::state::AppState;
use heatgate_adapter_tado::TadoConnector;
use heatgate_app::ports::{ActivityLog, Terminator};
use heatgate_app::services::activation_service::ActivationService;
use heatgate_app::services::zone_service::ZoneService;

use crate::config::Config;

type Activation = ActivationService<TadoConnector, Arc<FileActivityLog>, ProcessExit>;

/// Ends the process when activation hits an unrecoverable error.
struct ProcessExit;

impl Terminator for ProcessExit {
    fn terminate(&self, code: i32) {
        std::process::exit(code);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("loading configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .init();

    if config.uses_default_api_key() {
        tracing::warn!("API_KEY is not set, using the insecure default secret");
    }

    // Adapters
    let connector =
        TadoConnector::new(config.tado.clone()).context("building the tado HTTP client")?;
    tracing::info!(
        token_file = %connector.config().token_file.display(),
        api_url = %connector.config().api_url,
        "tado connector ready"
    );
    let log = Arc::new(FileActivityLog::new(&config.activity_log));

    // Services
    let activation = Arc::new(
        ActivationService::new(connector, Arc::clone(&log), ProcessExit)
            .with_retry_interval(config.retry_interval()),
    );
    let zones = Arc::new(ZoneService::new(Arc::clone(&log)));

    tokio::spawn(warm_up(Arc::clone(&activation)));

    // HTTP
    let state = AppState::from_arcs(
        Arc::clone(&activation),
        zones,
        ApiKey::new(config.auth.api_key.as_str()),
    );
    let app = heatgate_adapter_http_axum::router::build(state);

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("binding {bind_addr}"))?;
    tracing::info!(addr = %bind_addr, "heatgated listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(activation, log))
        .await
        .context("serving HTTP")?;

    Ok(())
}

async fn warm_up(activation: Arc<Activation>) {
    if let Err(err) = activation.ensure_client().await {
        tracing::error!(error = %err.describe(), "activation aborted");
    }
}

async fn shutdown_signal(activation: Arc<Activation>, log: Arc<FileActivityLog>) {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "unable to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
    if activation.is_activating() {
        log.record("Login interrupted by user.");
        std::process::exit(0);
    }
    tracing::info!("shutting down");
}
