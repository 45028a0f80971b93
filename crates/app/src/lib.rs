//! # heatgate-app
//!
//! Application layer: use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `HeatingConnector`: builds a vendor session bound to the token file
//!   - `HeatingClient`: activation handshake and zone commands
//!   - `ActivityLog`: user-visible, best-effort action log
//!   - `Terminator`: ends the process on unrecoverable errors
//! - Define **driving/inbound** use-cases:
//!   - `ActivationService`: owns the single vendor session, retries activation
//!   - `ZoneService`: resolves zones and turns heaters off/on
//!
//! ## Dependency rule
//! Depends on `heatgate-domain` only (plus `tokio::sync`/`tokio::time`).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod services;
