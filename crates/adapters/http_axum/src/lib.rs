//! # heatgate-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve the heater control API:
//!   - `PUT /heater/off?zone=<name>`: heater off by name, or in the first
//!     zone reporting an open window when `zone` is omitted
//!   - `PUT /heater/on?zone=<name>`: back to schedule
//!   - `GET /zones`: zone names
//!   - `GET /health`: liveness, unauthenticated
//! - Reject requests lacking the `X-API-KEY` shared secret with 403
//! - Map HTTP requests into application service calls (driving adapter)
//! - Map application results and errors into JSON responses
//!
//! ## Dependency rule
//! Depends on `heatgate-app` (for port traits and services) and
//! `heatgate-domain` (for domain types used in response mapping). Never
//! leaks axum types into the domain.

pub mod api;
pub mod auth;
pub mod error;
pub mod router;
pub mod state;
