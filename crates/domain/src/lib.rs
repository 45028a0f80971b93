//! # heatgate-domain
//!
//! Pure domain model for the heatgate heating bridge.
//!
//! ## Responsibilities
//! - Foundational types: zone identifiers, error conventions
//! - Define **Zones** (heating-controlled rooms as reported by the vendor)
//! - Define the **Activation status** of a vendor session
//! - Define **Zone actions** (`heater_off`, `heater_on`) and their outcomes
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;

pub mod action;
pub mod activation;
pub mod zone;
