//! # SAS Token Client Library
//!
//! Fetches short-lived SAS tokens from an analytics auth endpoint with a
//! bearer credential and classifies every failure as recoverable or
//! unrecoverable, so a publisher knows whether to retry or disable itself.
//!
//! Modules:
//! - `sources` — the SAS token fetcher
//! - `resilience` — failure classification and error types
//! - `config` — YAML configuration for the `sas-token` binary
//! - `observability` — Prometheus metrics
//! - `utils` — logging setup, constants, config loading entrypoint

pub mod config;
pub mod sources;
pub mod resilience;
pub mod observability;
pub mod utils;
pub mod tests;


pub use crate::config::service::ServiceConfig;
pub use crate::resilience::classification::{FetchFailure, SasTokenError, Tier};
pub use crate::sources::sas_token::{TokenFetcher, TokenResponse};
