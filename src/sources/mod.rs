//! Token sources. A single one for now: the SAS token auth endpoint.

pub mod sas_token;

pub use sas_token::{TokenFetcher, TokenResponse};
