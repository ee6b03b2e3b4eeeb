//! Shared constants and invariants

use http::header::{HeaderName, AUTHORIZATION};

/// Header carrying the bearer credential on the token request.
pub const AUTH_HEADER: HeaderName = AUTHORIZATION;
pub const BEARER_PREFIX: &str = "Bearer ";

pub const DEFAULT_HTTP_CONNECT_TIMEOUT_MS: u64 = 5000;
pub const DEFAULT_HTTP_TIMEOUT_MS: u64 = 10000;

pub const DEFAULT_CONFIG_PATH: &str = "sas-token.yaml";

// Process exit codes, sysexits.h
pub const EXIT_TEMPFAIL: u8 = 75;
pub const EXIT_CONFIG: u8 = 78;
