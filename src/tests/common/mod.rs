// tests/common/mod.rs
#![cfg(test)]

use std::net::TcpListener;

use crate::config::settings::HttpConfig;
use crate::sources::TokenFetcher;

pub const TOKEN_PATH: &str = "/token";

pub fn build_fetcher(connect_timeout_ms: u64, timeout_ms: u64) -> TokenFetcher {
    TokenFetcher::new(&HttpConfig { connect_timeout_ms, timeout_ms }).expect("token fetcher")
}

/// Endpoint on a local port nobody listens on, so connecting is refused.
pub fn refused_endpoint() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind failed");
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}{}", addr, TOKEN_PATH)
}
