//! Shared test helpers for license tests.

#![allow(dead_code)]

use powkey_license::{build, TokenPair};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const SUBJECT: &str = "Alice";
pub const PROJECT: &str = "Widget";
pub const SALT: &str = "alice";

/// Builds the standard Alice/Widget pair bound to `alice`.
pub fn alice_pair() -> TokenPair {
    build(SUBJECT, PROJECT, SALT).unwrap()
}

/// Flips one hex digit of a private key.
pub fn flip_hex_digit(key: &str, index: usize) -> String {
    key.char_indices()
        .map(|(i, c)| {
            if i == index {
                if c == '0' { '1' } else { '0' }
            } else {
                c
            }
        })
        .collect()
}

/// Multi-threaded runtime for driving the mock server from blocking tests.
pub fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_all()
        .build()
        .unwrap()
}

/// Starts a mock server answering `GET /pow_list.txt` with `status` and `body`.
/// Returns the server (keep it alive) and the full list URL.
pub fn serve_list(rt: &tokio::runtime::Runtime, status: u16, body: &str) -> (MockServer, String) {
    let server = rt.block_on(MockServer::start());
    rt.block_on(
        Mock::given(method("GET"))
            .and(path("/pow_list.txt"))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(&server),
    );
    let url = format!("{}/pow_list.txt", server.uri());
    (server, url)
}
