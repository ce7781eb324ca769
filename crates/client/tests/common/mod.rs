//! Common test utilities for integration tests.
//!
//! # What this does NOT handle
//! - Mock server setup (use wiremock directly in tests)
//! - Test-specific assertions or test logic

#[allow(unused_imports)]
pub use geohosting_client::testing::{generators::PageGenerator, load_fixture};

#[allow(unused_imports)]
pub use geohosting_client::{CancellationToken, ClientError, GeohostingClient};
#[allow(unused_imports)]
pub use wiremock::{Mock, MockServer, ResponseTemplate};

/// Build an anonymous client pointed at the mock server.
#[allow(dead_code)]
pub fn client_for(server: &MockServer) -> GeohostingClient {
    GeohostingClient::builder()
        .base_url(server.uri())
        .build()
        .expect("client should build")
}

/// Build a token-authenticated client pointed at the mock server.
#[allow(dead_code)]
pub fn token_client_for(server: &MockServer, token: &str) -> GeohostingClient {
    GeohostingClient::builder()
        .base_url(server.uri())
        .api_token(secrecy::SecretString::new(token.to_string().into()))
        .build()
        .expect("client should build")
}
