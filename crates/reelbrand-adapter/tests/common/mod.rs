/*
[INPUT]:  Test configuration and mock server requirements
[OUTPUT]: Shared test utilities, fixtures, and mock helpers
[POS]:    Test infrastructure - shared across all test modules
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for reelbrand-adapter tests

use reelbrand_adapter::{ClientConfig, ReelbrandClient};
use serde_json::{Value, json};
use wiremock::MockServer;

/// Setup a mock HTTP server for testing
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Client pointed at the mock server
pub fn client_for(server: &MockServer) -> ReelbrandClient {
    ReelbrandClient::with_config(ClientConfig::default(), &server.uri()).expect("client init")
}

/// Account object shaped like the backend's stored Instagram record
#[allow(dead_code)]
pub fn instagram_account_json() -> Value {
    json!({
        "id": "insta_17841400000000000",
        "platform": "instagram",
        "instagram_username": "myinsta",
        "instagram_id": "17841400000000000",
        "page_id": "1234567890",
        "token_expiry_date": "2025-08-01",
        "reminder_email": "user@example.com",
        "hashtag_presets": "#motivation #life"
    })
}
