/*
[INPUT]:  Mock server requirements for dashboard flows
[OUTPUT]: Shared fixtures for dashboard integration tests
[POS]:    Test infrastructure - shared across dashboard test modules
[UPDATE]: When adding new test patterns or fixtures
*/

use std::time::Duration;

use reelbrand_adapter::{ClientConfig, ReelbrandClient};
use reelbrand_dashboard::{OnboardingSession, Platforms, SimulatedConnectionTester};
use wiremock::MockServer;

pub fn client_for(server: &MockServer) -> ReelbrandClient {
    ReelbrandClient::with_config(ClientConfig::default(), &server.uri()).expect("client init")
}

/// Tester that always passes without waiting
#[allow(dead_code)]
pub fn passing_tester() -> SimulatedConnectionTester {
    SimulatedConnectionTester::new(Duration::ZERO, 1.0)
}

#[allow(dead_code)]
pub fn session(require_connection_test: bool) -> OnboardingSession {
    OnboardingSession::new(Platforms::builtin(), require_connection_test)
}
