/*
[INPUT]:  Platform definition and the credentials currently in the form
[OUTPUT]: Pass/fail verdict for the credentials
[POS]:    Onboarding - pluggable connection check
[UPDATE]: When a real per-platform verification replaces the simulation
*/

use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use reelbrand_adapter::Platform;
use thiserror::Error;
use tracing::{debug, info};

use crate::form::FormState;
use crate::schema::PlatformDefinition;

/// Outcome of the most recent connection test
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionStatus {
    #[default]
    Idle,
    Testing,
    Success,
    Error,
}

impl ConnectionStatus {
    pub fn label(self) -> &'static str {
        match self {
            ConnectionStatus::Idle => "Not tested",
            ConnectionStatus::Testing => "Testing connection...",
            ConnectionStatus::Success => "Connection verified",
            ConnectionStatus::Error => "Connection failed",
        }
    }

    pub fn is_testing(self) -> bool {
        self == ConnectionStatus::Testing
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConnectionError {
    #[error("{platform} rejected the supplied credentials")]
    Rejected { platform: Platform },
}

#[async_trait]
pub trait ConnectionTester: Send + Sync {
    async fn test_connection(
        &self,
        platform: &PlatformDefinition,
        form: &FormState,
    ) -> Result<(), ConnectionError>;
}

/// Stand-in check: waits, then passes with a fixed probability
#[derive(Debug, Clone)]
pub struct SimulatedConnectionTester {
    delay: Duration,
    success_ratio: f64,
}

impl SimulatedConnectionTester {
    pub const DEFAULT_DELAY: Duration = Duration::from_secs(2);
    pub const DEFAULT_SUCCESS_RATIO: f64 = 0.7;

    pub fn new(delay: Duration, success_ratio: f64) -> Self {
        let success_ratio = if success_ratio.is_nan() {
            0.0
        } else {
            success_ratio.clamp(0.0, 1.0)
        };
        Self {
            delay,
            success_ratio,
        }
    }

    pub fn success_ratio(&self) -> f64 {
        self.success_ratio
    }
}

impl Default for SimulatedConnectionTester {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DELAY, Self::DEFAULT_SUCCESS_RATIO)
    }
}

#[async_trait]
impl ConnectionTester for SimulatedConnectionTester {
    async fn test_connection(
        &self,
        platform: &PlatformDefinition,
        form: &FormState,
    ) -> Result<(), ConnectionError> {
        debug!(platform = %platform.platform, fields = form.len(), "simulating connection test");
        tokio::time::sleep(self.delay).await;

        let passed = rand::thread_rng().gen_bool(self.success_ratio);
        info!(platform = %platform.platform, passed, "connection test finished");
        if passed {
            Ok(())
        } else {
            Err(ConnectionError::Rejected {
                platform: platform.platform,
            })
        }
    }
}
