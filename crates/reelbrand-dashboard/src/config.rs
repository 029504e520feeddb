/*
[INPUT]:  Defaults, optional YAML file, REELBRAND_* environment, CLI overrides
[OUTPUT]: Parsed dashboard configuration plus client and schema builders
[POS]:    Configuration layer - dashboard setup
[UPDATE]: When adding new configuration options
[UPDATE]: 2026-10-04 Layer file and environment sources through the config crate
*/

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, bail};
use config::{Environment, File, FileFormat};
use reelbrand_adapter::{ClientConfig, ReelbrandClient};
use serde::{Deserialize, Serialize};

use crate::connection::SimulatedConnectionTester;
use crate::schema::Platforms;

pub const ENV_PREFIX: &str = "REELBRAND";

/// Top-level configuration for the dashboard
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DashboardConfig {
    /// Backend API origin, e.g. "http://localhost:8000"
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    /// Save stays disabled until a connection test passes
    #[serde(default = "default_require_connection_test")]
    pub require_connection_test: bool,
    #[serde(default)]
    pub connection_test: ConnectionTestConfig,
    /// YAML file overriding built-in platform schemas
    #[serde(default)]
    pub schema_path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ConnectionTestConfig {
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,
    /// Probability in [0, 1] that a simulated test passes
    #[serde(default = "default_success_ratio")]
    pub success_ratio: f64,
}

impl Default for ConnectionTestConfig {
    fn default() -> Self {
        Self {
            delay_ms: default_delay_ms(),
            success_ratio: default_success_ratio(),
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            request_timeout_secs: default_request_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            require_connection_test: default_require_connection_test(),
            connection_test: ConnectionTestConfig::default(),
            schema_path: None,
        }
    }
}

fn default_api_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_require_connection_test() -> bool {
    true
}

fn default_delay_ms() -> u64 {
    2000
}

fn default_success_ratio() -> f64 {
    0.7
}

impl DashboardConfig {
    /// `~/.config/reelbrand/dashboard.yaml` on Linux
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("reelbrand").join("dashboard.yaml"))
    }

    /// Load defaults, then the YAML file, then `REELBRAND_*` variables.
    ///
    /// An explicit `path` must exist; the default path is optional.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut builder = config::Config::builder();
        match path {
            Some(path) => {
                builder = builder.add_source(File::from(path).format(FileFormat::Yaml).required(true));
            }
            None => {
                if let Some(default) = Self::default_path() {
                    builder = builder
                        .add_source(File::from(default).format(FileFormat::Yaml).required(false));
                }
            }
        }
        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config: Self = builder
            .build()
            .context("failed to read configuration")?
            .try_deserialize()
            .context("invalid configuration")?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_api_url(mut self, api_url: Option<String>) -> Self {
        if let Some(api_url) = api_url {
            self.api_url = api_url;
        }
        self
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.api_url.trim().is_empty() {
            bail!("api_url must not be empty");
        }
        url::Url::parse(&self.api_url)
            .with_context(|| format!("api_url is not a valid URL: {}", self.api_url))?;
        let ratio = self.connection_test.success_ratio;
        if !(0.0..=1.0).contains(&ratio) {
            bail!("connection_test.success_ratio must be within 0..=1, got {ratio}");
        }
        if self.request_timeout_secs == 0 {
            bail!("request_timeout_secs must be greater than zero");
        }
        Ok(())
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            timeout: Duration::from_secs(self.request_timeout_secs),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
        }
    }

    pub fn build_client(&self) -> anyhow::Result<ReelbrandClient> {
        ReelbrandClient::with_config(self.client_config(), &self.api_url)
            .with_context(|| format!("failed to create API client for {}", self.api_url))
    }

    pub fn connection_tester(&self) -> SimulatedConnectionTester {
        SimulatedConnectionTester::new(
            Duration::from_millis(self.connection_test.delay_ms),
            self.connection_test.success_ratio,
        )
    }

    /// Built-in platforms, with the schema file's definitions applied when configured
    pub fn load_platforms(&self) -> anyhow::Result<Platforms> {
        match &self.schema_path {
            Some(path) => Platforms::load(path)
                .with_context(|| format!("failed to load platform schema {}", path.display())),
            None => Ok(Platforms::builtin()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_yaml(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".yaml")
            .tempfile()
            .expect("tempfile");
        file.write_all(content.as_bytes()).expect("write");
        file
    }

    #[test]
    fn test_defaults() {
        let config = DashboardConfig::default();
        assert_eq!(config.api_url, "http://localhost:8000");
        assert!(config.require_connection_test);
        assert_eq!(config.connection_test.delay_ms, 2000);
        assert_eq!(config.connection_test.success_ratio, 0.7);
        tokio_test::assert_ok!(config.validate());
    }

    #[test]
    fn test_load_file_fills_missing_keys_with_defaults() {
        let file = write_yaml(
            "api_url: https://api.reelbrand.test/v1\nconnection_test:\n  success_ratio: 1.0\n",
        );
        let config = DashboardConfig::load(Some(file.path())).expect("load");
        assert_eq!(config.api_url, "https://api.reelbrand.test/v1");
        assert_eq!(config.connection_test.success_ratio, 1.0);
        assert_eq!(config.connection_test.delay_ms, 2000);
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let result = DashboardConfig::load(Some(Path::new("/nonexistent/reelbrand.yaml")));
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_ratio_rejected() {
        let file = write_yaml("connection_test:\n  success_ratio: 1.5\n");
        let err = DashboardConfig::load(Some(file.path())).expect_err("ratio out of range");
        assert!(format!("{err:#}").contains("success_ratio"));
    }

    #[test]
    fn test_api_url_override() {
        let config = DashboardConfig::default().with_api_url(Some("http://10.0.0.2:9000".into()));
        assert_eq!(config.api_url, "http://10.0.0.2:9000");
        let client = config.build_client().expect("client");
        assert_eq!(client.base_url().as_str(), "http://10.0.0.2:9000/");
    }
}
