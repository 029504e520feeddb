/*
[INPUT]:  HTTP configuration (base URL, timeouts)
[OUTPUT]: Configured reqwest client ready for API calls
[POS]:    HTTP layer - core client implementation
[UPDATE]: When adding connection options or changing client behavior
[UPDATE]: 2026-09-30 Single configurable API origin instead of fixed service URLs
*/

use reqwest::{Client, Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

use crate::http::{ReelbrandError, Result};

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

/// HTTP client for the ReelBrand backend API
#[derive(Debug, Clone)]
pub struct ReelbrandClient {
    http_client: Client,
    base_url: Url,
}

impl ReelbrandClient {
    /// Create a new client with default configuration
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_config(ClientConfig::default(), base_url)
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: ClientConfig, base_url: &str) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()?;

        Ok(Self {
            http_client,
            base_url: normalize_base_url(base_url)?,
        })
    }

    /// API origin every endpoint is resolved against
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build full URL for an endpoint, keeping any path prefix of the base URL
    pub(crate) fn endpoint_url(&self, endpoint: &str) -> Result<Url> {
        Ok(self.base_url.join(endpoint.trim_start_matches('/'))?)
    }

    pub(crate) fn request(&self, method: Method, endpoint: &str) -> Result<RequestBuilder> {
        let url = self.endpoint_url(endpoint)?;
        debug!(%method, %url, "building request");
        Ok(self.http_client.request(method, url))
    }

    /// Send a request and decode the JSON body.
    ///
    /// Non-2xx responses become [`ReelbrandError::Api`] carrying the raw body.
    /// A blank body decodes as JSON `null`, so `Option<T>` and `Value` targets
    /// accept empty acknowledgements.
    pub(crate) async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ReelbrandError::api_error(status, body));
        }

        let payload = if body.trim().is_empty() { "null" } else { body.as_str() };
        Ok(serde_json::from_str(payload)?)
    }
}

fn normalize_base_url(base_url: &str) -> Result<Url> {
    let trimmed = base_url.trim();
    if trimmed.is_empty() {
        return Err(ReelbrandError::Config("API base URL is empty".to_string()));
    }
    let with_slash = if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{trimmed}/")
    };
    Ok(Url::parse(&with_slash)?)
}
