use async_trait::async_trait;
use reqwest::{Client, tls::Version};
use std::{fmt::Debug, time::Duration};

use crate::{config::DownstreamConfig, error::RelayError, model::Coordinates, tls::TlsContext};

/// Raw transport to the realtime weather provider.
///
/// The seam that lets tests substitute a fake transport for the HTTPS client.
#[async_trait]
pub trait WeatherTransport: Send + Sync + Debug {
    /// Fetch the provider's current-weather document for the coordinates,
    /// returning the raw response body. One attempt per invocation; retry
    /// policy, if any, is a caller concern.
    async fn fetch_current(&self, coords: Coordinates) -> Result<String, RelayError>;
}

/// HTTPS client for the provider, authenticated with the shared TLS context.
#[derive(Debug, Clone)]
pub struct DownstreamClient {
    host: String,
    api_key: String,
    timeout: Duration,
    http: Client,
}

impl DownstreamClient {
    /// Build a client with the shared identity, TLS 1.2 as the minimum
    /// protocol version, and explicit connect/read bounds.
    pub fn new(config: &DownstreamConfig, tls: &TlsContext) -> Result<Self, RelayError> {
        let http = Client::builder()
            .identity(tls.identity())
            .min_tls_version(Version::TLS_1_2)
            .connect_timeout(config.connect_timeout())
            .timeout(config.timeout())
            .build()
            .map_err(|err| {
                RelayError::Configuration(format!("failed to build HTTPS client: {err}"))
            })?;

        Ok(Self {
            host: config.host.clone(),
            api_key: config.api_key.clone(),
            timeout: config.timeout(),
            http,
        })
    }

    fn url(&self) -> String {
        format!("https://{}/current.json", self.host)
    }
}

#[async_trait]
impl WeatherTransport for DownstreamClient {
    async fn fetch_current(&self, coords: Coordinates) -> Result<String, RelayError> {
        let query = coords.to_string();

        let res = self
            .http
            .get(self.url())
            .query(&[("q", query.as_str())])
            .header("X-RapidAPI-Key", self.api_key.as_str())
            .header("X-RapidAPI-Host", self.host.as_str())
            .send()
            .await
            .map_err(|err| send_error(err, self.timeout))?;

        let status = res.status();
        let body = res.text().await.map_err(|err| send_error(err, self.timeout))?;

        if !status.is_success() {
            return Err(RelayError::Transport {
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        Ok(body)
    }
}

fn send_error(err: reqwest::Error, timeout: Duration) -> RelayError {
    if err.is_timeout() {
        RelayError::Timeout(timeout)
    } else {
        // status 0 marks a failure before any response arrived
        RelayError::Transport {
            status: err.status().map_or(0, |status| status.as_u16()),
            body: err.to_string(),
        }
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX { format!("{}...", &body[..MAX]) } else { body.to_string() }
}
