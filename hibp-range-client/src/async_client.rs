use std::io;

use futures_util::TryStreamExt;
use sha1::Digest;
use tokio_util::io::StreamReader;
use tracing::{debug, trace};

use crate::client::ADD_PADDING_HEADER;
use crate::config::ClientConfig;
use crate::conversion::{RangeKey, password_digest};
use crate::error::Error;
use crate::response::check_status;
use crate::scan::scan_range_async;

/// Async client for the Pwned Passwords range API, on reqwest's tokio
/// transport. Same protocol and results as [`RangeClient`](crate::RangeClient).
#[derive(Debug, Clone)]
pub struct AsyncRangeClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl AsyncRangeClient {
    pub fn new() -> Result<Self, Error> {
        Self::with_config(ClientConfig::default())
    }

    pub fn with_config(config: ClientConfig) -> Result<Self, Error> {
        let mut builder = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .connect_timeout(config.connect_timeout);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(Error::ClientBuild)?;

        Ok(Self::with_transport(config, http))
    }

    pub fn with_transport(config: ClientConfig, http: reqwest::Client) -> Self {
        Self { http, config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// See [`RangeClient::match_digest`](crate::RangeClient::match_digest).
    pub async fn match_digest(&self, digest: &[u8]) -> Result<u64, Error> {
        let key = RangeKey::from_digest(digest)?;

        let result = self.query(&key).await;
        match &result {
            Ok(count) => debug!(prefix = key.prefix(), count, "range scanned"),
            Err(e) => debug!(prefix = key.prefix(), error = %e, "range query failed"),
        }
        result
    }

    pub async fn match_hasher<D: Digest>(&self, hasher: D) -> Result<u64, Error> {
        let digest = hasher.finalize();
        self.match_digest(&digest).await
    }

    /// See [`RangeClient::check_password`](crate::RangeClient::check_password).
    pub async fn check_password(&self, password: &str) -> Result<u64, Error> {
        let digest = password_digest(password, self.config.mode);
        self.match_digest(&digest).await
    }

    async fn query(&self, key: &RangeKey) -> Result<u64, Error> {
        let url = self.config.range_url(key.prefix());
        debug!(%url, "querying range");

        let mut request = self.http.get(&url);
        if self.config.add_padding {
            request = request.header(ADD_PADDING_HEADER, "true");
        }

        let response = request.send().await.map_err(|e| Error::transport(key.prefix(), e))?;
        let status = check_status(response.status(), response.headers());

        let stream = response.bytes_stream().map_err(io::Error::other);
        let mut body = StreamReader::new(Box::pin(stream));

        let result = match status {
            Ok(()) => scan_range_async(&mut body, key).await,
            Err(e) => Err(e),
        };

        // No async drop: drain here so every exit path releases the connection.
        if let Err(e) = tokio::io::copy(&mut body, &mut tokio::io::sink()).await {
            trace!(error = %e, "failed to drain range body");
        }

        result
    }
}
