use std::io::{self, BufReader, Read};

use sha1::Digest;
use tracing::{debug, trace};

use crate::config::ClientConfig;
use crate::conversion::{RangeKey, password_digest};
use crate::error::Error;
use crate::response::check_status;
use crate::scan::scan_range;

/// Request header asking the range API to pad its response with decoys.
pub(crate) const ADD_PADDING_HEADER: &str = "Add-Padding";

/// Blocking client for the Pwned Passwords range API.
///
/// Only the first five hex characters of a digest ever leave the process; the
/// rest of the digest is matched locally against the returned range. The
/// client holds no mutable state and can be shared between threads.
///
/// Built on `reqwest::blocking`, so it must not be driven from inside an async
/// runtime. Use `AsyncRangeClient` (feature `tokio`) there.
#[derive(Debug, Clone)]
pub struct RangeClient {
    http: reqwest::blocking::Client,
    config: ClientConfig,
}

impl RangeClient {
    /// Creates a client for the public endpoint with default settings.
    pub fn new() -> Result<Self, Error> {
        Self::with_config(ClientConfig::default())
    }

    /// Creates a client whose transport is built from `config`.
    pub fn with_config(config: ClientConfig) -> Result<Self, Error> {
        let http = reqwest::blocking::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(Error::ClientBuild)?;

        Ok(Self::with_transport(config, http))
    }

    /// Creates a client on a caller-supplied transport. The transport's own
    /// user agent and timeouts take precedence over those in `config`.
    pub fn with_transport(config: ClientConfig, http: reqwest::blocking::Client) -> Self {
        Self { http, config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Looks up a finalized digest and returns how many times it appears in
    /// the breach corpus. `Ok(0)` means the digest is not in its range.
    ///
    /// A `429` response is reported as [`Error::RateLimited`]; nothing is
    /// retried here, the caller decides when to try again.
    pub fn match_digest(&self, digest: &[u8]) -> Result<u64, Error> {
        let key = RangeKey::from_digest(digest)?;

        let result = self.query(&key);
        match &result {
            Ok(count) => debug!(prefix = key.prefix(), count, "range scanned"),
            Err(e) => debug!(prefix = key.prefix(), error = %e, "range query failed"),
        }
        result
    }

    /// Finalizes `hasher` and looks up the resulting digest.
    pub fn match_hasher<D: Digest>(&self, hasher: D) -> Result<u64, Error> {
        self.match_digest(&hasher.finalize())
    }

    /// Hashes `password` for the configured [`HashMode`](crate::HashMode)
    /// (SHA-1, or NTLM in `Ntlm` mode) and looks it up.
    pub fn check_password(&self, password: &str) -> Result<u64, Error> {
        self.match_digest(&password_digest(password, self.config.mode))
    }

    fn query(&self, key: &RangeKey) -> Result<u64, Error> {
        let url = self.config.range_url(key.prefix());
        debug!(%url, "querying range");

        let mut request = self.http.get(&url);
        if self.config.add_padding {
            request = request.header(ADD_PADDING_HEADER, "true");
        }

        let response = request.send().map_err(|e| Error::transport(key.prefix(), e))?;
        let status = check_status(response.status(), response.headers());

        let mut body = Drained(BufReader::new(response));
        status?;
        scan_range(&mut body.0, key)
    }
}

/// Reads a body to the end when dropped, so the connection can go back to the
/// pool however the scan exits.
struct Drained<R: Read>(R);

impl<R: Read> Drop for Drained<R> {
    fn drop(&mut self) {
        if let Err(e) = io::copy(&mut self.0, &mut io::sink()) {
            trace!(error = %e, "failed to drain range body");
        }
    }
}
