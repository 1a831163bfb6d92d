use std::time::Duration;

/// The public Pwned Passwords range endpoint.
pub const DEFAULT_RANGE_URL: &str = "https://api.pwnedpasswords.com/range";

/// Environment variable name for overriding the range endpoint.
pub const RANGE_URL_ENV: &str = "HIBP_RANGE_URL";

pub const DEFAULT_USER_AGENT: &str = concat!("hibp-range-client/", env!("CARGO_PKG_VERSION"));

/// Default whole-request timeout applied to transports built from a config.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Which digest family the range API should serve.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HashMode {
    /// SHA-1 ranges, the API's default.
    #[default]
    Sha1,
    /// NTLM ranges, requested with `?mode=ntlm`.
    Ntlm,
}

/// Configuration for a range client.
///
/// Settings that shape each request (`base_url`, `add_padding`, `mode`) are
/// always honored. `user_agent` and the timeouts only apply when the client
/// builds its own transport; an injected transport keeps its own settings.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Range endpoint; the 5-character prefix is appended as a path segment.
    pub base_url: String,
    pub user_agent: String,
    /// Whole-request timeout, or `None` for no limit.
    pub timeout: Option<Duration>,
    pub connect_timeout: Duration,
    /// Ask the server to pad responses with decoy records (count 0) so the
    /// response size doesn't leak the prefix.
    pub add_padding: bool,
    pub mode: HashMode,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_RANGE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Some(DEFAULT_TIMEOUT),
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            add_padding: false,
            mode: HashMode::Sha1,
        }
    }
}

impl ClientConfig {
    /// Returns the default configuration with the endpoint taken from the
    /// HIBP_RANGE_URL environment variable, if set.
    ///
    /// ```
    /// use hibp_range_client::{ClientConfig, DEFAULT_RANGE_URL, RANGE_URL_ENV};
    ///
    /// // SAFETY: nothing else in this process touches the environment.
    /// unsafe { std::env::set_var(RANGE_URL_ENV, " http://127.0.0.1:8080/range ") };
    /// assert_eq!(ClientConfig::from_env().base_url, "http://127.0.0.1:8080/range");
    ///
    /// unsafe { std::env::set_var(RANGE_URL_ENV, "  ") };
    /// assert_eq!(ClientConfig::from_env().base_url, DEFAULT_RANGE_URL);
    ///
    /// unsafe { std::env::remove_var(RANGE_URL_ENV) };
    /// assert_eq!(ClientConfig::from_env().base_url, DEFAULT_RANGE_URL);
    /// ```
    pub fn from_env() -> Self {
        let config = Self::default();
        match std::env::var(RANGE_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => config.with_base_url(url.trim()),
            _ => config,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_connect_timeout(mut self, connect_timeout: Duration) -> Self {
        self.connect_timeout = connect_timeout;
        self
    }

    pub fn with_padding(mut self, add_padding: bool) -> Self {
        self.add_padding = add_padding;
        self
    }

    pub fn with_mode(mut self, mode: HashMode) -> Self {
        self.mode = mode;
        self
    }

    /// Builds the request target for `prefix`: base URL, `/`, prefix.
    pub fn range_url(&self, prefix: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        match self.mode {
            HashMode::Sha1 => format!("{base}/{prefix}"),
            HashMode::Ntlm => format!("{base}/{prefix}?mode=ntlm"),
        }
    }
}
