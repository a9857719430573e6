//! Client configuration.
//!
//! # Environment Variables
//!
//! - `MALGA_API_KEY` - Secret API key (required by [`MalgaConfig::from_env`])
//! - `MALGA_CLIENT_ID` - Client id (required by [`MalgaConfig::from_env`])
//! - `MALGA_SANDBOX` - `true` or `1` to target the sandbox
//! - `MALGA_RETRIES` - Extra attempts for retryable requests
//! - `MALGA_RETRY_DELAY_MS` - Delay between attempts
//! - `MALGA_API_URL` - Base URL override, read whenever no explicit URL is set

use std::fmt;
use std::time::Duration;

use url::Url;

use crate::constants::{
    API_KEY_ENV, API_URL_ENV, CLIENT_ID_ENV, DEFAULT_RETRIES, DEFAULT_RETRY_DELAY,
    PRODUCTION_API_URL, RETRIES_ENV, RETRY_DELAY_MS_ENV, SANDBOX_API_URL, SANDBOX_ENV,
};

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A required environment variable is not set.
    #[error("missing environment variable {0}")]
    MissingEnv(&'static str),

    /// The base URL could not be parsed.
    #[error("invalid base URL {url}: {source}")]
    InvalidBaseUrl {
        /// The rejected URL.
        url: String,
        /// The underlying parse error.
        #[source]
        source: url::ParseError,
    },

    /// A credential cannot be sent as an HTTP header.
    #[error("invalid value for header {name}: {source}")]
    InvalidHeader {
        /// The header name.
        name: &'static str,
        /// The underlying header error.
        #[source]
        source: http::header::InvalidHeaderValue,
    },
}

/// Credentials and transport settings for a [`Malga`](crate::Malga) client.
#[derive(Clone)]
pub struct MalgaConfig {
    pub(crate) api_key: String,
    pub(crate) client_id: String,
    pub(crate) sandbox: bool,
    pub(crate) retries: u32,
    pub(crate) retry_delay: Duration,
    pub(crate) timeout: Option<Duration>,
    pub(crate) base_url: Option<Url>,
    pub(crate) http_client: Option<reqwest::Client>,
}

impl fmt::Debug for MalgaConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MalgaConfig")
            .field("api_key", &"[REDACTED]")
            .field("client_id", &self.client_id)
            .field("sandbox", &self.sandbox)
            .field("retries", &self.retries)
            .field("retry_delay", &self.retry_delay)
            .field("timeout", &self.timeout)
            .field("base_url", &self.base_url.as_ref().map(Url::as_str))
            .finish_non_exhaustive()
    }
}

impl MalgaConfig {
    /// Creates a production configuration with default retry settings.
    #[must_use]
    pub fn new(api_key: impl Into<String>, client_id: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            client_id: client_id.into(),
            sandbox: false,
            retries: DEFAULT_RETRIES,
            retry_delay: DEFAULT_RETRY_DELAY,
            timeout: None,
            base_url: None,
            http_client: None,
        }
    }

    /// Loads a configuration from the process environment.
    ///
    /// Unparsable optional values are ignored and the defaults kept.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEnv`] if the API key or client id is
    /// not set.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = std::env::var(API_KEY_ENV).map_err(|_| ConfigError::MissingEnv(API_KEY_ENV))?;
        let client_id =
            std::env::var(CLIENT_ID_ENV).map_err(|_| ConfigError::MissingEnv(CLIENT_ID_ENV))?;
        let mut config = Self::new(api_key, client_id);

        if let Ok(sandbox) = std::env::var(SANDBOX_ENV) {
            config.sandbox = matches!(sandbox.trim(), "true" | "1");
        }
        if let Some(retries) = parse_env(RETRIES_ENV) {
            config.retries = retries;
        }
        if let Some(ms) = parse_env(RETRY_DELAY_MS_ENV) {
            config.retry_delay = Duration::from_millis(ms);
        }
        Ok(config)
    }

    /// Targets the sandbox environment.
    #[must_use]
    pub const fn with_sandbox(mut self, sandbox: bool) -> Self {
        self.sandbox = sandbox;
        self
    }

    /// Sets the number of extra attempts for retryable requests.
    #[must_use]
    pub const fn with_retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    /// Sets the delay between attempts.
    #[must_use]
    pub const fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    /// Sets a timeout for every request.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets an explicit base URL, overriding the environment and sandbox flag.
    #[must_use]
    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = Some(base_url);
        self
    }

    /// Uses a pre-configured reqwest client.
    #[must_use]
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Returns `true` when targeting the sandbox.
    #[must_use]
    pub const fn sandbox(&self) -> bool {
        self.sandbox
    }

    /// Returns the configured client id.
    #[must_use]
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// Resolves the base URL: explicit URL, then `MALGA_API_URL`, then the
    /// sandbox or production URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] if `MALGA_API_URL` is not a URL.
    pub fn base_url(&self) -> Result<Url, ConfigError> {
        self.resolve_base_url(std::env::var(API_URL_ENV).ok())
    }

    pub(crate) fn resolve_base_url(&self, env_url: Option<String>) -> Result<Url, ConfigError> {
        let raw = if let Some(url) = &self.base_url {
            url.as_str().to_owned()
        } else if let Some(url) = env_url.filter(|u| !u.is_empty()) {
            url
        } else if self.sandbox {
            SANDBOX_API_URL.to_owned()
        } else {
            PRODUCTION_API_URL.to_owned()
        };
        // A trailing slash keeps the `/v1` segment when joining paths.
        let mut normalized = raw.trim_end_matches('/').to_owned();
        normalized.push('/');
        Url::parse(&normalized).map_err(|source| ConfigError::InvalidBaseUrl {
            url: raw,
            source,
        })
    }
}

fn parse_env<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|v| v.trim().parse().ok())
}
