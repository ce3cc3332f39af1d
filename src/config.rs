// Configuration: everything the client needs is resolved once, up front,
// and passed to `GraphClient::new`. Nothing below the front end reads the
// environment on its own.

use std::fmt;
use std::time::Duration;

use url::Url;

use crate::error::{Error, Result};

pub const ACCESS_TOKEN_ENV: &str = "FACEBOOK_ACCESS_TOKEN";
pub const DEFAULT_API_BASE: &str = "https://graph.facebook.com/v18.0";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Graph API access token. Never printed: `Debug` is redacted.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Wrap a token, rejecting empty or whitespace-only values.
    pub fn new(token: impl Into<String>) -> Result<Self> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(missing_token());
        }
        Ok(Self(token))
    }

    /// Read the token from `FACEBOOK_ACCESS_TOKEN`.
    pub fn from_env() -> Result<Self> {
        Self::resolve(std::env::var(ACCESS_TOKEN_ENV).ok())
    }

    /// Same check as `from_env` for a value that was already looked up.
    pub fn resolve(token: Option<String>) -> Result<Self> {
        match token {
            Some(token) => Self::new(token),
            None => Err(missing_token()),
        }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

fn missing_token() -> Error {
    Error::Configuration(format!("{ACCESS_TOKEN_ENV} is not set"))
}

/// Settings shared by every request of a `GraphClient`.
#[derive(Debug, Clone)]
pub struct Config {
    api_base: Url,
    credential: Credential,
    timeout: Duration,
}

impl Config {
    /// Config targeting the public Graph API with the default timeout.
    pub fn new(credential: Credential) -> Result<Self> {
        let api_base = Url::parse(DEFAULT_API_BASE)
            .map_err(|err| Error::Configuration(format!("invalid API base URL: {err}")))?;
        Ok(Self {
            api_base,
            credential,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        })
    }

    /// Point the client at another API base (a different Graph version, or a
    /// local mock server).
    pub fn with_api_base(mut self, api_base: Url) -> Result<Self> {
        if api_base.cannot_be_a_base() {
            return Err(Error::Configuration(format!(
                "API base URL cannot carry a path: {api_base}"
            )));
        }
        self.api_base = api_base;
        Ok(self)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn api_base(&self) -> &Url {
        &self.api_base
    }

    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}
