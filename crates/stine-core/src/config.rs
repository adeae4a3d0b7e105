//! Portal endpoint configuration.
//!
//! Every constant the remote side checks (host, endpoint path, application
//! name, cookie scope) lives here so tests can point a manager at a mock.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::StineResult;

pub const DEFAULT_HOST: &str = "https://www.stine.uni-hamburg.de";
pub const DEFAULT_ENDPOINT_PATH: &str = "/scripts/mgrqispi.dll";
pub const DEFAULT_APP_NAME: &str = "CampusNet";
pub const DEFAULT_COOKIE_PATH: &str = "/scripts";
pub const DEFAULT_COOKIE_NAME: &str = "cnsc";
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Connection settings for one portal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortalConfig {
    /// Scheme and host, without a trailing slash.
    #[serde(default = "default_host")]
    pub host: String,

    /// Path of the single form endpoint.
    #[serde(default = "default_endpoint_path")]
    pub endpoint_path: String,

    /// Value sent as `APPNAME` on every request.
    #[serde(default = "default_app_name")]
    pub app_name: String,

    /// Path the session cookie is scoped to.
    #[serde(default = "default_cookie_path")]
    pub cookie_path: String,

    /// Name of the session cookie.
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,

    /// Total request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            endpoint_path: default_endpoint_path(),
            app_name: default_app_name(),
            cookie_path: default_cookie_path(),
            cookie_name: default_cookie_name(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_endpoint_path() -> String {
    DEFAULT_ENDPOINT_PATH.to_string()
}

fn default_app_name() -> String {
    DEFAULT_APP_NAME.to_string()
}

fn default_cookie_path() -> String {
    DEFAULT_COOKIE_PATH.to_string()
}

fn default_cookie_name() -> String {
    DEFAULT_COOKIE_NAME.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl PortalConfig {
    /// Same defaults, different host. Handy for tests.
    pub fn with_host(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            ..Default::default()
        }
    }

    fn base(&self) -> &str {
        self.host.trim_end_matches('/')
    }

    /// Full URL of the form endpoint.
    pub fn endpoint_url(&self) -> StineResult<Url> {
        Ok(Url::parse(&format!("{}{}", self.base(), self.endpoint_path))?)
    }

    /// URL the session cookie is stored under.
    pub fn cookie_url(&self) -> StineResult<Url> {
        Ok(Url::parse(&format!("{}{}", self.base(), self.cookie_path))?)
    }

    /// Value of the `Origin` header: the bare host.
    pub fn origin(&self) -> String {
        self.base().to_string()
    }

    /// Value of the `Referer` header: host plus `/`.
    pub fn referer(&self) -> String {
        format!("{}/", self.base())
    }

    /// Turn a host-relative path from a response into an absolute URL.
    ///
    /// The path is appended verbatim; no normalization.
    pub fn absolute(&self, path: &str) -> String {
        format!("{}{}", self.base(), path)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
