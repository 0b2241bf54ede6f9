// Configuration table
// -------------------
// Every URL the client talks to lives in `Endpoints`. The production values
// are fixed; tests and staging setups re-root them with `Endpoints::with_base`.
// Nothing in here is mutated after the client is built.

use std::time::Duration;

/// Identity provider token endpoint (OAuth password grant).
pub const TOKEN_URL: &str =
    "https://login.tonies.com/auth/realms/tonies/protocol/openid-connect/token";
/// Root of the versioned REST API.
pub const API_BASE_URL: &str = "https://api.tonie.cloud/v2";
/// Object storage bucket that receives presigned multipart POSTs.
pub const STORAGE_UPLOAD_URL: &str = "https://bxn-toniecloud-prod-upload.s3.amazonaws.com/";

pub const GRANT_TYPE_PASSWORD: &str = "password";
pub const CLIENT_ID: &str = "my-tonies";
pub const SCOPE_OPENID: &str = "openid";

pub const CONTENT_TYPE_JSON: &str = "application/json";

/// Applied to every request, including uploads.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Environment variable read by `ClientConfig::from_env`.
pub const PROXY_ENV: &str = "TONIEBOX_PROXY";

/// The set of URLs used by one client instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub token_url: String,
    pub api_base: String,
    pub storage_url: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Endpoints {
            token_url: TOKEN_URL.to_string(),
            api_base: API_BASE_URL.to_string(),
            storage_url: STORAGE_UPLOAD_URL.to_string(),
        }
    }
}

impl Endpoints {
    /// Point all three services at one host, using the same paths the
    /// production deployment uses below it.
    pub fn with_base(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Endpoints {
            token_url: format!("{}/auth/realms/tonies/protocol/openid-connect/token", base),
            api_base: format!("{}/v2", base),
            storage_url: format!("{}/upload/", base),
        }
    }

    pub fn me(&self) -> String {
        format!("{}/me", self.api_base)
    }

    pub fn households(&self) -> String {
        format!("{}/households", self.api_base)
    }

    pub fn creative_tonies(&self, household_id: &str) -> String {
        format!("{}/households/{}/creativetonies", self.api_base, household_id)
    }

    pub fn creative_tonie(&self, household_id: &str, tonie_id: &str) -> String {
        format!(
            "{}/households/{}/creativetonies/{}",
            self.api_base, household_id, tonie_id
        )
    }

    /// Upload credential endpoint.
    pub fn file(&self) -> String {
        format!("{}/file", self.api_base)
    }

    pub fn session(&self) -> String {
        format!("{}/sessions", self.api_base)
    }
}

/// Everything needed to build a `Client`.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub endpoints: Endpoints,
    /// Optional proxy, e.g. `http://proxy.example.com:8080`.
    pub proxy: Option<String>,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            endpoints: Endpoints::default(),
            proxy: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ClientConfig {
    /// Production endpoints, with the proxy taken from `TONIEBOX_PROXY` when
    /// that variable is set and non-empty.
    pub fn from_env() -> Self {
        let proxy = std::env::var(PROXY_ENV)
            .ok()
            .filter(|p| !p.trim().is_empty());
        ClientConfig {
            proxy,
            ..ClientConfig::default()
        }
    }

    pub fn with_proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    pub fn with_endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = endpoints;
        self
    }
}
