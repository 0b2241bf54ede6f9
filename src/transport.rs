// HTTP transport: one blocking reqwest client per `Client`, with the fixed
// request timeout and an optional proxy.

use crate::error::{Result, TonieError};
use reqwest::blocking::Client as HttpClient;
use std::time::Duration;
use url::Url;

const PROXY_SCHEMES: &[&str] = &["http", "https", "socks5", "socks5h"];

/// Build the HTTP client. A malformed proxy is rejected here, before any
/// request is attempted.
pub fn build_http_client(timeout: Duration, proxy: Option<&str>) -> Result<HttpClient> {
    let mut builder = HttpClient::builder()
        .timeout(timeout)
        .user_agent(concat!("toniebox-rs/", env!("CARGO_PKG_VERSION")));

    if let Some(raw) = proxy {
        let url = parse_proxy_url(raw)?;
        let proxy = reqwest::Proxy::all(url.as_str()).map_err(|e| TonieError::InvalidProxy {
            url: raw.to_string(),
            reason: e.to_string(),
        })?;
        tracing::debug!(proxy = %url, "routing requests through proxy");
        builder = builder.proxy(proxy);
    }

    Ok(builder.build()?)
}

fn parse_proxy_url(raw: &str) -> Result<Url> {
    let invalid = |reason: String| TonieError::InvalidProxy {
        url: raw.to_string(),
        reason,
    };

    let url = Url::parse(raw.trim()).map_err(|e| invalid(e.to_string()))?;
    if !PROXY_SCHEMES.contains(&url.scheme()) {
        return Err(invalid(format!("unsupported scheme {:?}", url.scheme())));
    }
    if url.host_str().map_or(true, str::is_empty) {
        return Err(invalid("missing host".to_string()));
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_http_proxy() {
        let url = parse_proxy_url("http://proxy.example.com:8080").unwrap();
        assert_eq!(url.host_str(), Some("proxy.example.com"));
        assert_eq!(url.port(), Some(8080));
    }

    #[test]
    fn rejects_garbage() {
        let err = parse_proxy_url("not a url").unwrap_err();
        assert!(matches!(err, TonieError::InvalidProxy { .. }));
    }

    #[test]
    fn rejects_host_port_without_scheme() {
        // parses as scheme "localhost", which is not a proxy scheme
        let err = parse_proxy_url("localhost:8080").unwrap_err();
        assert!(matches!(err, TonieError::InvalidProxy { .. }));
    }

    #[test]
    fn build_fails_fast_on_bad_proxy() {
        let result = build_http_client(Duration::from_secs(30), Some("ftp://proxy"));
        assert!(matches!(result, Err(TonieError::InvalidProxy { .. })));
    }

    #[test]
    fn build_without_proxy() {
        assert!(build_http_client(Duration::from_secs(30), None).is_ok());
    }
}
