//! Request country resolution.
//!
//! A request's country code is resolved in priority order:
//!
//! 1. an explicit `?country=` query value, when present and non-empty;
//! 2. the client IP (first `X-Forwarded-For` entry, else the peer address),
//!    looked up against an external geolocation service;
//! 3. the configured default code.
//!
//! Lookup failures are logged and recovered - resolution always produces a
//! lowercase code, never an error.

use crate::config::CountryConfig;
use axum::{extract::ConnectInfo, extract::FromRequestParts, http::request::Parts};
use serde::Deserialize;
use std::convert::Infallible;
use std::net::{IpAddr, SocketAddr};
use tracing::{debug, instrument, warn};
use url::Url;

const X_FORWARDED_FOR: &str = "x-forwarded-for";

/// The client IP a request appears to originate from.
///
/// Prefers the first address in `X-Forwarded-For`; falls back to the socket
/// peer address when the header is absent or unparseable. `None` when neither
/// is available (e.g., in-process test servers without connect info).
#[derive(Debug, Clone, Copy)]
pub struct ClientIp(pub Option<IpAddr>);

impl<S> FromRequestParts<S> for ClientIp
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let forwarded = parts
            .headers
            .get(X_FORWARDED_FOR)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.split(',').next())
            .and_then(|first| first.trim().parse::<IpAddr>().ok());

        let peer = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip());

        Ok(Self(forwarded.or(peer)))
    }
}

/// Shape of the geolocation service's JSON body; only the code is read.
#[derive(Debug, Deserialize)]
struct GeoResponse {
    country_code: Option<String>,
}

/// Resolves a lowercase ISO country code for a request.
#[derive(Clone)]
pub struct CountryResolver {
    default_code: String,
    lookup_enabled: bool,
    base_url: Url,
    client: reqwest::Client,
}

impl CountryResolver {
    pub fn new(config: &CountryConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(config.geolocation.timeout).build()?;

        Ok(Self {
            default_code: config.default_code.clone(),
            lookup_enabled: config.geolocation.enabled,
            base_url: config.geolocation.base_url.clone(),
            client,
        })
    }

    /// The configured fallback code.
    pub fn default_code(&self) -> &str {
        &self.default_code
    }

    /// Resolve a country code, always lowercase, never failing.
    ///
    /// `explicit` is the raw `?country=` value; it wins whenever it is
    /// non-empty after trimming.
    #[instrument(skip(self), fields(default = %self.default_code))]
    pub async fn resolve(&self, explicit: Option<&str>, client_ip: Option<IpAddr>) -> String {
        if let Some(country) = explicit {
            let country = country.trim().to_lowercase();
            if !country.is_empty() {
                return country;
            }
        }

        match client_ip {
            Some(ip) if !ip.is_loopback() && self.lookup_enabled => match self.lookup(ip).await {
                Ok(Some(code)) => return code,
                Ok(None) => debug!(%ip, "geolocation response had no country code"),
                Err(error) => warn!(%ip, "geolocation lookup failed: {error:#}"),
            },
            Some(ip) => debug!(%ip, "skipping geolocation lookup"),
            None => debug!("no client address available for geolocation"),
        }

        self.default_code.clone()
    }

    /// Query the external service for an IP's country code.
    async fn lookup(&self, ip: IpAddr) -> anyhow::Result<Option<String>> {
        let url = format!("{}/{}/json/", self.base_url.as_str().trim_end_matches('/'), ip);

        let response = self.client.get(&url).send().await?.error_for_status()?;
        let geo: GeoResponse = response.json().await?;

        Ok(geo
            .country_code
            .map(|code| code.trim().to_lowercase())
            .filter(|code| !code.is_empty()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GeolocationConfig;
    use axum::http::Request;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn resolver_with(base_url: &str, enabled: bool) -> CountryResolver {
        let config = CountryConfig {
            default_code: "gh".to_string(),
            geolocation: GeolocationConfig {
                enabled,
                base_url: base_url.parse().unwrap(),
                timeout: std::time::Duration::from_secs(2),
            },
        };
        CountryResolver::new(&config).unwrap()
    }

    async fn extract_client_ip(request: Request<()>) -> ClientIp {
        let (mut parts, _) = request.into_parts();
        ClientIp::from_request_parts(&mut parts, &()).await.unwrap()
    }

    #[tokio::test]
    async fn test_explicit_country_beats_lookup() {
        // No mock server running: a lookup attempt would error out
        let resolver = resolver_with("http://127.0.0.1:9", true);
        let resolved = resolver.resolve(Some("NG"), Some("203.0.113.10".parse().unwrap())).await;
        assert_eq!(resolved, "ng");
    }

    #[tokio::test]
    async fn test_blank_explicit_value_is_ignored() {
        let resolver = resolver_with("http://127.0.0.1:9", false);
        let resolved = resolver.resolve(Some("   "), None).await;
        assert_eq!(resolved, "gh");
    }

    #[tokio::test]
    async fn test_loopback_skips_lookup_and_defaults() {
        let resolver = resolver_with("http://127.0.0.1:9", true);
        let resolved = resolver.resolve(None, Some("127.0.0.1".parse().unwrap())).await;
        assert_eq!(resolved, "gh");
    }

    #[tokio::test]
    async fn test_lookup_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/203.0.113.10/json/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "ip": "203.0.113.10",
                "country_code": "DE",
                "country_name": "Germany"
            })))
            .mount(&server)
            .await;

        let resolver = resolver_with(&server.uri(), true);
        let resolved = resolver.resolve(None, Some("203.0.113.10".parse().unwrap())).await;
        assert_eq!(resolved, "de");
    }

    #[tokio::test]
    async fn test_lookup_failure_falls_back_to_default() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let resolver = resolver_with(&server.uri(), true);
        let resolved = resolver.resolve(None, Some("203.0.113.10".parse().unwrap())).await;
        assert_eq!(resolved, "gh");
    }

    #[tokio::test]
    async fn test_lookup_without_country_code_falls_back() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "ip": "203.0.113.10" })))
            .mount(&server)
            .await;

        let resolver = resolver_with(&server.uri(), true);
        let resolved = resolver.resolve(None, Some("203.0.113.10".parse().unwrap())).await;
        assert_eq!(resolved, "gh");
    }

    #[tokio::test]
    async fn test_client_ip_prefers_forwarded_header() {
        let request = Request::builder()
            .header("x-forwarded-for", "198.51.100.7, 10.0.0.1")
            .body(())
            .unwrap();
        let ClientIp(ip) = extract_client_ip(request).await;
        assert_eq!(ip, Some("198.51.100.7".parse().unwrap()));
    }

    #[tokio::test]
    async fn test_client_ip_falls_back_to_peer_address() {
        let mut request = Request::builder().body(()).unwrap();
        request
            .extensions_mut()
            .insert(ConnectInfo::<SocketAddr>("192.0.2.4:50000".parse().unwrap()));
        let ClientIp(ip) = extract_client_ip(request).await;
        assert_eq!(ip, Some("192.0.2.4".parse().unwrap()));
    }

    #[tokio::test]
    async fn test_client_ip_none_when_unavailable() {
        let request = Request::builder().body(()).unwrap();
        let ClientIp(ip) = extract_client_ip(request).await;
        assert_eq!(ip, None);
    }
}
