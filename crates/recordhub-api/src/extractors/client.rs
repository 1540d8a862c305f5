//! Source address and client type resolution.

use std::convert::Infallible;
use std::net::{IpAddr, SocketAddr};

use axum::extract::{ConnectInfo, FromRequestParts};
use axum::http::request::Parts;
use axum::http::{Extensions, HeaderMap};

use recordhub_core::error::AppError;
use recordhub_core::types::ClientType;

use crate::state::AppState;

/// Header naming the calling application category.
pub const CLIENT_TYPE_HEADER: &str = "x-client-type";

/// Source address of the request.
///
/// The socket peer is the client unless it is one of `trusted_proxies`. In
/// that case `X-Forwarded-For` is walked from the right, skipping trusted
/// hops, and the first untrusted entry is the client. Entries to its left
/// were written by the client and are never used.
pub fn resolve_client_ip(
    headers: &HeaderMap,
    extensions: &Extensions,
    trusted_proxies: &[IpAddr],
) -> Option<IpAddr> {
    let peer = extensions
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip())?;

    if !trusted_proxies.contains(&peer) {
        return Some(peer);
    }

    let forwarded = headers
        .get_all("x-forwarded-for")
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(','))
        .map(str::trim)
        .collect::<Vec<_>>();

    let mut client = peer;
    for hop in forwarded.into_iter().rev() {
        match hop.parse::<IpAddr>() {
            Ok(ip) if trusted_proxies.contains(&ip) => client = ip,
            Ok(ip) => return Some(ip),
            // Garbage in the chain; stop at the last hop we could vouch for.
            Err(_) => break,
        }
    }
    Some(client)
}

/// Client type from `X-Client-Type`, defaulting to web when absent.
pub fn client_type_from_headers(headers: &HeaderMap) -> Result<ClientType, AppError> {
    match headers.get(CLIENT_TYPE_HEADER) {
        None => Ok(ClientType::default()),
        Some(value) => value
            .to_str()
            .map_err(|_| AppError::validation("Invalid X-Client-Type header"))?
            .parse(),
    }
}

/// Extracted source address, `None` when it cannot be determined.
#[derive(Debug, Clone, Copy)]
pub struct ClientIp(pub Option<IpAddr>);

impl FromRequestParts<AppState> for ClientIp {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(ClientIp(resolve_client_ip(
            &parts.headers,
            &parts.extensions,
            &state.config.server.trusted_proxies,
        )))
    }
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    fn peer(addr: &str) -> Extensions {
        let mut extensions = Extensions::new();
        extensions.insert(ConnectInfo::<SocketAddr>(addr.parse().unwrap()));
        extensions
    }

    fn forwarded(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static(value));
        headers
    }

    fn proxies() -> Vec<IpAddr> {
        vec!["10.0.0.1".parse().unwrap(), "10.0.0.2".parse().unwrap()]
    }

    #[test]
    fn test_untrusted_peer_ignores_forwarded_for() {
        let ip = resolve_client_ip(
            &forwarded("1.2.3.4"),
            &peer("198.51.100.7:5555"),
            &proxies(),
        );
        assert_eq!(ip, Some("198.51.100.7".parse().unwrap()));
    }

    #[test]
    fn test_no_trusted_proxies_uses_peer() {
        let ip = resolve_client_ip(&forwarded("1.2.3.4"), &peer("10.0.0.1:5555"), &[]);
        assert_eq!(ip, Some("10.0.0.1".parse().unwrap()));
    }

    #[test]
    fn test_trusted_peer_takes_rightmost_untrusted_hop() {
        let ip = resolve_client_ip(
            &forwarded("1.2.3.4, 203.0.113.9, 10.0.0.2"),
            &peer("10.0.0.1:443"),
            &proxies(),
        );
        assert_eq!(ip, Some("203.0.113.9".parse().unwrap()));
    }

    #[test]
    fn test_trusted_peer_without_header_is_the_client() {
        let ip = resolve_client_ip(&HeaderMap::new(), &peer("10.0.0.1:443"), &proxies());
        assert_eq!(ip, Some("10.0.0.1".parse().unwrap()));
    }

    #[test]
    fn test_malformed_hop_stops_the_walk() {
        let ip = resolve_client_ip(
            &forwarded("203.0.113.9, not-an-ip, 10.0.0.2"),
            &peer("10.0.0.1:443"),
            &proxies(),
        );
        assert_eq!(ip, Some("10.0.0.2".parse().unwrap()));
    }

    #[test]
    fn test_unknown_address() {
        assert_eq!(
            resolve_client_ip(&forwarded("1.2.3.4"), &Extensions::new(), &proxies()),
            None
        );
    }

    #[test]
    fn test_client_type_header() {
        let mut headers = HeaderMap::new();
        assert_eq!(client_type_from_headers(&headers).unwrap(), ClientType::Web);

        headers.insert(CLIENT_TYPE_HEADER, HeaderValue::from_static("mobile"));
        assert_eq!(
            client_type_from_headers(&headers).unwrap(),
            ClientType::Mobile
        );

        headers.insert(CLIENT_TYPE_HEADER, HeaderValue::from_static("fridge"));
        assert!(client_type_from_headers(&headers).is_err());
    }
}
