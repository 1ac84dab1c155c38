//! Rate limiting middleware using governor and `tower_governor`.
//!
//! - `auth_rate_limiter`: strict limits for login and registration (~10/min)
//! - `api_rate_limiter`: relaxed limits for the rest of the API (~100/min)

use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use axum::extract::ConnectInfo;
use axum::http::Request;
use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use tower_governor::{GovernorError, GovernorLayer, governor::GovernorConfigBuilder};

/// Headers consulted for the client address, in order.
const FORWARDED_HEADERS: &[&str] = &["x-forwarded-for", "x-real-ip"];

/// Key extractor for the client address.
///
/// Keys on the peer address unless `trust_forwarded` is set, in which case
/// `X-Forwarded-For` and then `X-Real-IP` win. Clients can set those headers
/// freely, so trust them only behind a proxy that overwrites both.
///
/// The server must be started with
/// `into_make_service_with_connect_info::<SocketAddr>()`.
#[derive(Clone, Copy, Debug, Default)]
pub struct ClientIpKeyExtractor {
    pub trust_forwarded: bool,
}

impl tower_governor::key_extractor::KeyExtractor for ClientIpKeyExtractor {
    type Key = IpAddr;

    fn extract<T>(&self, req: &Request<T>) -> Result<Self::Key, GovernorError> {
        if self.trust_forwarded {
            let headers = req.headers();
            for name in FORWARDED_HEADERS {
                // X-Forwarded-For lists the original client first
                if let Some(ip) = headers
                    .get(*name)
                    .and_then(|v| v.to_str().ok())
                    .and_then(|s| s.split(',').next())
                    .and_then(|s| s.trim().parse::<IpAddr>().ok())
                {
                    return Ok(ip);
                }
            }
        }

        req.extensions()
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip())
            .ok_or(GovernorError::UnableToExtractKey)
    }
}

/// Rate limiter layer type for Axum.
pub type RateLimiterLayer =
    GovernorLayer<ClientIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body>;

/// Create rate limiter for auth endpoints: ~10 requests per minute per IP.
///
/// Configuration: 1 request every 6 seconds (replenish), burst of 5.
///
/// # Panics
///
/// Does not panic: `per_second(6)` and `burst_size(5)` are always accepted
/// by `GovernorConfigBuilder`.
#[must_use]
pub fn auth_rate_limiter(trust_forwarded: bool) -> RateLimiterLayer {
    let config = GovernorConfigBuilder::default()
        .key_extractor(ClientIpKeyExtractor { trust_forwarded })
        .per_second(6)
        .burst_size(5)
        .finish()
        .expect("rate limiter config with per_second(6) and burst_size(5) is valid");
    GovernorLayer::new(Arc::new(config))
}

/// Create rate limiter for general API: ~100 requests per minute per IP.
///
/// Configuration: 1 request per second (replenish), burst of 50.
///
/// # Panics
///
/// Does not panic: `per_second(1)` and `burst_size(50)` are always accepted
/// by `GovernorConfigBuilder`.
#[must_use]
pub fn api_rate_limiter(trust_forwarded: bool) -> RateLimiterLayer {
    let config = GovernorConfigBuilder::default()
        .key_extractor(ClientIpKeyExtractor { trust_forwarded })
        .per_second(1)
        .burst_size(50)
        .finish()
        .expect("rate limiter config with per_second(1) and burst_size(50) is valid");
    GovernorLayer::new(Arc::new(config))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tower_governor::key_extractor::KeyExtractor;

    const TRUSTED: ClientIpKeyExtractor = ClientIpKeyExtractor {
        trust_forwarded: true,
    };
    const DIRECT: ClientIpKeyExtractor = ClientIpKeyExtractor {
        trust_forwarded: false,
    };

    fn request() -> axum::http::request::Builder {
        Request::builder().uri("/api/apply-coupon")
    }

    fn peer() -> ConnectInfo<SocketAddr> {
        ConnectInfo("198.51.100.4:5123".parse::<SocketAddr>().unwrap())
    }

    #[test]
    fn test_forwarded_for_takes_first_hop() {
        let req = request()
            .header("x-forwarded-for", "203.0.113.7, 10.0.0.1")
            .body(())
            .unwrap();
        assert_eq!(
            TRUSTED.extract(&req).unwrap(),
            "203.0.113.7".parse::<IpAddr>().unwrap()
        );
    }

    #[test]
    fn test_falls_back_to_connect_info() {
        let mut req = request().body(()).unwrap();
        req.extensions_mut().insert(peer());
        assert_eq!(
            TRUSTED.extract(&req).unwrap(),
            "198.51.100.4".parse::<IpAddr>().unwrap()
        );
    }

    #[test]
    fn test_untrusted_forwarded_headers_are_ignored() {
        let mut req = request()
            .header("x-forwarded-for", "203.0.113.7")
            .header("x-real-ip", "203.0.113.8")
            .body(())
            .unwrap();
        req.extensions_mut().insert(peer());
        assert_eq!(
            DIRECT.extract(&req).unwrap(),
            "198.51.100.4".parse::<IpAddr>().unwrap()
        );
        assert_eq!(
            ClientIpKeyExtractor::default().extract(&req).unwrap(),
            DIRECT.extract(&req).unwrap()
        );
    }

    #[test]
    fn test_no_address_is_an_error() {
        let req = request().header("x-real-ip", "not-an-ip").body(()).unwrap();
        assert!(TRUSTED.extract(&req).is_err());
        assert!(DIRECT.extract(&req).is_err());
    }
}
