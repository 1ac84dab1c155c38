//! HTTP client for the storefront API.
//!
//! Used by frontends written in Rust and by the integration tests.
//!
//! # Example
//!
//! ```rust,ignore
//! let client = ApiClient::new("http://localhost:8000");
//! let body = client.apply_coupon("SAVE10", Decimal::from(1499)).await?;
//! if body["success"] == true {
//!     println!("final amount: {}", body["finalAmount"]);
//! }
//! ```

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;

/// Path of the coupon endpoint, relative to the API base URL.
pub const APPLY_COUPON_PATH: &str = "/api/apply-coupon";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ApplyCouponRequest<'a> {
    code: &'a str,
    #[serde(with = "rust_decimal::serde::float")]
    cart_total: Decimal,
}

/// Client for the storefront JSON API.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for the API served at `base_url`.
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Create a client reusing an existing `reqwest::Client` (cookie store,
    /// timeouts).
    #[must_use]
    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            inner: Arc::new(ApiClientInner {
                client,
                base_url: base_url.trim_end_matches('/').to_owned(),
            }),
        }
    }

    /// Ask the server to apply a coupon to a cart total.
    ///
    /// Returns the decoded response body as-is, for success and error
    /// statuses alike: `{success: true, discount, finalAmount}` or
    /// `{success: false, message}`.
    ///
    /// # Errors
    ///
    /// Returns the `reqwest::Error` if the request cannot be sent or the body
    /// is not JSON.
    pub async fn apply_coupon(
        &self,
        code: &str,
        cart_total: Decimal,
    ) -> Result<Value, reqwest::Error> {
        self.inner
            .client
            .post(format!("{}{APPLY_COUPON_PATH}", self.inner.base_url))
            .json(&ApplyCouponRequest { code, cart_total })
            .send()
            .await?
            .json()
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_shape() {
        let body = ApplyCouponRequest {
            code: "SAVE10",
            cart_total: Decimal::new(149_950, 2),
        };
        assert_eq!(
            serde_json::to_value(&body).ok(),
            Some(serde_json::json!({"code": "SAVE10", "cartTotal": 1499.5}))
        );
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = ApiClient::new("http://localhost:8000/");
        assert_eq!(client.inner.base_url, "http://localhost:8000");
    }
}
