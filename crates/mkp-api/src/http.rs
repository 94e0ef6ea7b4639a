//! reqwest implementation of [`MarketplaceBackend`].
//!
//! Every response is read as text first, then decoded into the envelope, so a
//! non-JSON error page still yields a useful `Http { status, message }`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Method, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;
use uuid::Uuid;

use mkp_schemas::{
    Ack, ApiEnvelope, ContractActionRequest, LicenseActionRequest, Order, OrderStatusUpdate,
    PaymentSlip, PaymentSlipUpdate, UserLicense, WonBid,
};

use crate::backend::MarketplaceBackend;
use crate::error::ApiError;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

#[derive(Debug, Clone)]
pub struct HttpBackend {
    http: reqwest::Client,
    base: Url,
    token: Option<String>,
}

impl HttpBackend {
    pub fn new(
        base_url: &str,
        timeout: Duration,
        token: Option<String>,
    ) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Transport(format!("http client build failed: {e}")))?;
        Self::with_client(http, base_url, token)
    }

    pub fn with_client(
        http: reqwest::Client,
        base_url: &str,
        token: Option<String>,
    ) -> Result<Self, ApiError> {
        let base = Url::parse(base_url.trim())
            .map_err(|e| ApiError::Transport(format!("invalid base url '{base_url}': {e}")))?;
        if base.cannot_be_a_base() {
            return Err(ApiError::Transport(format!(
                "invalid base url '{base_url}': cannot be a base"
            )));
        }
        Ok(Self {
            http,
            base,
            token: token.filter(|t| !t.trim().is_empty()),
        })
    }

    fn url(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::Transport("base url cannot take path segments".to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Send one request and return the body text of a 2xx response.
    async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        segments: &[&str],
        body: Option<&B>,
    ) -> Result<String, ApiError> {
        let url = self.url(segments)?;
        let request_id = Uuid::new_v4().to_string();
        debug!(%method, path = url.path(), %request_id, "mkp api request");

        let mut req = self
            .http
            .request(method, url)
            .header(REQUEST_ID_HEADER, &request_id);
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }
        if let Some(b) = body {
            req = req.json(b);
        }

        let resp = req
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| ApiError::Transport(format!("response body read failed: {e}")))?;
        debug!(status = status.as_u16(), %request_id, "mkp api response");

        if !status.is_success() {
            return Err(ApiError::Http {
                status: status.as_u16(),
                message: error_message(status, &text),
            });
        }
        Ok(text)
    }

    async fn get_data<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, ApiError> {
        let text = self.send::<()>(Method::GET, segments, None).await?;
        let env: ApiEnvelope<T> = decode_envelope(&text)?;
        if !env.success {
            return Err(ApiError::Rejected {
                message: env.message_or_unknown(),
            });
        }
        env.data
            .ok_or_else(|| ApiError::Decode("response has no data".to_string()))
    }

    async fn patch_ack<B: Serialize>(&self, segments: &[&str], body: &B) -> Result<Ack, ApiError> {
        let text = self.send(Method::PATCH, segments, Some(body)).await?;
        if text.trim().is_empty() {
            return Ok(Ack::default());
        }
        let env: ApiEnvelope<Value> = decode_envelope(&text)?;
        if !env.success {
            return Err(ApiError::Rejected {
                message: env.message_or_unknown(),
            });
        }
        Ok(Ack {
            message: env.message,
        })
    }
}

fn decode_envelope<T: DeserializeOwned>(text: &str) -> Result<ApiEnvelope<T>, ApiError> {
    serde_json::from_str(text).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Prefer the envelope message, then the raw body, then the reason phrase.
fn error_message(status: reqwest::StatusCode, text: &str) -> String {
    if let Ok(env) = serde_json::from_str::<ApiEnvelope<Value>>(text) {
        if let Some(m) = env.message.as_deref().map(str::trim).filter(|m| !m.is_empty()) {
            return m.to_string();
        }
    }
    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(text) {
        if let Some(m) = map.get("message").and_then(Value::as_str) {
            return m.to_string();
        }
    }
    let trimmed = text.trim();
    if !trimmed.is_empty() {
        return trimmed.to_string();
    }
    status
        .canonical_reason()
        .unwrap_or("request failed")
        .to_string()
}

#[async_trait]
impl MarketplaceBackend for HttpBackend {
    async fn fetch_order(&self, order_id: &str) -> Result<Order, ApiError> {
        self.get_data(&["orders", order_id]).await
    }

    async fn update_order_status(&self, req: &OrderStatusUpdate) -> Result<Ack, ApiError> {
        self.patch_ack(&["orders", "status"], req).await
    }

    async fn fetch_won_bid(&self, won_bid_id: &str) -> Result<WonBid, ApiError> {
        self.get_data(&["won-bids", won_bid_id]).await
    }

    async fn contract_action(&self, req: &ContractActionRequest) -> Result<Ack, ApiError> {
        self.patch_ack(&["won-bids", "contract-action"], req).await
    }

    async fn fetch_payment_slip(&self, slip_id: &str) -> Result<PaymentSlip, ApiError> {
        self.get_data(&["payment-slips", slip_id]).await
    }

    async fn update_payment_slip(&self, req: &PaymentSlipUpdate) -> Result<Ack, ApiError> {
        self.patch_ack(&["payment-slips", "status"], req).await
    }

    async fn fetch_user_license(&self, user_id: &str) -> Result<UserLicense, ApiError> {
        self.get_data(&["users", user_id, "license"]).await
    }

    async fn license_action(&self, req: &LicenseActionRequest) -> Result<Ack, ApiError> {
        self.patch_ack(&["users", "license-action"], req).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backend(base: &str) -> HttpBackend {
        HttpBackend::new(base, Duration::from_secs(5), None).unwrap()
    }

    #[test]
    fn url_appends_segments_after_base_path() {
        let b = backend("https://api.mkp.test/v1/");
        let url = b.url(&["users", "u-1", "license"]).unwrap();
        assert_eq!(url.as_str(), "https://api.mkp.test/v1/users/u-1/license");
    }

    #[test]
    fn url_percent_encodes_ids() {
        let b = backend("https://api.mkp.test");
        let url = b.url(&["orders", "a/b"]).unwrap();
        assert_eq!(url.path(), "/orders/a%2Fb");
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let err = HttpBackend::new("not a url", Duration::from_secs(1), None).unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
    }

    #[test]
    fn blank_token_is_treated_as_absent() {
        let b = HttpBackend::new(
            "https://api.mkp.test",
            Duration::from_secs(1),
            Some("   ".to_string()),
        )
        .unwrap();
        assert!(b.token.is_none());
    }

    #[test]
    fn error_message_prefers_envelope_then_body_then_reason() {
        let s = reqwest::StatusCode::BAD_REQUEST;
        assert_eq!(
            error_message(s, r#"{"success":false,"message":"slip locked"}"#),
            "slip locked"
        );
        assert_eq!(error_message(s, "upstream exploded"), "upstream exploded");
        assert_eq!(error_message(s, ""), "Bad Request");
    }
}
