//! # Generation Dispatcher
//!
//! Issues the request against the remote generation service and interprets
//! the HTTP outcome. Success is a non-empty binary body; everything else
//! (non-2xx status, empty body, transport failure) collapses into a single
//! failure signal carrying a human-readable message. The dispatcher never
//! retries; retry policy, if any, belongs to the caller.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::error::FaroError;
use crate::options::CommonOptions;
use crate::request::RequestParams;
use crate::schema::QrType;

/// Raw HTTP outcome before interpretation.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

/// Transport seam for the generation endpoint. The real implementation
/// speaks HTTP; tests substitute scripted responses.
#[async_trait]
pub trait QrTransport: Send + Sync {
    async fn fetch(
        &self,
        endpoint: &str,
        params: &[(String, String)],
    ) -> Result<TransportResponse, FaroError>;
}

/// reqwest-backed transport against a live service.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }
}

#[async_trait]
impl QrTransport for HttpTransport {
    async fn fetch(
        &self,
        endpoint: &str,
        params: &[(String, String)],
    ) -> Result<TransportResponse, FaroError> {
        let url = format!("{}/v1/qr/{}/", self.base_url, endpoint);
        let response = self
            .client
            .get(&url)
            .query(params)
            .send()
            .await
            .map_err(|e| FaroError::Network(format!("request to {url} failed: {e}")))?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| FaroError::Network(format!("failed to read response body: {e}")))?
            .to_vec();

        Ok(TransportResponse { status, body })
    }
}

/// Structured error payload failure responses may carry.
#[derive(Debug, Deserialize)]
struct ErrorDetail {
    detail: String,
}

/// Dispatches generation requests, merging per-type parameters with the
/// session's common options.
pub struct Dispatcher {
    transport: Box<dyn QrTransport>,
}

impl Dispatcher {
    pub fn new(transport: Box<dyn QrTransport>) -> Self {
        Self { transport }
    }

    /// Dispatcher against a live HTTP service at `base_url`.
    pub fn over_http(base_url: impl Into<String>) -> Self {
        Self::new(Box::new(HttpTransport::new(base_url)))
    }

    /// Request a generated image for `ty`.
    ///
    /// Common options are additive; a per-type parameter with the same
    /// name takes precedence. Returns the raw image bytes on success.
    pub async fn generate(
        &self,
        ty: QrType,
        params: RequestParams,
        common: &CommonOptions,
    ) -> Result<Vec<u8>, FaroError> {
        let mut merged = common.clone();
        merged.extend(params);
        let query: Vec<(String, String)> = merged.into_iter().collect();

        debug!(qr_type = %ty, params = query.len(), "dispatching generation request");
        let response = self.transport.fetch(ty.endpoint(), &query).await?;

        if !(200..300).contains(&response.status) {
            return Err(FaroError::Network(failure_message(
                response.status,
                &response.body,
            )));
        }
        if response.body.is_empty() {
            return Err(FaroError::EmptyResponse);
        }
        Ok(response.body)
    }
}

fn failure_message(status: u16, body: &[u8]) -> String {
    match serde_json::from_slice::<ErrorDetail>(body) {
        Ok(err) => format!("generation failed ({status}): {}", err.detail),
        Err(_) => format!("generation failed with status {status}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    type SeenRequests = Arc<Mutex<Vec<(String, Vec<(String, String)>)>>>;

    /// Replays one scripted response and records the request it was asked.
    struct ScriptedTransport {
        response: Mutex<Option<Result<TransportResponse, FaroError>>>,
        seen: SeenRequests,
    }

    impl ScriptedTransport {
        fn new(response: Result<TransportResponse, FaroError>) -> (Box<Self>, SeenRequests) {
            let seen = SeenRequests::default();
            let transport = Box::new(Self {
                response: Mutex::new(Some(response)),
                seen: seen.clone(),
            });
            (transport, seen)
        }
    }

    #[async_trait]
    impl QrTransport for ScriptedTransport {
        async fn fetch(
            &self,
            endpoint: &str,
            params: &[(String, String)],
        ) -> Result<TransportResponse, FaroError> {
            self.seen
                .lock()
                .unwrap()
                .push((endpoint.to_string(), params.to_vec()));
            self.response.lock().unwrap().take().unwrap()
        }
    }

    fn ok_response(body: &[u8]) -> Result<TransportResponse, FaroError> {
        Ok(TransportResponse {
            status: 200,
            body: body.to_vec(),
        })
    }

    fn params(pairs: &[(&str, &str)]) -> RequestParams {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[tokio::test]
    async fn test_success_returns_body_bytes() {
        let (transport, _) = ScriptedTransport::new(ok_response(b"png-bytes"));
        let dispatcher = Dispatcher::new(transport);
        let bytes = dispatcher
            .generate(QrType::Url, params(&[("url", "http://x")]), &CommonOptions::new())
            .await
            .unwrap();
        assert_eq!(bytes, b"png-bytes");
    }

    #[tokio::test]
    async fn test_non_2xx_carries_detail_message() {
        let (transport, _) = ScriptedTransport::new(Ok(TransportResponse {
            status: 400,
            body: br#"{"detail": "Missing required parameters: ssid"}"#.to_vec(),
        }));
        let dispatcher = Dispatcher::new(transport);
        let err = dispatcher
            .generate(QrType::Wifi, RequestParams::new(), &CommonOptions::new())
            .await
            .unwrap_err();
        match err {
            FaroError::Network(message) => {
                assert!(message.contains("Missing required parameters: ssid"));
                assert!(message.contains("400"));
            }
            other => panic!("expected network error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_non_2xx_without_detail_uses_status() {
        let (transport, _) = ScriptedTransport::new(Ok(TransportResponse {
            status: 502,
            body: b"<html>bad gateway</html>".to_vec(),
        }));
        let dispatcher = Dispatcher::new(transport);
        let err = dispatcher
            .generate(QrType::Url, RequestParams::new(), &CommonOptions::new())
            .await
            .unwrap_err();
        assert!(matches!(err, FaroError::Network(m) if m.contains("502")));
    }

    #[tokio::test]
    async fn test_empty_success_body_is_a_failure() {
        let (transport, _) = ScriptedTransport::new(ok_response(b""));
        let dispatcher = Dispatcher::new(transport);
        let err = dispatcher
            .generate(QrType::Url, RequestParams::new(), &CommonOptions::new())
            .await
            .unwrap_err();
        assert!(matches!(err, FaroError::EmptyResponse));
    }

    #[tokio::test]
    async fn test_per_type_params_win_over_common_options() {
        let (transport, seen) = ScriptedTransport::new(ok_response(b"ok"));
        let dispatcher = Dispatcher::new(transport);
        let common: CommonOptions = [
            ("fill_color".to_string(), "black".to_string()),
            ("ssid".to_string(), "stale".to_string()),
        ]
        .into_iter()
        .collect();

        dispatcher
            .generate(QrType::Wifi, params(&[("ssid", "Home")]), &common)
            .await
            .unwrap();

        let requests = seen.lock().unwrap();
        let (endpoint, sent) = &requests[0];
        assert_eq!(endpoint, "wifi");
        let ssid: Vec<&str> = sent
            .iter()
            .filter(|(k, _)| k == "ssid")
            .map(|(_, v)| v.as_str())
            .collect();
        assert_eq!(ssid, vec!["Home"]);
        assert!(sent.iter().any(|(k, v)| k == "fill_color" && v == "black"));
    }

    #[tokio::test]
    async fn test_phone_uses_phonenumber_endpoint() {
        let (transport, seen) = ScriptedTransport::new(ok_response(b"ok"));
        let dispatcher = Dispatcher::new(transport);
        dispatcher
            .generate(
                QrType::Phone,
                params(&[("phone_number", "123")]),
                &CommonOptions::new(),
            )
            .await
            .unwrap();
        assert_eq!(seen.lock().unwrap()[0].0, "phonenumber");
    }
}
