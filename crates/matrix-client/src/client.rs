//! HTTP client for the analysis endpoints.

use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT};
use reqwest::multipart::{Form, Part};

use crate::backend::Backend;
use crate::config::{ClientConfig, join_url};
use crate::error::{ClientError, Result};
use crate::request::{AnalysisRequest, Payload};

/// User agent string for API requests.
const USER_AGENT_VALUE: &str = concat!("matrix-cli/", env!("CARGO_PKG_VERSION"));

/// Builds the shared `reqwest` client used by the analysis and game clients.
pub(crate) fn build_http_client(config: &ClientConfig) -> Result<reqwest::Client> {
    config.validate()?;

    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));

    reqwest::Client::builder()
        .default_headers(headers)
        .timeout(config.timeout())
        .build()
        .map_err(|e| ClientError::network(format!("failed to create HTTP client: {e}")))
}

/// Client for the verification backend's analysis endpoints.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        Ok(Self {
            client: build_http_client(config)?,
            base_url: config.api_url.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL of the endpoint serving `request`.
    pub fn endpoint_url(&self, request: &AnalysisRequest) -> String {
        join_url(&self.base_url, request.kind.endpoint())
    }

    /// Runs one analysis and returns the raw response body.
    pub async fn analyze(&self, request: &AnalysisRequest) -> Result<Vec<u8>> {
        let url = self.endpoint_url(request);
        tracing::debug!(kind = %request.kind, payload = ?request.payload, "POST {}", url);

        let builder = self.client.post(&url);
        let builder = match &request.payload {
            Payload::File {
                name,
                media_type,
                bytes,
            } => {
                let part = Part::bytes(bytes.clone())
                    .file_name(name.clone())
                    .mime_str(media_type)
                    .map_err(|e| {
                        ClientError::InvalidRequest(format!("media type {media_type}: {e}"))
                    })?;
                builder.multipart(Form::new().part("file", part))
            }
            Payload::Text(text) => builder.json(&request.json_body(text)),
        };

        let response = builder.send().await?;
        let body = handle_response(response).await?;
        tracing::debug!(kind = %request.kind, bytes = body.len(), "response received");
        Ok(body)
    }
}

impl Backend for ApiClient {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<Vec<u8>> {
        ApiClient::analyze(self, request).await
    }
}

/// Checks the status and returns the body of a successful response.
pub(crate) async fn handle_response(response: reqwest::Response) -> Result<Vec<u8>> {
    let status = response.status();
    let body = response.bytes().await?;

    if !status.is_success() {
        let message = error_detail(&body)
            .unwrap_or_else(|| format!("backend returned {status}"));
        tracing::warn!(status = status.as_u16(), "request failed: {}", message);
        return Err(ClientError::NetworkFailure {
            status: Some(status.as_u16()),
            message,
        });
    }

    Ok(body.to_vec())
}

/// Extracts the backend's error description (`detail` or `error`) from a body.
pub(crate) fn error_detail(body: &[u8]) -> Option<String> {
    let value: serde_json::Value = serde_json::from_slice(body).ok()?;
    let detail = value.get("detail").or_else(|| value.get("error"))?;
    match detail {
        serde_json::Value::String(text) if !text.trim().is_empty() => Some(text.clone()),
        serde_json::Value::String(_) | serde_json::Value::Null => None,
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use matrix_model::AnalysisKind;

    #[test]
    fn test_client_creation() {
        let client = ApiClient::new(&ClientConfig::default());
        assert!(client.is_ok());
    }

    #[test]
    fn endpoint_urls_follow_kind() {
        let client = ApiClient::new(&ClientConfig {
            api_url: "http://10.0.0.2:8000/".to_string(),
            ..ClientConfig::default()
        })
        .unwrap();
        let request = AnalysisRequest::file(AnalysisKind::DeepfakeAudio, "a.wav", "audio/wav", vec![]);
        assert_eq!(
            client.endpoint_url(&request),
            "http://10.0.0.2:8000/deepfake/audio"
        );
    }

    #[test]
    fn detail_is_extracted_from_error_bodies() {
        assert_eq!(
            error_detail(br#"{"detail": "Invalid file type"}"#).as_deref(),
            Some("Invalid file type")
        );
        assert_eq!(
            error_detail(br#"{"error": "boom"}"#).as_deref(),
            Some("boom")
        );
        assert_eq!(
            error_detail(br#"{"detail": [{"loc": ["body"]}]}"#).as_deref(),
            Some(r#"[{"loc":["body"]}]"#)
        );
        assert_eq!(error_detail(b"<html>"), None);
        assert_eq!(error_detail(br#"{"detail": ""}"#), None);
    }
}
