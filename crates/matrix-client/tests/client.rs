use matrix_client::{AnalysisRequest, ApiClient, Backend, ClientConfig, ClientError};
use matrix_model::AnalysisKind;

/// Backend that answers every request with a fixed body.
struct Canned(&'static [u8]);

impl Backend for Canned {
    async fn analyze(&self, _request: &AnalysisRequest) -> matrix_client::Result<Vec<u8>> {
        Ok(self.0.to_vec())
    }
}

async fn run<B: Backend>(backend: &B, request: &AnalysisRequest) -> matrix_client::Result<Vec<u8>> {
    backend.analyze(request).await
}

#[tokio::test]
async fn backend_trait_is_usable_generically() {
    let request = AnalysisRequest::text(AnalysisKind::TextFactCheck, "The moon is made of cheese");
    let body = run(&Canned(b"{}"), &request).await.unwrap();
    assert_eq!(body, b"{}");
}

#[tokio::test]
async fn unreachable_backend_is_a_retryable_network_failure() {
    // Port 9 (discard) is not served on loopback in test environments.
    let config = ClientConfig {
        api_url: "http://127.0.0.1:9".to_string(),
        timeout_secs: 5,
        ..ClientConfig::default()
    };
    let client = ApiClient::new(&config).unwrap();
    let request = AnalysisRequest::file(
        AnalysisKind::DeepfakeImage,
        "face.png",
        "image/png",
        vec![0x89, b'P', b'N', b'G'],
    );

    let err = client.analyze(&request).await.unwrap_err();
    assert!(matches!(err, ClientError::NetworkFailure { status: None, .. }));
    assert!(err.is_retryable());
}

#[test]
fn invalid_config_is_rejected_at_construction() {
    let config = ClientConfig {
        timeout_secs: 0,
        ..ClientConfig::default()
    };
    assert!(matches!(ApiClient::new(&config), Err(ClientError::Config(_))));
}
