//! Integration tests for the HTTP generation client without a live service

use rpmgen::adapter::GenerationAdapter;
use rpmgen::error::{ApiError, ServiceError};
use rpmgen::provider::{GeminiClient, GenerationServiceClient, ProviderConfig};
use rpmgen::session::EditingSession;
use std::sync::Arc;

use super::test_utils::complete_request;

#[tokio::test]
async fn test_unreachable_endpoint_is_a_connection_error() {
    // Nothing listens on the discard port.
    let client = GeminiClient::new(
        "gemini-test".to_string(),
        "test-key".to_string(),
        Some("http://127.0.0.1:9/v1beta/".to_string()),
    )
    .unwrap();
    assert_eq!(client.provider_name(), "gemini");
    assert_eq!(client.model_name(), "gemini-test");

    let mut session = EditingSession::with_request(complete_request());
    let adapter = GenerationAdapter::new(Arc::new(client));
    let err = session.submit(&adapter).await.unwrap_err();

    assert!(matches!(
        err,
        ApiError::GenerationService(ServiceError::Connection(_))
    ));
    assert!(!session.is_busy());
    assert!(session.result().is_none());
}

#[test]
fn test_config_key_is_used_before_environment() {
    let config = ProviderConfig {
        api_key: Some("from-config".to_string()),
        ..ProviderConfig::default()
    };
    assert_eq!(config.resolve_api_key().unwrap(), "from-config");
    assert!(GeminiClient::from_config(&config).is_ok());
}

#[test]
fn test_invalid_endpoint_is_a_config_error() {
    let config = ProviderConfig {
        api_key: Some("k".to_string()),
        endpoint: "localhost:8080".to_string(),
        ..ProviderConfig::default()
    };
    assert!(matches!(
        GeminiClient::from_config(&config),
        Err(ApiError::ConfigError(_))
    ));
}
