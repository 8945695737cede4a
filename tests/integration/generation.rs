//! Integration tests for submit: one service call, result replacement and the
//! busy flag across success and failure.

use rpmgen::adapter::GenerationAdapter;
use rpmgen::error::{ApiError, ServiceError, ValidationError};
use rpmgen::form::FormField;
use rpmgen::session::EditingSession;
use std::sync::Arc;

use super::test_utils::{complete_request, plan_json, MockClient};

#[tokio::test]
async fn test_successful_submit_stores_result() {
    let mut session = EditingSession::with_request(complete_request());
    let mock = Arc::new(MockClient::answering(plan_json(1, "Perjalanan setetes air")).observing(session.busy_flag()));
    let adapter = GenerationAdapter::new(mock.clone());

    let plan = session.submit(&adapter).await.unwrap();
    assert_eq!(plan.desain.topik, "Perjalanan setetes air");

    assert_eq!(mock.call_count(), 1);
    assert_eq!(*mock.busy_during_call.lock().unwrap(), vec![true]);
    assert!(!session.is_busy());
    assert!(session.result().is_some());
}

#[tokio::test]
async fn test_malformed_response_keeps_previous_result() {
    let mut session = EditingSession::with_request(complete_request());
    let good = GenerationAdapter::new(Arc::new(MockClient::answering(plan_json(1, "Topik pertama"))));
    session.submit(&good).await.unwrap();

    let mut body = plan_json(1, "Topik kedua");
    body.as_object_mut().unwrap().remove("asesmen");
    let bad = GenerationAdapter::new(Arc::new(MockClient::answering(body)));

    let err = session.submit(&bad).await.unwrap_err();
    match err {
        ApiError::MalformedResponse(ref msg) => assert!(msg.contains("asesmen")),
        ref other => panic!("unexpected error: {:?}", other),
    }
    assert_eq!(err.user_notice(), "Gagal menghasilkan RPM. Silakan coba lagi.");
    assert_eq!(session.result().unwrap().desain.topik, "Topik pertama");
    assert!(!session.is_busy());
}

#[tokio::test]
async fn test_non_json_reply_is_malformed() {
    let mut session = EditingSession::with_request(complete_request());
    let adapter = GenerationAdapter::new(Arc::new(MockClient::answering_raw(
        "Maaf, saya tidak dapat membantu.",
    )));
    let err = session.submit(&adapter).await.unwrap_err();
    assert!(matches!(err, ApiError::MalformedResponse(_)));
    assert!(session.result().is_none());
}

#[tokio::test]
async fn test_connection_failure_clears_busy() {
    let mut session = EditingSession::with_request(complete_request());
    let mock = Arc::new(
        MockClient::failing(ServiceError::Connection, "connection refused")
            .observing(session.busy_flag()),
    );
    let adapter = GenerationAdapter::new(mock.clone());

    let err = session.submit(&adapter).await.unwrap_err();
    assert!(matches!(
        err,
        ApiError::GenerationService(ServiceError::Connection(_))
    ));
    assert_eq!(*mock.busy_during_call.lock().unwrap(), vec![true]);
    assert!(!session.is_busy());
    assert!(session.result().is_none());
}

#[tokio::test]
async fn test_submit_without_dimensions_never_calls_service() {
    let mut request = complete_request();
    for dim in request.dimensions().clone() {
        request.toggle_dimension(dim);
    }
    let mut session = EditingSession::with_request(request);
    let mock = Arc::new(MockClient::answering(plan_json(1, "x")));
    let adapter = GenerationAdapter::new(mock.clone());

    let err = session.submit(&adapter).await.unwrap_err();
    assert!(matches!(err, ApiError::Validation(ValidationError::NoDimensions)));
    assert_eq!(err.user_notice(), "Pilih minimal satu dimensi lulusan.");
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn test_submit_with_empty_required_field_fails() {
    let mut request = complete_request();
    request.set_field(FormField::Material, "  ").unwrap();
    let mut session = EditingSession::with_request(request);
    let mock = Arc::new(MockClient::answering(plan_json(1, "x")));

    let err = session
        .submit(&GenerationAdapter::new(mock.clone()))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ApiError::Validation(ValidationError::MissingField("material"))
    ));
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn test_submit_while_busy_is_rejected() {
    let mut session = EditingSession::with_request(complete_request());
    let mock = Arc::new(MockClient::answering(plan_json(1, "x")));
    let adapter = GenerationAdapter::new(mock.clone());

    let held = session.busy_flag().try_acquire().unwrap();
    let err = session.submit(&adapter).await.unwrap_err();
    assert!(matches!(err, ApiError::Busy));
    assert_eq!(mock.call_count(), 0);

    drop(held);
    assert!(session.submit(&adapter).await.is_ok());
    assert_eq!(mock.call_count(), 1);
}

#[tokio::test]
async fn test_each_submit_is_a_fresh_call() {
    let mut session = EditingSession::with_request(complete_request());
    let mock = Arc::new(MockClient::answering(plan_json(2, "x")));
    let adapter = GenerationAdapter::new(mock.clone());

    session.submit(&adapter).await.unwrap();
    session.request.set_field(FormField::SessionsCount, "2").unwrap();
    session.submit(&adapter).await.unwrap();

    let calls = mock.calls.lock().unwrap();
    assert_eq!(calls.len(), 2);
    assert!(!calls[0].contains("Pertemuan 2:"));
    assert!(calls[1].contains("Pertemuan 2: Inkuiri-Discovery"));
}
