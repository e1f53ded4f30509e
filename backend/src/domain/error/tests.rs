//! Tests for domain error construction and its wire format.

use super::*;
use rstest::{fixture, rstest};
use serde_json::json;

const TRACE_ID: &str = "00000000-0000-0000-0000-0000000000aa";

#[fixture]
fn forbidden() -> Error {
    Error::forbidden("only creator can delete blog")
}

#[rstest]
#[case(Error::invalid_request("bad"), ErrorCode::InvalidRequest)]
#[case(Error::unauthorized("token missing or invalid"), ErrorCode::Unauthorized)]
#[case(Error::forbidden("nope"), ErrorCode::Forbidden)]
#[case(Error::not_found("blog not found"), ErrorCode::NotFound)]
#[case(Error::service_unavailable("down"), ErrorCode::ServiceUnavailable)]
#[case(Error::internal("boom"), ErrorCode::InternalError)]
fn constructors_set_code(#[case] error: Error, #[case] expected: ErrorCode) {
    assert_eq!(error.code(), expected);
}

#[rstest]
#[case("")]
#[case("   ")]
fn try_new_rejects_blank_messages(#[case] message: &str) {
    let result = Error::try_new(ErrorCode::NotFound, message);
    assert_eq!(result, Err(ErrorValidationError::EmptyMessage));
}

#[rstest]
fn try_with_trace_id_rejects_blank_values(forbidden: Error) {
    let result = forbidden.try_with_trace_id("  ");
    assert_eq!(result, Err(ErrorValidationError::EmptyTraceId));
}

#[rstest]
fn serialises_message_under_error_key(forbidden: Error) {
    let value = serde_json::to_value(forbidden).expect("serialise error");
    assert_eq!(
        value,
        json!({ "error": "only creator can delete blog", "code": "forbidden" })
    );
}

#[rstest]
fn serialises_trace_id_and_details_in_camel_case(forbidden: Error) {
    let error = forbidden
        .with_trace_id(TRACE_ID)
        .with_details(json!({ "field": "id" }));
    let value = serde_json::to_value(error).expect("serialise error");
    assert_eq!(value.get("traceId").and_then(|v| v.as_str()), Some(TRACE_ID));
    assert_eq!(value.pointer("/details/field"), Some(&json!("id")));
}

#[rstest]
fn deserialising_blank_message_fails() {
    let result: Result<Error, _> =
        serde_json::from_value(json!({ "error": " ", "code": "not_found" }));
    assert!(result.is_err());
}

#[tokio::test]
async fn new_captures_trace_id_in_scope() {
    let trace_id: TraceId = TRACE_ID.parse().expect("valid uuid");
    let error = TraceId::scope(trace_id, async { Error::internal("boom") }).await;
    assert_eq!(error.trace_id(), Some(TRACE_ID));
}

#[tokio::test]
async fn deserialising_ignores_ambient_trace_id() {
    let trace_id: TraceId = TRACE_ID.parse().expect("valid uuid");
    let decoded: Error = TraceId::scope(trace_id, async {
        serde_json::from_value(json!({ "error": "gone", "code": "not_found" }))
            .expect("decode error payload")
    })
    .await;
    assert_eq!(decoded.trace_id(), None);
}
