//! Problem Details test helpers for backend testing
//!
//! Utilities for asserting Problem Details (RFC 7807) error responses in
//! integration tests without depending on backend types.
//!
//! Validated by default:
//! - HTTP status matches the expected value
//! - Content-Type is `application/problem+json` (charset tolerated)
//! - `type` and `title` are non-empty strings
//! - `code` equals expected
//! - `status` in body equals HTTP status
//! - Optional substring requirement in `detail`

use actix_web::http::header::{HeaderMap, CONTENT_TYPE};
use actix_web::http::StatusCode;
use serde::{Deserialize, Serialize};

/// Local ProblemDetails struct that matches the backend's structure
/// but doesn't depend on backend types
#[derive(Debug, Deserialize, Serialize)]
struct ProblemDetailsLike {
    #[serde(rename = "type")]
    type_: String,
    title: String,
    status: u16,
    detail: String,
    code: String,
}

fn assert_content_type_problem_json(headers: &HeaderMap) {
    let ct = headers
        .get(CONTENT_TYPE)
        .expect("content-type header should be present")
        .to_str()
        .expect("content-type header must be valid UTF-8");
    let mime = ct.split(';').next().unwrap_or("").trim();
    assert!(
        mime.eq_ignore_ascii_case("application/problem+json"),
        "content-type must be application/problem+json (got: {ct})"
    );
}

/// Assert an error response body is a well-formed problem document with the
/// expected status and code, optionally requiring a substring in `detail`.
pub fn assert_problem_details(
    status: StatusCode,
    headers: &HeaderMap,
    body: &[u8],
    expected_status: StatusCode,
    expected_code: &str,
    detail_contains: Option<&str>,
) {
    assert_eq!(status, expected_status, "unexpected HTTP status");
    assert_content_type_problem_json(headers);

    let problem: ProblemDetailsLike =
        serde_json::from_slice(body).expect("body must deserialize as problem details");
    assert!(!problem.type_.is_empty(), "type must be non-empty");
    assert!(!problem.title.is_empty(), "title must be non-empty");
    assert_eq!(problem.status, expected_status.as_u16());
    assert_eq!(problem.code, expected_code);
    if let Some(needle) = detail_contains {
        assert!(
            problem.detail.contains(needle),
            "detail {:?} must contain {:?}",
            problem.detail,
            needle
        );
    }
}
