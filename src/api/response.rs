//
//  crud-sdk
//  api/response.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/14.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Response value types produced by the transport collaborator.
//!
//! A [`Response`] is immutable once produced: the client layers only read it.
//! Two invariants are enforced by construction:
//!
//! - a failed response never carries usable contents
//! - a successful response never carries a failure record
//!
//! The [`Failure`] record preserves whatever the provider reported — HTTP
//! status, a human-readable message, and the decoded error payload — so that
//! classification can stay purely data-driven.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Where a failure originated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailureKind {
    /// The remote side answered with a non-success status.
    Http,
    /// The request never completed: connection, timeout, or protocol failure.
    Transport,
}

/// A provider-reported failure record.
///
/// Carries everything classification needs: the origin kind, the HTTP status
/// when one was received, a message, and the decoded error payload when the
/// body was valid JSON.
///
/// # Example
///
/// ```rust
/// use crud_sdk::api::Failure;
///
/// let failure = Failure::from_error_body(404, "Not Found", "");
/// assert_eq!(failure.status, Some(404));
/// assert_eq!(failure.message, "404 Not Found");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Failure {
    /// Where the failure originated.
    pub kind: FailureKind,
    /// HTTP status code, when the remote side answered.
    pub status: Option<u16>,
    /// Human-readable description.
    pub message: String,
    /// Decoded error payload, when the body was valid JSON.
    pub payload: Option<Value>,
}

impl Failure {
    /// Creates a transport-kind failure from a transport error description.
    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::Transport,
            status: None,
            message: message.into(),
            payload: None,
        }
    }

    /// Creates an HTTP-kind failure from a non-success response body.
    ///
    /// The body is probed for the error-message shapes the remote side uses:
    /// a top-level `message`, or `error.message`. When neither is present (or
    /// the body is not JSON) the message falls back to the status line, e.g.
    /// `404 Not Found`.
    pub fn from_error_body(status: u16, reason: &str, body: &str) -> Self {
        let payload: Option<Value> = serde_json::from_str(body).ok();
        let message = payload
            .as_ref()
            .and_then(extract_message)
            .unwrap_or_else(|| format!("{status} {reason}"));

        Self {
            kind: FailureKind::Http,
            status: Some(status),
            message,
            payload,
        }
    }
}

/// Pulls a human-readable message out of a decoded error payload.
fn extract_message(payload: &Value) -> Option<String> {
    if let Some(message) = payload.get("message").and_then(Value::as_str) {
        return Some(message.to_string());
    }

    payload
        .get("error")
        .and_then(|error| error.get("message"))
        .and_then(Value::as_str)
        .map(str::to_string)
}

/// The interpreted outcome of one transport call.
///
/// Constructed by the transport collaborator via [`Response::ok`] or
/// [`Response::failed`]; the constructors enforce the success/contents
/// invariants. Responses are `Clone` and serializable so cache collaborators
/// can own copies.
///
/// # Example
///
/// ```rust
/// use crud_sdk::api::{Failure, Response};
/// use serde_json::json;
///
/// let hit = Response::ok(Some(json!([{"id": 1}])));
/// assert!(hit.is_success());
///
/// let miss = Response::failed(Failure::transport("connection refused"));
/// assert!(!miss.is_success());
/// assert!(miss.contents().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    success: bool,
    contents: Option<Value>,
    failure: Option<Failure>,
}

impl Response {
    /// Creates a successful response carrying the decoded payload.
    pub fn ok(contents: Option<Value>) -> Self {
        Self {
            success: true,
            contents,
            failure: None,
        }
    }

    /// Creates a failed response carrying the failure record.
    pub fn failed(failure: Failure) -> Self {
        Self {
            success: false,
            contents: None,
            failure: Some(failure),
        }
    }

    /// Returns `true` if the call succeeded.
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Returns the decoded payload of a successful response.
    pub fn contents(&self) -> Option<&Value> {
        self.contents.as_ref()
    }

    /// Consumes the response, returning the decoded payload.
    pub fn into_contents(self) -> Option<Value> {
        self.contents
    }

    /// Returns the failure record of a failed response.
    pub fn failure(&self) -> Option<&Failure> {
        self.failure.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_never_carries_failure() {
        let response = Response::ok(Some(json!({"id": 1})));
        assert!(response.is_success());
        assert!(response.failure().is_none());
        assert_eq!(response.contents(), Some(&json!({"id": 1})));
    }

    #[test]
    fn test_failure_never_carries_contents() {
        let response = Response::failed(Failure::transport("timed out"));
        assert!(!response.is_success());
        assert!(response.contents().is_none());
        assert_eq!(response.failure().map(|f| f.kind), Some(FailureKind::Transport));
    }

    #[test]
    fn test_error_body_message_extraction() {
        let failure = Failure::from_error_body(422, "Unprocessable Entity", r#"{"message": "name is required"}"#);
        assert_eq!(failure.message, "name is required");
        assert_eq!(failure.status, Some(422));

        let nested = Failure::from_error_body(403, "Forbidden", r#"{"error": {"message": "denied"}}"#);
        assert_eq!(nested.message, "denied");
    }

    #[test]
    fn test_error_body_fallback_to_status_line() {
        let failure = Failure::from_error_body(404, "Not Found", "not json at all");
        assert_eq!(failure.message, "404 Not Found");
        assert!(failure.payload.is_none());
    }

    #[test]
    fn test_error_body_keeps_payload() {
        let failure = Failure::from_error_body(
            422,
            "Unprocessable Entity",
            r#"{"validation_errors": {"name": ["required"]}}"#,
        );
        assert_eq!(
            failure.payload,
            Some(json!({"validation_errors": {"name": ["required"]}}))
        );
        assert_eq!(failure.message, "422 Unprocessable Entity");
    }
}
