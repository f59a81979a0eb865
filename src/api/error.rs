//
//  crud-sdk
//  api/error.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/14.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Domain error taxonomy and failure classification.
//!
//! Classification is purely data-driven: it inspects the [`Failure`] record a
//! transport call produced and maps it to a typed [`ApiError`] variant by
//! probing the decoded payload for the keys the remote side uses. Callers
//! branch on error kind with a `match`, never on exception types or message
//! substrings.
//!
//! # Classification Rules
//!
//! | Condition | Variant |
//! |-----------|---------|
//! | failure is transport-kind | [`ApiError::Transport`] |
//! | payload has `validation_errors` | [`ApiError::Validation`] |
//! | payload has `relations_exist` | [`ApiError::RelationConflict`] |
//! | anything else | [`ApiError::Api`] |
//!
//! # Example
//!
//! ```rust
//! use crud_sdk::api::{ApiError, Failure};
//!
//! let failure = Failure::from_error_body(
//!     422,
//!     "Unprocessable Entity",
//!     r#"{"validation_errors": {"name": ["required"]}}"#,
//! );
//!
//! match ApiError::classify(&failure) {
//!     ApiError::Validation { fields } => {
//!         assert_eq!(fields["name"], vec!["required".to_string()]);
//!     }
//!     other => panic!("unexpected: {other}"),
//! }
//! ```

use std::collections::BTreeMap;

use serde_json::Value;
use thiserror::Error;

use super::response::{Failure, FailureKind, Response};

/// Typed domain error for all CRUD operations.
///
/// # Variants
///
/// | Variant | Meaning |
/// |---------|---------|
/// | `Validation` | The provider rejected the submitted data per field |
/// | `RelationConflict` | A delete was blocked by dependent relations |
/// | `Transport` | The request never completed (network/timeout/protocol) |
/// | `Api` | Any other provider-reported failure |
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// The provider rejected the submitted data.
    ///
    /// Carries the per-field message lists from the provider's
    /// `validation_errors` payload.
    #[error("validation rejected {} field(s)", fields.len())]
    Validation {
        /// Field name to list of rejection messages.
        fields: BTreeMap<String, Vec<String>>,
    },

    /// A delete was blocked because dependent relations exist.
    #[error("delete blocked by dependent relations: {}", relations.join(", "))]
    RelationConflict {
        /// The relations that still reference the record.
        relations: Vec<String>,
    },

    /// The request never completed.
    ///
    /// Connection, timeout, and protocol failures from the transport
    /// collaborator end up here.
    #[error("transport error: {message}")]
    Transport {
        /// Description of the transport failure.
        message: String,
    },

    /// Any other provider-reported failure.
    #[error("{message}")]
    Api {
        /// Human-readable description.
        message: String,
        /// HTTP status code, when one was received.
        status: Option<u16>,
    },
}

impl ApiError {
    /// Classifies a failure record into a typed error.
    pub fn classify(failure: &Failure) -> Self {
        if failure.kind == FailureKind::Transport {
            return Self::Transport {
                message: failure.message.clone(),
            };
        }

        if let Some(payload) = &failure.payload {
            if let Some(errors) = payload.get("validation_errors") {
                return Self::Validation {
                    fields: validation_fields(errors),
                };
            }

            if let Some(relations) = payload.get("relations_exist") {
                return Self::RelationConflict {
                    relations: relation_names(relations),
                };
            }
        }

        Self::Api {
            message: failure.message.clone(),
            status: failure.status,
        }
    }

    /// Classifies a failed response; falls back to a generic error when the
    /// provider reported no failure detail.
    pub(crate) fn from_failed(response: &Response) -> Self {
        match response.failure() {
            Some(failure) => Self::classify(failure),
            None => Self::Api {
                message: "request failed without failure detail".to_string(),
                status: None,
            },
        }
    }

    /// Returns the HTTP status this error carries, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => *status,
            _ => None,
        }
    }

    /// Returns `true` for a 404-equivalent failure.
    ///
    /// The resilient facade treats a delete that fails this way as targeting
    /// an already-absent record and suppresses it from logging.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

/// Decodes a `validation_errors` payload into per-field message lists.
///
/// Tolerates a single message where the provider did not wrap it in a list.
fn validation_fields(errors: &Value) -> BTreeMap<String, Vec<String>> {
    let mut fields = BTreeMap::new();

    if let Some(members) = errors.as_object() {
        for (field, messages) in members {
            let list = match messages {
                Value::Array(items) => items.iter().map(text).collect(),
                other => vec![text(other)],
            };
            fields.insert(field.clone(), list);
        }
    }

    fields
}

/// Decodes a `relations_exist` payload into relation names.
fn relation_names(relations: &Value) -> Vec<String> {
    match relations {
        Value::Array(items) => items.iter().map(text).collect(),
        other => vec![text(other)],
    }
}

/// Renders a payload member as display text without JSON string quoting.
fn text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classifies_validation_errors() {
        let failure = Failure::from_error_body(
            422,
            "Unprocessable Entity",
            r#"{"validation_errors": {"name": ["required"]}}"#,
        );

        let error = ApiError::classify(&failure);
        let mut expected = BTreeMap::new();
        expected.insert("name".to_string(), vec!["required".to_string()]);

        assert_eq!(error, ApiError::Validation { fields: expected });
    }

    #[test]
    fn test_validation_tolerates_single_message() {
        let failure = Failure::from_error_body(
            422,
            "Unprocessable Entity",
            r#"{"validation_errors": {"name": "required"}}"#,
        );

        match ApiError::classify(&failure) {
            ApiError::Validation { fields } => {
                assert_eq!(fields["name"], vec!["required".to_string()]);
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_classifies_relation_conflicts() {
        let failure = Failure::from_error_body(
            409,
            "Conflict",
            r#"{"relations_exist": ["posts", "comments"]}"#,
        );

        assert_eq!(
            ApiError::classify(&failure),
            ApiError::RelationConflict {
                relations: vec!["posts".to_string(), "comments".to_string()],
            }
        );
    }

    #[test]
    fn test_classifies_transport_failures() {
        let failure = Failure::transport("connection refused");

        assert_eq!(
            ApiError::classify(&failure),
            ApiError::Transport {
                message: "connection refused".to_string(),
            }
        );
    }

    #[test]
    fn test_unknown_payload_falls_back_to_api_error() {
        let failure = Failure::from_error_body(500, "Internal Server Error", r#"{"weird": true}"#);

        let error = ApiError::classify(&failure);
        assert_eq!(
            error,
            ApiError::Api {
                message: "500 Internal Server Error".to_string(),
                status: Some(500),
            }
        );
        assert!(!error.is_not_found());
    }

    #[test]
    fn test_not_found_detection() {
        let failure = Failure::from_error_body(404, "Not Found", "");
        assert!(ApiError::classify(&failure).is_not_found());

        let transport = ApiError::Transport {
            message: "dns failure".to_string(),
        };
        assert!(!transport.is_not_found());
    }
}
