//
//  crud-sdk
//  api/request.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/14.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Canonical wire request construction.
//!
//! This module turns a semantic operation into the exact request the remote
//! contract expects: the `crud/`-prefixed URI, the HTTP method, and the query
//! string or JSON body carrying the parameters.
//!
//! # Wire Conventions
//!
//! | Operation | Method | URI | Parameters |
//! |-----------|--------|-----|------------|
//! | find | GET | `crud/<entity>` | query string |
//! | create | POST | `crud/<entity>` | JSON body |
//! | mass create | POST | `crud/mass/<entity>` | `{"data": [...]}` body |
//! | patch | PATCH | `crud/<entity>/<id>` | JSON body |
//! | delete | DELETE | `crud/<entity>/<id>` | `{"with": [...]}` body, only if non-empty |
//! | search | GET | `crud/search/<entity>` | query string |
//!
//! GET parameters are encoded with the bracketed convention the remote side
//! parses (`filter[status]=active`, `fields[0]=name`), percent-encoded, in
//! stable order. Construction performs no validation of parameter semantics —
//! malformed filters are forwarded and rejected remotely.
//!
//! # Example
//!
//! ```rust
//! use crud_sdk::api::{ApiRequest, Filter, Method, OperationParams};
//!
//! let request = ApiRequest::find(
//!     "users",
//!     &Filter::new().field("status", "active"),
//!     &OperationParams::new().count(10),
//! );
//!
//! assert_eq!(request.method, Method::Get);
//! assert!(request.uri.starts_with("crud/users?"));
//! assert!(request.cacheable());
//! ```

use std::collections::BTreeMap;
use std::fmt;

use serde_json::{json, Value};
use url::form_urlencoded;

use super::params::{append_value_pairs, Filter, OperationParams, RecordId};

/// HTTP methods used by the CRUD contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// Read requests; the only cache-eligible method.
    Get,
    /// Create and mass-create requests.
    Post,
    /// Partial update requests.
    Patch,
    /// Delete requests.
    Delete,
}

impl Method {
    /// Returns the canonical method name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The logical operations of the CRUD contract.
///
/// Each operation determines the HTTP method and the URI shape; the operation
/// name is also what the resilient facade reports as the `action` in its log
/// context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Read a collection, optionally filtered and paged.
    Find,
    /// Create a single record.
    Create,
    /// Create many records in one call.
    MassCreate,
    /// Partially update a record by identifier.
    Patch,
    /// Delete a record by identifier.
    Delete,
    /// Substring search across selected fields.
    Search,
}

impl Operation {
    /// Returns the HTTP method this operation travels as.
    pub fn method(&self) -> Method {
        match self {
            Self::Find | Self::Search => Method::Get,
            Self::Create | Self::MassCreate => Method::Post,
            Self::Patch => Method::Patch,
            Self::Delete => Method::Delete,
        }
    }

    /// Builds the `crud/`-prefixed path for `entity`, with the identifier
    /// appended where the operation addresses a single record.
    fn path(&self, entity: &str, id: Option<&RecordId>) -> String {
        let base = match self {
            Self::MassCreate => format!("crud/mass/{entity}"),
            Self::Search => format!("crud/search/{entity}"),
            _ => format!("crud/{entity}"),
        };

        match id {
            Some(id) => format!("{base}/{id}"),
            None => base,
        }
    }
}

/// A canonical wire request, ready for the transport collaborator.
///
/// Produced exclusively by the per-operation constructors; the transport
/// executes it without further interpretation.
///
/// # Fields
///
/// * `method` - The HTTP method
/// * `uri` - Relative URI including the encoded query string
/// * `body` - JSON body for mutation requests
/// * `headers` - Extra headers explicitly added by the caller
/// * `as_form` - Send the body form-encoded instead of as JSON
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    /// The HTTP method.
    pub method: Method,
    /// Relative URI, `crud/`-prefixed, including the query string.
    pub uri: String,
    /// JSON body for mutation requests; `None` for reads and bare deletes.
    pub body: Option<Value>,
    /// Extra headers explicitly added by the caller. The core requires none.
    pub headers: BTreeMap<String, String>,
    /// Send the body form-encoded instead of as JSON.
    pub as_form: bool,
}

impl ApiRequest {
    fn new(method: Method, uri: String, body: Option<Value>) -> Self {
        Self {
            method,
            uri,
            body,
            headers: BTreeMap::new(),
            as_form: false,
        }
    }

    /// Builds a `find` request: `GET crud/<entity>?<query>`.
    ///
    /// The query merges the filter (omitted when empty) with the remaining
    /// parameters, in stable order.
    pub fn find(entity: &str, filter: &Filter, params: &OperationParams) -> Self {
        let mut pairs = Vec::new();
        filter.append_pairs(&mut pairs);
        params.append_pairs(&mut pairs);

        let operation = Operation::Find;
        let uri = with_query(operation.path(entity, None), &pairs);
        Self::new(operation.method(), uri, None)
    }

    /// Builds a `create` request: `POST crud/<entity>` with `data` as the body.
    pub fn create(entity: &str, data: Value) -> Self {
        let operation = Operation::Create;
        Self::new(operation.method(), operation.path(entity, None), Some(data))
    }

    /// Builds a mass-create request: `POST crud/mass/<entity>` with the
    /// records wrapped as `{"data": [...]}`.
    pub fn mass_create(entity: &str, records: Vec<Value>) -> Self {
        let operation = Operation::MassCreate;
        Self::new(
            operation.method(),
            operation.path(entity, None),
            Some(json!({ "data": records })),
        )
    }

    /// Builds a `patch` request: `PATCH crud/<entity>/<id>` with `data` as the
    /// body.
    pub fn patch(entity: &str, id: &RecordId, data: Value) -> Self {
        let operation = Operation::Patch;
        Self::new(operation.method(), operation.path(entity, Some(id)), Some(data))
    }

    /// Builds a `delete` request: `DELETE crud/<entity>/<id>`.
    ///
    /// The body is `{"with": [...]}` only when `with` is non-empty, otherwise
    /// the request carries no body.
    pub fn delete(entity: &str, id: &RecordId, with: &[String]) -> Self {
        let operation = Operation::Delete;
        let body = if with.is_empty() {
            None
        } else {
            Some(json!({ "with": with }))
        };
        Self::new(operation.method(), operation.path(entity, Some(id)), body)
    }

    /// Builds a `search` request:
    /// `GET crud/search/<entity>?fields[..]=..&like[..]=..`.
    pub fn search(entity: &str, fields: &[String], like: &BTreeMap<String, Value>) -> Self {
        let mut pairs = Vec::new();
        append_value_pairs(&mut pairs, "fields".to_string(), &Value::from(fields.to_vec()));
        append_value_pairs(
            &mut pairs,
            "like".to_string(),
            &Value::Object(like.clone().into_iter().collect()),
        );

        let operation = Operation::Search;
        let uri = with_query(operation.path(entity, None), &pairs);
        Self::new(operation.method(), uri, None)
    }

    /// Adds an explicit header.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Sends the body form-encoded instead of as JSON.
    pub fn form(mut self) -> Self {
        self.as_form = true;
        self
    }

    /// Returns `true` if this request is eligible for the result cache.
    ///
    /// Only GET requests are; mutations never consult or populate the cache.
    pub fn cacheable(&self) -> bool {
        self.method == Method::Get
    }

    /// Returns the method-qualified cache key for this request.
    ///
    /// Distinct filter/pagination combinations produce distinct URIs and so
    /// distinct keys.
    pub fn cache_key(&self) -> String {
        format!("{} {}", self.method, self.uri)
    }
}

/// Appends the percent-encoded query string to `path`, if any pairs exist.
fn with_query(path: String, pairs: &[(String, String)]) -> String {
    if pairs.is_empty() {
        return path;
    }

    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in pairs {
        serializer.append_pair(key, value);
    }

    format!("{}?{}", path, serializer.finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_merges_filter_and_params() {
        let request = ApiRequest::find(
            "users",
            &Filter::new().field("name", "jo"),
            &OperationParams::new().count(1),
        );

        assert_eq!(request.method, Method::Get);
        assert_eq!(request.uri, "crud/users?filter%5Bname%5D=jo&count=1");
        assert_eq!(request.body, None);
    }

    #[test]
    fn test_find_omits_empty_filter() {
        let request = ApiRequest::find("users", &Filter::new(), &OperationParams::new().page(2));
        assert_eq!(request.uri, "crud/users?page=2");
    }

    #[test]
    fn test_find_without_parameters_has_no_query() {
        let request = ApiRequest::find("users", &Filter::new(), &OperationParams::new());
        assert_eq!(request.uri, "crud/users");
    }

    #[test]
    fn test_find_is_reproducible() {
        let build = || {
            ApiRequest::find(
                "users",
                &Filter::new().field("b", 2).field("a", 1),
                &OperationParams::new().paginate(true).count(10),
            )
        };

        assert_eq!(build(), build());
        assert_eq!(
            build().uri,
            "crud/users?filter%5Ba%5D=1&filter%5Bb%5D=2&count=10&paginate=1"
        );
    }

    #[test]
    fn test_create_posts_data_body() {
        let request = ApiRequest::create("users", serde_json::json!({"name": "Jo"}));

        assert_eq!(request.method, Method::Post);
        assert_eq!(request.uri, "crud/users");
        assert_eq!(request.body, Some(serde_json::json!({"name": "Jo"})));
    }

    #[test]
    fn test_mass_create_wraps_records() {
        let request = ApiRequest::mass_create(
            "users",
            vec![serde_json::json!({"name": "a"}), serde_json::json!({"name": "b"})],
        );

        assert_eq!(request.method, Method::Post);
        assert_eq!(request.uri, "crud/mass/users");
        assert_eq!(
            request.body,
            Some(serde_json::json!({"data": [{"name": "a"}, {"name": "b"}]}))
        );
    }

    #[test]
    fn test_patch_addresses_record() {
        let request = ApiRequest::patch("users", &RecordId::from(7u64), serde_json::json!({"x": 1}));

        assert_eq!(request.method, Method::Patch);
        assert_eq!(request.uri, "crud/users/7");
    }

    #[test]
    fn test_delete_body_only_with_relations() {
        let bare = ApiRequest::delete("users", &RecordId::from(7u64), &[]);
        assert_eq!(bare.method, Method::Delete);
        assert_eq!(bare.uri, "crud/users/7");
        assert_eq!(bare.body, None);

        let related = ApiRequest::delete("users", &RecordId::from(7u64), &["posts".to_string()]);
        assert_eq!(related.body, Some(serde_json::json!({"with": ["posts"]})));
    }

    #[test]
    fn test_search_uri() {
        let mut like = BTreeMap::new();
        like.insert("name".to_string(), Value::from("jo"));

        let request = ApiRequest::search("users", &["name".to_string()], &like);

        assert_eq!(request.method, Method::Get);
        assert_eq!(
            request.uri,
            "crud/search/users?fields%5B0%5D=name&like%5Bname%5D=jo"
        );
    }

    #[test]
    fn test_cache_key_is_method_qualified() {
        let request = ApiRequest::find("users", &Filter::new(), &OperationParams::new());
        assert_eq!(request.cache_key(), "GET crud/users");
        assert!(request.cacheable());

        let mutation = ApiRequest::create("users", serde_json::json!({}));
        assert!(!mutation.cacheable());
    }
}
