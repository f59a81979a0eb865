//
//  crud-sdk
//  api/params.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/14.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Structured operation parameters.
//!
//! This module provides the value types callers use to describe an operation
//! semantically: [`Filter`] for field conditions, [`OperationParams`] for the
//! named option keys the remote contract recognizes, and [`RecordId`] for record
//! identifiers rendered into URI path segments.
//!
//! # Overview
//!
//! The remote side accepts a small, documented set of option keys (`count`,
//! `page`, `paginate`, `fields`, `like`, `with`, `unique`, `field`, `value`).
//! [`OperationParams`] exposes each as a typed field while still allowing
//! verbatim pass-through of unrecognized options — the client never validates
//! option semantics; malformed parameters are forwarded and rejected remotely.
//!
//! # Stable Ordering
//!
//! Both types render to query pairs in a deterministic order (filter first,
//! recognized options in a fixed sequence, extras sorted by key) so the same
//! logical operation always produces byte-identical wire requests. This is what
//! makes cache keys reproducible.
//!
//! # Example
//!
//! ```rust
//! use crud_sdk::api::{Filter, OperationParams};
//!
//! let filter = Filter::new().field("status", "active").field("age", 21);
//!
//! let params = OperationParams::new()
//!     .count(25)
//!     .page(2)
//!     .with_relations(["profile"])
//!     .extra("include_deleted", 1);
//!
//! assert!(!filter.is_empty());
//! ```

use std::collections::BTreeMap;
use std::fmt;

use serde_json::Value;

/// A mapping from field name to condition value(s).
///
/// Filters are merged into request parameters under the reserved `filter` key
/// and encoded with the bracketed convention (`filter[status]=active`). Field
/// order is irrelevant to the remote side; iteration order is kept stable so
/// identical filters produce identical wire requests.
///
/// # Example
///
/// ```rust
/// use crud_sdk::api::Filter;
///
/// let filter = Filter::new()
///     .field("status", "active")
///     .field("role", "admin");
///
/// assert!(!filter.is_empty());
/// assert!(Filter::new().is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    fields: BTreeMap<String, Value>,
}

impl Filter {
    /// Creates an empty filter.
    ///
    /// An empty filter is omitted entirely from the request query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field condition, replacing any previous condition on the same field.
    ///
    /// Values may be scalars, arrays, or nested objects; nested structures are
    /// rendered with the bracketed query convention (`filter[age][gt]=18`).
    pub fn field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Returns `true` if no conditions have been added.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Renders the filter as a JSON object for logging context and encoding.
    pub fn to_value(&self) -> Value {
        Value::Object(self.fields.clone().into_iter().collect())
    }

    /// Appends this filter's `filter[...]` query pairs to `out`.
    ///
    /// Appends nothing when the filter is empty.
    pub(crate) fn append_pairs(&self, out: &mut Vec<(String, String)>) {
        if !self.is_empty() {
            append_value_pairs(out, "filter".to_string(), &self.to_value());
        }
    }
}

impl From<BTreeMap<String, Value>> for Filter {
    fn from(fields: BTreeMap<String, Value>) -> Self {
        Self { fields }
    }
}

/// Named operation options recognized by the remote contract.
///
/// Every field maps to a documented remote-side option key. Options left unset
/// are omitted from the request. Unrecognized options go through [`extra`] and
/// are forwarded verbatim — the client does not validate option names.
///
/// # Option Keys
///
/// | Field | Wire key | Meaning |
/// |-------|----------|---------|
/// | `count` | `count` | Page size / result limit |
/// | `page` | `page` | 1-indexed page number |
/// | `paginate` | `paginate` | Ask for a paged result envelope |
/// | `fields` | `fields` | Field projection / search targets |
/// | `like` | `like` | Substring match conditions |
/// | `with` | `with` | Related records to include |
/// | `unique` | `unique` | Deduplicate the result set |
/// | `field` | `field` | Single-field selection |
/// | `value` | `value` | Value for single-field selection |
///
/// # Example
///
/// ```rust
/// use crud_sdk::api::OperationParams;
///
/// let params = OperationParams::new()
///     .paginate(true)
///     .page(3)
///     .count(100)
///     .extra("trashed", "only");
/// ```
///
/// [`extra`]: OperationParams::extra
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OperationParams {
    /// Page size / result limit.
    pub count: Option<u64>,
    /// 1-indexed page number.
    pub page: Option<u64>,
    /// Ask the remote side for a paged result envelope.
    pub paginate: Option<bool>,
    /// Field projection or search target fields.
    pub fields: Vec<String>,
    /// Substring match conditions, field name to pattern.
    pub like: BTreeMap<String, Value>,
    /// Related records to include.
    pub with: Vec<String>,
    /// Deduplicate the result set.
    pub unique: Option<bool>,
    /// Single-field selection.
    pub field: Option<String>,
    /// Value for single-field selection.
    pub value: Option<Value>,
    /// Unrecognized options, forwarded verbatim in sorted key order.
    pub extra: BTreeMap<String, Value>,
}

impl OperationParams {
    /// Creates an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the page size / result limit.
    pub fn count(mut self, count: u64) -> Self {
        self.count = Some(count);
        self
    }

    /// Sets the 1-indexed page number.
    pub fn page(mut self, page: u64) -> Self {
        self.page = Some(page);
        self
    }

    /// Requests (or declines) a paged result envelope.
    pub fn paginate(mut self, paginate: bool) -> Self {
        self.paginate = Some(paginate);
        self
    }

    /// Sets the field projection / search target fields.
    pub fn fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Adds a substring match condition.
    pub fn like(mut self, field: impl Into<String>, pattern: impl Into<Value>) -> Self {
        self.like.insert(field.into(), pattern.into());
        self
    }

    /// Sets the related records to include.
    pub fn with_relations<I, S>(mut self, relations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.with = relations.into_iter().map(Into::into).collect();
        self
    }

    /// Requests result deduplication.
    pub fn unique(mut self, unique: bool) -> Self {
        self.unique = Some(unique);
        self
    }

    /// Selects a single field.
    pub fn field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Sets the value for single-field selection.
    pub fn value(mut self, value: impl Into<Value>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Adds a pass-through option under an unrecognized key.
    ///
    /// The key and value are forwarded to the remote side verbatim.
    pub fn extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Appends the set options as query pairs, in the documented stable order.
    pub(crate) fn append_pairs(&self, out: &mut Vec<(String, String)>) {
        if let Some(count) = self.count {
            out.push(("count".to_string(), count.to_string()));
        }
        if let Some(page) = self.page {
            out.push(("page".to_string(), page.to_string()));
        }
        if let Some(paginate) = self.paginate {
            out.push(("paginate".to_string(), flag(paginate)));
        }
        if !self.fields.is_empty() {
            let fields = Value::from(self.fields.clone());
            append_value_pairs(out, "fields".to_string(), &fields);
        }
        if !self.like.is_empty() {
            let like = Value::Object(self.like.clone().into_iter().collect());
            append_value_pairs(out, "like".to_string(), &like);
        }
        if !self.with.is_empty() {
            let with = Value::from(self.with.clone());
            append_value_pairs(out, "with".to_string(), &with);
        }
        if let Some(unique) = self.unique {
            out.push(("unique".to_string(), flag(unique)));
        }
        if let Some(field) = &self.field {
            out.push(("field".to_string(), field.clone()));
        }
        if let Some(value) = &self.value {
            append_value_pairs(out, "value".to_string(), value);
        }
        for (key, value) in &self.extra {
            append_value_pairs(out, key.clone(), value);
        }
    }
}

/// A record identifier rendered as a URI path segment.
///
/// Identifiers are opaque to the client; numeric and string forms are accepted
/// and forwarded as-is.
///
/// # Example
///
/// ```rust
/// use crud_sdk::api::RecordId;
///
/// let numeric = RecordId::from(42u64);
/// let uuid = RecordId::from("550e8400-e29b-41d4-a716-446655440000");
///
/// assert_eq!(numeric.as_str(), "42");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordId(String);

impl RecordId {
    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<u64> for RecordId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl From<i64> for RecordId {
    fn from(id: i64) -> Self {
        Self(id.to_string())
    }
}

impl From<u32> for RecordId {
    fn from(id: u32) -> Self {
        Self(id.to_string())
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for RecordId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Boolean options travel as `1`/`0` on the wire.
fn flag(value: bool) -> String {
    (if value { "1" } else { "0" }).to_string()
}

/// Flattens a JSON value into bracketed query pairs under `key`.
///
/// Scalars become a single pair, arrays become `key[0]`, `key[1]`, ..., and
/// objects become `key[member]` recursively. Nulls are skipped.
pub(crate) fn append_value_pairs(out: &mut Vec<(String, String)>, key: String, value: &Value) {
    match value {
        Value::Null => {}
        Value::Bool(b) => out.push((key, flag(*b))),
        Value::Number(n) => out.push((key, n.to_string())),
        Value::String(s) => out.push((key, s.clone())),
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                append_value_pairs(out, format!("{key}[{index}]"), item);
            }
        }
        Value::Object(members) => {
            for (member, item) in members {
                append_value_pairs(out, format!("{key}[{member}]"), item);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_filter_pairs() {
        let filter = Filter::new().field("status", "active").field("age", 21);

        let mut pairs = Vec::new();
        filter.append_pairs(&mut pairs);

        assert_eq!(
            pairs,
            vec![
                ("filter[age]".to_string(), "21".to_string()),
                ("filter[status]".to_string(), "active".to_string()),
            ]
        );
    }

    #[test]
    fn test_empty_filter_emits_nothing() {
        let mut pairs = Vec::new();
        Filter::new().append_pairs(&mut pairs);
        assert!(pairs.is_empty());
    }

    #[test]
    fn test_nested_filter_condition() {
        let filter = Filter::new().field("age", json!({"gt": 18}));

        let mut pairs = Vec::new();
        filter.append_pairs(&mut pairs);

        assert_eq!(pairs, vec![("filter[age][gt]".to_string(), "18".to_string())]);
    }

    #[test]
    fn test_params_stable_order() {
        let params = OperationParams::new()
            .extra("trashed", "only")
            .count(25)
            .paginate(true)
            .page(2);

        let mut pairs = Vec::new();
        params.append_pairs(&mut pairs);

        assert_eq!(
            pairs,
            vec![
                ("count".to_string(), "25".to_string()),
                ("page".to_string(), "2".to_string()),
                ("paginate".to_string(), "1".to_string()),
                ("trashed".to_string(), "only".to_string()),
            ]
        );
    }

    #[test]
    fn test_params_sequences_and_maps() {
        let params = OperationParams::new()
            .fields(["name", "email"])
            .like("name", "jo")
            .with_relations(["roles"]);

        let mut pairs = Vec::new();
        params.append_pairs(&mut pairs);

        assert_eq!(
            pairs,
            vec![
                ("fields[0]".to_string(), "name".to_string()),
                ("fields[1]".to_string(), "email".to_string()),
                ("like[name]".to_string(), "jo".to_string()),
                ("with[0]".to_string(), "roles".to_string()),
            ]
        );
    }

    #[test]
    fn test_extras_pass_through_unvalidated() {
        let params = OperationParams::new().extra("no_such_option", json!({"a": [1, 2]}));

        let mut pairs = Vec::new();
        params.append_pairs(&mut pairs);

        assert_eq!(
            pairs,
            vec![
                ("no_such_option[a][0]".to_string(), "1".to_string()),
                ("no_such_option[a][1]".to_string(), "2".to_string()),
            ]
        );
    }

    #[test]
    fn test_record_id_forms() {
        assert_eq!(RecordId::from(7u64).as_str(), "7");
        assert_eq!(RecordId::from("abc-123").to_string(), "abc-123");
    }
}
