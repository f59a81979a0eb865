//
//  crud-sdk
//  api/client.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/14.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # Core CRUD Client
//!
//! This module provides [`CrudClient`], the primary entry point for issuing
//! semantic operations against a remote entity collection. The client composes
//! the transport and cache collaborators; it holds no other state.
//!
//! ## Modes
//!
//! The client runs in one of two propagation modes:
//!
//! - **strict**: every classified failure surfaces as `Err(ApiError)`
//! - **permissive** (the default): failures are absorbed — read, create, and
//!   patch operations return `Ok(None)`, delete returns `Ok(false)`
//!
//! The resilient facade builds on strict mode so that it can observe, log, and
//! swallow errors itself.
//!
//! ## Caching
//!
//! When a cache collaborator is attached, GET-equivalent requests consult it
//! before the transport and store successful responses after it. Mutations
//! never touch the cache. Repeated reads with an unchanged cache key return
//! identical results for as long as the entry lives.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use crud_sdk::api::{CrudClient, Filter, HttpProvider, MemoryCache, OperationParams};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let provider = HttpProvider::new("https://api.example.com/core")?;
//! let client = CrudClient::new(Arc::new(provider))
//!     .with_cache(Arc::new(MemoryCache::with_ttl_secs(60)))
//!     .strict(true);
//!
//! let admins = client
//!     .find("users", &Filter::new().field("role", "admin"), &OperationParams::new())
//!     .await?;
//!
//! let created = client
//!     .create("users", serde_json::json!({"name": "Jo"}))
//!     .await?;
//! # Ok(())
//! # }
//! ```

use std::collections::BTreeMap;
use std::num::NonZeroU32;
use std::sync::Arc;

use serde_json::Value;

use crate::config::EndpointConfig;

use super::cache::{MemoryCache, ResponseCache};
use super::error::ApiError;
use super::params::{Filter, OperationParams, RecordId};
use super::provider::{HttpProvider, RequestProvider};
use super::reader::PageReader;
use super::request::ApiRequest;
use super::response::Response;

/// The core client for the uniform CRUD contract.
///
/// Collaborators are injected as trait objects: any [`RequestProvider`] for
/// transport and optionally any [`ResponseCache`] for read caching. The client
/// itself performs no locking and is safe to share across tasks to the extent
/// its collaborators are.
pub struct CrudClient {
    provider: Arc<dyn RequestProvider>,
    cache: Option<Arc<dyn ResponseCache>>,
    strict: bool,
}

impl CrudClient {
    /// Creates a permissive client over the given transport.
    pub fn new(provider: Arc<dyn RequestProvider>) -> Self {
        Self {
            provider,
            cache: None,
            strict: false,
        }
    }

    /// Creates a client from an endpoint profile.
    ///
    /// Builds the shipped HTTP transport (applying the profile's timeout) and
    /// attaches an in-process cache when the profile configures a TTL.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP transport cannot be constructed.
    pub fn from_endpoint(endpoint: &EndpointConfig) -> anyhow::Result<Self> {
        let provider = HttpProvider::from_config(endpoint)?;
        let mut client = Self::new(Arc::new(provider));

        if let Some(ttl) = endpoint.cache_ttl_secs {
            client = client.with_cache(Arc::new(MemoryCache::with_ttl_secs(ttl as i64)));
        }

        Ok(client)
    }

    /// Attaches a cache collaborator for GET-equivalent requests.
    pub fn with_cache(mut self, cache: Arc<dyn ResponseCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Sets the propagation mode.
    ///
    /// In strict mode every classified failure surfaces as `Err`; in
    /// permissive mode failures are absorbed into `None`/`false` defaults.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Returns `true` when the client propagates failures.
    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// Returns a chunked reader over this client.
    pub fn pages(&self, chunk_size: NonZeroU32) -> PageReader<'_> {
        PageReader::new(self, chunk_size)
    }

    /// Reads a collection, optionally filtered and paged.
    ///
    /// Issues exactly one GET request whose query encodes the filter plus any
    /// extra parameters, in stable order.
    pub async fn find(
        &self,
        entity: &str,
        filter: &Filter,
        params: &OperationParams,
    ) -> Result<Option<Value>, ApiError> {
        let request = ApiRequest::find(entity, filter, params);
        let response = self.execute(request).await;
        self.settle(response)
    }

    /// Reads the first matching record.
    ///
    /// Forces `count=1` and returns the first element of the result array, or
    /// `None` when nothing matched.
    pub async fn find_first(
        &self,
        entity: &str,
        filter: &Filter,
        params: &OperationParams,
    ) -> Result<Option<Value>, ApiError> {
        let params = params.clone().count(1);
        let found = self.find(entity, filter, &params).await?;

        Ok(match found {
            Some(Value::Array(mut items)) if !items.is_empty() => Some(items.remove(0)),
            _ => None,
        })
    }

    /// Counts the records matching a filter.
    ///
    /// Asks for a paged envelope of size one and reads its `total` member.
    pub async fn count(
        &self,
        entity: &str,
        filter: &Filter,
        params: &OperationParams,
    ) -> Result<Option<u64>, ApiError> {
        let params = params.clone().paginate(true).count(1);
        let found = self.find(entity, filter, &params).await?;

        Ok(found
            .as_ref()
            .and_then(|envelope| envelope.get("total"))
            .and_then(Value::as_u64))
    }

    /// Creates a single record.
    pub async fn create(&self, entity: &str, data: Value) -> Result<Option<Value>, ApiError> {
        let request = ApiRequest::create(entity, data);
        let response = self.execute(request).await;
        self.settle(response)
    }

    /// Creates many records in one call.
    pub async fn mass_create(
        &self,
        entity: &str,
        records: Vec<Value>,
    ) -> Result<Option<Value>, ApiError> {
        let request = ApiRequest::mass_create(entity, records);
        let response = self.execute(request).await;
        self.settle(response)
    }

    /// Partially updates a record.
    pub async fn patch(
        &self,
        entity: &str,
        id: impl Into<RecordId>,
        data: Value,
    ) -> Result<Option<Value>, ApiError> {
        let request = ApiRequest::patch(entity, &id.into(), data);
        let response = self.execute(request).await;
        self.settle(response)
    }

    /// Deletes a record, optionally cascading through the named relations.
    ///
    /// Returns `true` when the remote side confirmed the delete. In permissive
    /// mode a failure yields `Ok(false)` instead of an error.
    pub async fn delete(
        &self,
        entity: &str,
        id: impl Into<RecordId>,
        with: &[String],
    ) -> Result<bool, ApiError> {
        let request = ApiRequest::delete(entity, &id.into(), with);
        let response = self.execute(request).await;

        if response.is_success() {
            return Ok(true);
        }

        let error = ApiError::from_failed(&response);
        if self.strict {
            return Err(error);
        }

        tracing::debug!(%entity, %error, "absorbing delete failure in permissive mode");
        Ok(false)
    }

    /// Substring search across the selected fields.
    pub async fn search(
        &self,
        entity: &str,
        fields: &[String],
        like: &BTreeMap<String, Value>,
    ) -> Result<Option<Value>, ApiError> {
        let request = ApiRequest::search(entity, fields, like);
        let response = self.execute(request).await;
        self.settle(response)
    }

    /// Runs one request through the cache and transport.
    ///
    /// Cache-eligible requests consult the collaborator first and store
    /// successful responses after the live call. Everything else goes straight
    /// to the transport.
    pub(crate) async fn execute(&self, request: ApiRequest) -> Response {
        if request.cacheable() {
            if let Some(cache) = &self.cache {
                let key = request.cache_key();
                if cache.has(&key) {
                    if let Some(hit) = cache.get(&key) {
                        tracing::debug!(%key, "serving response from cache");
                        return hit;
                    }
                }
            }
        }

        let response = self.provider.request(&request).await;

        if request.cacheable() && response.is_success() {
            if let Some(cache) = &self.cache {
                cache.put(&request.cache_key(), response.clone());
            }
        }

        response
    }

    /// Applies the propagation mode to a settled response.
    fn settle(&self, response: Response) -> Result<Option<Value>, ApiError> {
        if response.is_success() {
            return Ok(response.into_contents());
        }

        let error = ApiError::from_failed(&response);
        if self.strict {
            return Err(error);
        }

        tracing::debug!(%error, "absorbing failure in permissive mode");
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use serde_json::json;

    use super::*;
    use crate::api::response::Failure;

    struct MockProvider {
        calls: Mutex<Vec<ApiRequest>>,
        responses: Mutex<VecDeque<Response>>,
    }

    impl MockProvider {
        fn new(responses: Vec<Response>) -> Arc<Self> {
            Arc::new(Self {
                calls: Mutex::new(Vec::new()),
                responses: Mutex::new(responses.into()),
            })
        }

        fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }

        fn calls(&self) -> Vec<ApiRequest> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl RequestProvider for MockProvider {
        async fn request(&self, request: &ApiRequest) -> Response {
            self.calls.lock().unwrap().push(request.clone());
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Response::ok(None))
        }
    }

    fn validation_failure() -> Response {
        Response::failed(Failure::from_error_body(
            422,
            "Unprocessable Entity",
            r#"{"validation_errors": {"name": ["required"]}}"#,
        ))
    }

    #[tokio::test]
    async fn test_find_issues_one_canonical_get() {
        let provider = MockProvider::new(vec![Response::ok(Some(json!([{"id": 1}])))]);
        let client = CrudClient::new(provider.clone());

        let found = client
            .find(
                "users",
                &Filter::new().field("name", "jo"),
                &OperationParams::new().count(5),
            )
            .await
            .unwrap();

        assert_eq!(found, Some(json!([{"id": 1}])));
        assert_eq!(provider.call_count(), 1);

        let calls = provider.calls();
        assert_eq!(calls[0].uri, "crud/users?filter%5Bname%5D=jo&count=5");
        assert_eq!(calls[0].method, crate::api::Method::Get);
    }

    #[tokio::test]
    async fn test_repeated_find_hits_cache() {
        let provider = MockProvider::new(vec![Response::ok(Some(json!([{"id": 1}])))]);
        let cache = Arc::new(MemoryCache::with_ttl_secs(60));
        let client = CrudClient::new(provider.clone()).with_cache(cache);

        let filter = Filter::new().field("name", "jo");
        let params = OperationParams::new();

        let first = client.find("users", &filter, &params).await.unwrap();
        let second = client.find("users", &filter, &params).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn test_failed_find_is_not_cached() {
        let provider = MockProvider::new(vec![
            Response::failed(Failure::from_error_body(500, "Internal Server Error", "")),
            Response::ok(Some(json!([]))),
        ]);
        let cache = Arc::new(MemoryCache::with_ttl_secs(60));
        let client = CrudClient::new(provider.clone()).with_cache(cache.clone());

        let miss = client.find("users", &Filter::new(), &OperationParams::new()).await.unwrap();
        assert_eq!(miss, None);
        assert!(!cache.has("GET crud/users"));

        client.find("users", &Filter::new(), &OperationParams::new()).await.unwrap();
        assert_eq!(provider.call_count(), 2);
    }

    #[tokio::test]
    async fn test_create_never_touches_cache() {
        let provider = MockProvider::new(vec![
            Response::ok(Some(json!({"id": 1}))),
            Response::ok(Some(json!({"id": 2}))),
        ]);
        let cache = Arc::new(MemoryCache::with_ttl_secs(60));
        let client = CrudClient::new(provider.clone()).with_cache(cache.clone());

        client.create("users", json!({"name": "a"})).await.unwrap();
        client.create("users", json!({"name": "a"})).await.unwrap();

        assert_eq!(provider.call_count(), 2);
        assert!(!cache.has("POST crud/users"));
    }

    #[tokio::test]
    async fn test_strict_mode_propagates_classified_errors() {
        let provider = MockProvider::new(vec![validation_failure()]);
        let client = CrudClient::new(provider).strict(true);

        let error = client
            .create("users", json!({"email": "jo@example.com"}))
            .await
            .unwrap_err();

        match error {
            ApiError::Validation { fields } => {
                assert_eq!(fields["name"], vec!["required".to_string()]);
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_permissive_mode_absorbs_failures() {
        let provider = MockProvider::new(vec![validation_failure(), validation_failure()]);
        let client = CrudClient::new(provider);

        let created = client.create("users", json!({})).await.unwrap();
        assert_eq!(created, None);

        let deleted = client.delete("users", 7u64, &[]).await.unwrap();
        assert!(!deleted);
    }

    #[tokio::test]
    async fn test_find_first_takes_first_match() {
        let provider = MockProvider::new(vec![Response::ok(Some(json!([{"id": 1}, {"id": 2}])))]);
        let client = CrudClient::new(provider.clone());

        let first = client
            .find_first("users", &Filter::new(), &OperationParams::new())
            .await
            .unwrap();

        assert_eq!(first, Some(json!({"id": 1})));
        assert!(provider.calls()[0].uri.contains("count=1"));
    }

    #[tokio::test]
    async fn test_find_first_on_empty_result() {
        let provider = MockProvider::new(vec![Response::ok(Some(json!([])))]);
        let client = CrudClient::new(provider);

        let first = client
            .find_first("users", &Filter::new(), &OperationParams::new())
            .await
            .unwrap();

        assert_eq!(first, None);
    }

    #[tokio::test]
    async fn test_count_reads_envelope_total() {
        let provider = MockProvider::new(vec![Response::ok(Some(
            json!({"data": [{"id": 1}], "total": 41}),
        ))]);
        let client = CrudClient::new(provider.clone());

        let total = client
            .count("users", &Filter::new(), &OperationParams::new())
            .await
            .unwrap();

        assert_eq!(total, Some(41));
        let uri = &provider.calls()[0].uri;
        assert!(uri.contains("paginate=1"));
        assert!(uri.contains("count=1"));
    }

    #[tokio::test]
    async fn test_delete_confirms_success() {
        let provider = MockProvider::new(vec![Response::ok(None)]);
        let client = CrudClient::new(provider.clone());

        let deleted = client.delete("users", 7u64, &[]).await.unwrap();
        assert!(deleted);
        assert_eq!(provider.calls()[0].uri, "crud/users/7");
    }
}
