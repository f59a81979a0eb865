//
//  crud-sdk
//  api/safe.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/14.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # Resilient Facade
//!
//! [`SafeClient`] mirrors every core operation with a variant that never
//! returns an error: any classified or unclassified failure is caught, logged
//! through the injected [`ContextLogger`] with structured context, and a safe
//! default is returned instead — `None` for reads, creates, and patches,
//! `false` for deletes, an empty set for chunked reads.
//!
//! ## Log Context
//!
//! Every reported failure carries `{action, entity}` plus the operation's
//! identifying detail: the record `id` for patch/delete, the submitted `data`
//! for create/patch, the `where` filter for reads.
//!
//! ## The One Suppressed Case
//!
//! A delete that fails with a 404-equivalent targets a record that is already
//! gone. Deletes are idempotent from the caller's point of view, so this case
//! still returns `false` but is kept out of the logs. Every other error kind
//! is always logged.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use crud_sdk::api::{CrudClient, HttpProvider, SafeClient};
//! use crud_sdk::logging::TracingLogger;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let client = CrudClient::new(Arc::new(HttpProvider::new("https://api.example.com/core")?));
//! let safe = SafeClient::new(client, Arc::new(TracingLogger));
//!
//! // Never fails; a remote error logs and yields `false`.
//! let removed = safe.delete("sessions", 42u64, &[]).await;
//! # Ok(())
//! # }
//! ```

use std::collections::BTreeMap;
use std::num::NonZeroU32;
use std::sync::Arc;

use serde_json::Value;

use crate::logging::ContextLogger;

use super::client::CrudClient;
use super::error::ApiError;
use super::params::{Filter, OperationParams, RecordId};

/// The never-failing facade over [`CrudClient`].
///
/// Wraps the client in strict mode so every failure is observable, then
/// absorbs each one: log, default, move on. Remote trouble never propagates
/// uncontrolled to the caller.
pub struct SafeClient {
    inner: CrudClient,
    logger: Arc<dyn ContextLogger>,
}

impl SafeClient {
    /// Wraps a client with a logging collaborator.
    ///
    /// The client is forced into strict mode; the facade needs failures to
    /// surface so it can log them before defaulting.
    pub fn new(client: CrudClient, logger: Arc<dyn ContextLogger>) -> Self {
        Self {
            inner: client.strict(true),
            logger,
        }
    }

    /// Returns the wrapped strict client.
    pub fn client(&self) -> &CrudClient {
        &self.inner
    }

    /// Reads a collection; logs and returns `None` on failure.
    pub async fn find(
        &self,
        entity: &str,
        filter: &Filter,
        params: &OperationParams,
    ) -> Option<Value> {
        match self.inner.find(entity, filter, params).await {
            Ok(found) => found,
            Err(error) => {
                let mut context = context_for("find", entity);
                context.insert("where".to_string(), filter.to_value());
                self.report(&error, context);
                None
            }
        }
    }

    /// Reads the first matching record; logs and returns `None` on failure.
    pub async fn find_first(
        &self,
        entity: &str,
        filter: &Filter,
        params: &OperationParams,
    ) -> Option<Value> {
        match self.inner.find_first(entity, filter, params).await {
            Ok(found) => found,
            Err(error) => {
                let mut context = context_for("find_first", entity);
                context.insert("where".to_string(), filter.to_value());
                self.report(&error, context);
                None
            }
        }
    }

    /// Counts matching records; logs and returns `None` on failure.
    pub async fn count(
        &self,
        entity: &str,
        filter: &Filter,
        params: &OperationParams,
    ) -> Option<u64> {
        match self.inner.count(entity, filter, params).await {
            Ok(total) => total,
            Err(error) => {
                let mut context = context_for("count", entity);
                context.insert("where".to_string(), filter.to_value());
                self.report(&error, context);
                None
            }
        }
    }

    /// Creates a record; logs and returns `None` on failure.
    pub async fn create(&self, entity: &str, data: Value) -> Option<Value> {
        match self.inner.create(entity, data.clone()).await {
            Ok(created) => created,
            Err(error) => {
                let mut context = context_for("create", entity);
                context.insert("data".to_string(), data);
                self.report(&error, context);
                None
            }
        }
    }

    /// Creates many records; logs and returns `None` on failure.
    pub async fn mass_create(&self, entity: &str, records: Vec<Value>) -> Option<Value> {
        match self.inner.mass_create(entity, records.clone()).await {
            Ok(created) => created,
            Err(error) => {
                let mut context = context_for("mass_create", entity);
                context.insert("data".to_string(), Value::Array(records));
                self.report(&error, context);
                None
            }
        }
    }

    /// Patches a record; logs and returns `None` on failure.
    pub async fn patch(
        &self,
        entity: &str,
        id: impl Into<RecordId>,
        data: Value,
    ) -> Option<Value> {
        let id = id.into();
        match self.inner.patch(entity, id.clone(), data.clone()).await {
            Ok(patched) => patched,
            Err(error) => {
                let mut context = context_for("patch", entity);
                context.insert("id".to_string(), Value::from(id.as_str()));
                context.insert("data".to_string(), data);
                self.report(&error, context);
                None
            }
        }
    }

    /// Deletes a record; returns `false` on failure.
    ///
    /// A 404-equivalent failure means the record is already absent: the
    /// delete is treated as settled and nothing is logged. Every other
    /// failure logs exactly once.
    pub async fn delete(&self, entity: &str, id: impl Into<RecordId>, with: &[String]) -> bool {
        let id = id.into();
        match self.inner.delete(entity, id.clone(), with).await {
            Ok(deleted) => deleted,
            Err(error) => {
                if !error.is_not_found() {
                    let mut context = context_for("delete", entity);
                    context.insert("id".to_string(), Value::from(id.as_str()));
                    self.report(&error, context);
                }
                false
            }
        }
    }

    /// Searches a collection; logs and returns `None` on failure.
    pub async fn search(
        &self,
        entity: &str,
        fields: &[String],
        like: &BTreeMap<String, Value>,
    ) -> Option<Value> {
        match self.inner.search(entity, fields, like).await {
            Ok(found) => found,
            Err(error) => {
                let mut context = context_for("search", entity);
                context.insert(
                    "like".to_string(),
                    Value::Object(like.clone().into_iter().collect()),
                );
                self.report(&error, context);
                None
            }
        }
    }

    /// Reads a complete paged result set; logs and returns an empty set on
    /// failure.
    pub async fn read_all(
        &self,
        entity: &str,
        filter: &Filter,
        params: &OperationParams,
        chunk_size: NonZeroU32,
    ) -> Vec<Value> {
        match self
            .inner
            .pages(chunk_size)
            .read_all(entity, filter, params)
            .await
        {
            Ok(all) => all,
            Err(error) => {
                let mut context = context_for("read_all", entity);
                context.insert("where".to_string(), filter.to_value());
                self.report(&error, context);
                Vec::new()
            }
        }
    }

    fn report(&self, error: &ApiError, context: BTreeMap<String, Value>) {
        self.logger.error(&error.to_string(), &context);
    }
}

fn context_for(action: &str, entity: &str) -> BTreeMap<String, Value> {
    let mut context = BTreeMap::new();
    context.insert("action".to_string(), Value::from(action));
    context.insert("entity".to_string(), Value::from(entity));
    context
}
