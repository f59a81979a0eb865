//
//  crud-sdk
//  api/reader.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/14.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Chunked multi-page reads.
//!
//! [`PageReader`] assembles a complete result set from a paged endpoint by
//! driving repeated `find` calls: page 1, page 2, ... until the remote side
//! stops announcing a next page. Pages are fetched strictly in sequence — each
//! awaited to completion before the next begins — and never concurrently.
//!
//! A failed page aborts the whole read and surfaces the classified error,
//! regardless of the client's propagation mode: a chunked read never returns
//! partial data silently. An empty first page is not an error; it yields an
//! empty result set.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::num::NonZeroU32;
//! use std::sync::Arc;
//!
//! use crud_sdk::api::{CrudClient, Filter, HttpProvider, OperationParams};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let client = CrudClient::new(Arc::new(HttpProvider::new("https://api.example.com/core")?));
//!
//! let chunk = NonZeroU32::new(100).expect("non-zero");
//! let everything = client
//!     .pages(chunk)
//!     .read_all("orders", &Filter::new(), &OperationParams::new())
//!     .await?;
//! # Ok(())
//! # }
//! ```

use std::num::NonZeroU32;

use serde_json::Value;

use super::client::CrudClient;
use super::error::ApiError;
use super::params::{Filter, OperationParams};
use super::request::ApiRequest;

/// Drives sequential page fetches until the result set is complete.
///
/// Created via [`CrudClient::pages`]. The chunk size is a [`NonZeroU32`] so
/// positivity is carried in the type; there is no default.
pub struct PageReader<'a> {
    client: &'a CrudClient,
    chunk_size: NonZeroU32,
}

impl<'a> PageReader<'a> {
    /// Creates a reader fetching `chunk_size` records per page.
    pub fn new(client: &'a CrudClient, chunk_size: NonZeroU32) -> Self {
        Self { client, chunk_size }
    }

    /// Reads the complete result set for a filtered collection.
    ///
    /// Each page is requested with `paginate=1`, the current page number, and
    /// `count` set to the chunk size. The page envelope's `data` array is
    /// appended to the accumulator; the read continues while the envelope
    /// carries a non-null `next` marker.
    ///
    /// # Errors
    ///
    /// Returns the classified error of the first failed page. No partial data
    /// is returned in that case.
    pub async fn read_all(
        &self,
        entity: &str,
        filter: &Filter,
        params: &OperationParams,
    ) -> Result<Vec<Value>, ApiError> {
        let mut collected = Vec::new();
        let mut page: u64 = 1;

        loop {
            let page_params = params
                .clone()
                .paginate(true)
                .page(page)
                .count(u64::from(self.chunk_size.get()));

            let request = ApiRequest::find(entity, filter, &page_params);
            let response = self.client.execute(request).await;

            if !response.is_success() {
                return Err(ApiError::from_failed(&response));
            }

            let Some(envelope) = response.into_contents() else {
                break;
            };

            if let Some(items) = envelope.get("data").and_then(Value::as_array) {
                collected.extend(items.iter().cloned());
            }

            let has_next = envelope.get("next").is_some_and(|marker| !marker.is_null());
            if !has_next {
                break;
            }

            page += 1;
        }

        tracing::debug!(%entity, records = collected.len(), pages = page, "chunked read complete");
        Ok(collected)
    }
}
