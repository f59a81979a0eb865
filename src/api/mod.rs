//
//  crud-sdk
//  api/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/14.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # Core API Layer
//!
//! This module implements the request-construction / response-interpretation /
//! resilience core of the SDK.
//!
//! ## Architecture
//!
//! The layer is composed rather than layered by inheritance: a core client is
//! wrapped by independently testable collaborators, each behind its own trait.
//!
//! - [`request`]: Canonical wire request construction per operation
//! - [`params`]: Structured filters, operation options, and record identifiers
//! - [`response`]: Success/failure response value types
//! - [`error`]: Domain error taxonomy and data-driven failure classification
//! - [`provider`]: Transport collaborator trait and the shipped reqwest transport
//! - [`cache`]: Cache collaborator trait and an in-process TTL cache
//! - [`client`]: The [`CrudClient`] semantic operations
//! - [`reader`]: Chunked multi-page reads via [`PageReader`]
//! - [`safe`]: The never-failing [`SafeClient`] facade
//!
//! ## Control Flow
//!
//! A semantic operation builds an [`ApiRequest`], consults the cache for
//! GET-equivalent requests, executes through the [`RequestProvider`], and
//! interprets the resulting [`Response`]. Failures are classified into
//! [`ApiError`] variants which propagate in strict mode, are absorbed in
//! permissive mode, or are logged and swallowed by the [`SafeClient`].
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use crud_sdk::api::{CrudClient, Filter, HttpProvider, OperationParams};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let provider = HttpProvider::new("https://api.example.com/core")?;
//! let client = CrudClient::new(Arc::new(provider));
//!
//! let orders = client
//!     .find("orders", &Filter::new().field("open", true), &OperationParams::new())
//!     .await?;
//! # Ok(())
//! # }
//! ```

/// Canonical wire request construction.
pub mod request;

/// Structured filters, operation options, and record identifiers.
pub mod params;

/// Response value types produced by the transport collaborator.
pub mod response;

/// Domain error taxonomy and failure classification.
pub mod error;

/// Transport collaborator trait and the shipped reqwest-based implementation.
pub mod provider;

/// Cache collaborator trait and an in-process TTL implementation.
pub mod cache;

/// The core client with the semantic CRUD operations.
pub mod client;

/// Chunked multi-page reads.
pub mod reader;

/// The resilient, never-failing facade.
pub mod safe;

pub use cache::{MemoryCache, ResponseCache};
pub use client::CrudClient;
pub use error::ApiError;
pub use params::{Filter, OperationParams, RecordId};
pub use provider::{HttpProvider, RequestProvider};
pub use reader::PageReader;
pub use request::{ApiRequest, Method, Operation};
pub use response::{Failure, FailureKind, Response};
pub use safe::SafeClient;
