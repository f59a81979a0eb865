//
//  crud-sdk
//  lib.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/14.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # CRUD SDK
//!
//! An async client SDK for remote services that expose their entities through a
//! uniform CRUD-over-HTTP contract (`crud/<entity>`, `crud/mass/<entity>`,
//! `crud/search/<entity>`).
//!
//! ## Overview
//!
//! Instead of hand-building HTTP calls, callers describe operations with semantic
//! parameters (filters, pagination, related-record hints) and the SDK takes care of
//! producing canonical wire requests, interpreting responses, caching repeated
//! reads, assembling multi-page result sets, and classifying provider-reported
//! failures into a typed error taxonomy.
//!
//! ## Features
//!
//! - **Semantic Operations**: `find`, `find_first`, `count`, `create`,
//!   `mass_create`, `patch`, `delete`, and `search` against any entity collection
//! - **Structured Parameters**: named option fields with verbatim pass-through of
//!   unrecognized remote-side options
//! - **Result Caching**: pluggable cache collaborator with TTL expiry for
//!   GET-equivalent requests
//! - **Transparent Pagination**: chunked reads assembled into a complete result set
//! - **Typed Errors**: validation, relation-conflict, transport, and generic API
//!   failures as distinct variants
//! - **Resilient Facade**: safe operation variants that log and default instead of
//!   propagating errors
//!
//! ## Module Structure
//!
//! - [`api`]: Request construction, response interpretation, caching, pagination,
//!   error classification, and the client/facade types
//! - [`auth`]: Credential types applied to outgoing requests
//! - [`config`]: Endpoint profile configuration stored as TOML
//! - [`logging`]: Structured logging collaborator interface
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use crud_sdk::{CrudClient, Filter, HttpProvider, OperationParams};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let provider = HttpProvider::new("https://api.example.com/core")?;
//! let client = CrudClient::new(Arc::new(provider)).strict(true);
//!
//! let users = client
//!     .find(
//!         "users",
//!         &Filter::new().field("status", "active"),
//!         &OperationParams::new().count(50),
//!     )
//!     .await?;
//! # Ok(())
//! # }
//! ```

/// Core request/response layer.
///
/// Provides request construction ([`api::ApiRequest`]), response interpretation
/// ([`api::Response`]), the cache and transport collaborator traits, pagination
/// ([`api::PageReader`]), error classification ([`api::ApiError`]), and the
/// [`api::CrudClient`] / [`api::SafeClient`] entry points.
pub mod api;

/// Credential management for outgoing requests.
///
/// Provides the [`auth::Credential`] enum (bearer tokens with optional expiry,
/// HTTP basic auth) applied by the shipped HTTP transport.
pub mod auth;

/// Configuration file management.
///
/// Manages endpoint profiles stored in platform-specific locations:
/// - Linux: `~/.config/crud-sdk/config.toml`
/// - macOS: `~/Library/Application Support/crud-sdk/config.toml`
/// - Windows: `%APPDATA%\crud-sdk\config.toml`
pub mod config;

/// Structured logging collaborator.
///
/// Defines the [`logging::ContextLogger`] trait consumed by the resilient facade
/// and the [`logging::TracingLogger`] implementation emitting `tracing` events.
pub mod logging;

/// Re-export of the core client.
///
/// The [`CrudClient`] is the primary entry point for issuing semantic CRUD
/// operations against a remote entity collection.
pub use api::CrudClient;

/// Re-export of the resilient facade.
///
/// The [`SafeClient`] mirrors every core operation with a variant that never
/// returns an error, logging failures and returning safe defaults instead.
pub use api::SafeClient;

/// Re-export of the chunked reader.
pub use api::PageReader;

/// Re-export of the domain error taxonomy.
pub use api::ApiError;

/// Re-exports of the request/response value types.
pub use api::{ApiRequest, Failure, FailureKind, Method, Response};

/// Re-exports of the structured operation parameters.
pub use api::{Filter, OperationParams, RecordId};

/// Re-exports of the transport and cache collaborator interfaces.
pub use api::{HttpProvider, MemoryCache, RequestProvider, ResponseCache};

/// Re-export of the credential type.
pub use auth::Credential;

/// Re-exports of the configuration types.
pub use config::{Config, EndpointConfig};

/// Re-exports of the logging collaborator.
pub use logging::{ContextLogger, TracingLogger};

/// Crate version constant.
///
/// Used for the `User-Agent` header sent by the shipped HTTP transport.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
