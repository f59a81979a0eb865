//
//  crud-sdk
//  api/provider.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/14.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Transport collaborator interface and the shipped HTTP implementation.
//!
//! The core never talks to the network directly: it hands a canonical
//! [`ApiRequest`] to a [`RequestProvider`] and interprets the [`Response`] it
//! gets back. Retries, transport timeouts, and authentication policy are the
//! provider's concern, not the core's.
//!
//! [`HttpProvider`] is the shipped implementation: a reqwest-based transport
//! that resolves relative URIs against a base URL, applies an optional
//! [`Credential`], decodes JSON bodies, and maps every outcome — including
//! connection failures — into a [`Response`] rather than an error.
//!
//! # Example
//!
//! ```rust,no_run
//! use crud_sdk::api::HttpProvider;
//! use crud_sdk::auth::Credential;
//!
//! # fn example() -> anyhow::Result<()> {
//! let provider = HttpProvider::new("https://api.example.com/core")?
//!     .with_credential(Credential::bearer("token"));
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;

use crate::auth::Credential;
use crate::config::EndpointConfig;

use super::request::{ApiRequest, Method};
use super::response::{Failure, Response};

/// The transport collaborator.
///
/// Implementations must perform the call, decode the body, and populate the
/// response's success flag, contents, and failure record. A provider never
/// returns an error — every failure mode becomes a failed [`Response`] so the
/// classification layer sees a uniform shape.
#[async_trait]
pub trait RequestProvider: Send + Sync {
    /// Executes the request and interprets the outcome.
    async fn request(&self, request: &ApiRequest) -> Response;
}

/// The shipped reqwest-based transport.
///
/// Resolves request URIs against a base URL, applies the configured
/// credential, and sends a `crud-sdk/<version>` user agent. Non-success
/// statuses are decoded into HTTP-kind failures with the error payload
/// preserved; connection and decode failures become transport-kind failures.
pub struct HttpProvider {
    http: Client,
    base_url: String,
    credential: Option<Credential>,
}

impl HttpProvider {
    /// Creates a provider for the given base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Ok(Self {
            http: Client::builder()
                .user_agent(format!("crud-sdk/{}", crate::VERSION))
                .build()?,
            base_url: normalize(base_url.into()),
            credential: None,
        })
    }

    /// Creates a provider from an endpoint profile.
    ///
    /// Applies the profile's request timeout when one is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn from_config(endpoint: &EndpointConfig) -> Result<Self> {
        let mut builder = Client::builder().user_agent(format!("crud-sdk/{}", crate::VERSION));

        if let Some(timeout) = endpoint.timeout_secs {
            builder = builder.timeout(Duration::from_secs(timeout));
        }

        Ok(Self {
            http: builder.build()?,
            base_url: normalize(endpoint.base_url.clone()),
            credential: None,
        })
    }

    /// Sets the credential applied to every outgoing request.
    pub fn with_credential(mut self, credential: Credential) -> Self {
        self.credential = Some(credential);
        self
    }

    /// Returns the base URL requests are resolved against.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl RequestProvider for HttpProvider {
    async fn request(&self, request: &ApiRequest) -> Response {
        let url = format!("{}/{}", self.base_url, request.uri);

        let mut builder = match request.method {
            Method::Get => self.http.get(&url),
            Method::Post => self.http.post(&url),
            Method::Patch => self.http.patch(&url),
            Method::Delete => self.http.delete(&url),
        };

        if let Some(credential) = &self.credential {
            builder = credential.apply_to_request(builder);
        }

        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }

        if let Some(body) = &request.body {
            builder = if request.as_form {
                builder.form(body)
            } else {
                builder.json(body)
            };
        }

        let response = match builder.send().await {
            Ok(response) => response,
            Err(error) => {
                tracing::debug!(%url, %error, "transport call failed");
                return Response::failed(Failure::transport(error.to_string()));
            }
        };

        let status = response.status();
        let text = match response.text().await {
            Ok(text) => text,
            Err(error) => {
                return Response::failed(Failure::transport(format!(
                    "failed to read response body: {error}"
                )));
            }
        };

        if !status.is_success() {
            tracing::debug!(%url, status = status.as_u16(), "request rejected");
            return Response::failed(Failure::from_error_body(
                status.as_u16(),
                status.canonical_reason().unwrap_or("unknown status"),
                &text,
            ));
        }

        if text.trim().is_empty() {
            return Response::ok(None);
        }

        match serde_json::from_str(&text) {
            Ok(contents) => Response::ok(Some(contents)),
            Err(error) => Response::failed(Failure::transport(format!(
                "failed to decode response body: {error}"
            ))),
        }
    }
}

/// Strips trailing slashes so URI joining stays canonical.
fn normalize(base_url: String) -> String {
    base_url.trim_end_matches('/').to_string()
}
