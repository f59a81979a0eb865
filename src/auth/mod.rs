//
//  crud-sdk
//  auth/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/14.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # Authentication Module
//!
//! Credential types applied to outgoing requests by the shipped HTTP
//! transport. Authentication *policy* — obtaining, refreshing, and storing
//! credentials — is the host application's concern; the SDK only attaches
//! what it is given to each request.
//!
//! ## Supported Methods
//!
//! - **Bearer token**: `Authorization: Bearer <token>`, with optional expiry
//!   tracking so hosts can refresh proactively.
//! - **Basic**: standard HTTP Basic authentication with username and password.
//!
//! ## Example
//!
//! ```rust
//! use chrono::{Duration, Utc};
//! use crud_sdk::auth::Credential;
//!
//! let token = Credential::bearer("eyJhbGciOiJIUzI1NiIs...");
//! assert!(!token.is_expired());
//!
//! let expiring = Credential::bearer_until("token", Utc::now() + Duration::hours(1));
//! assert!(!expiring.is_expired());
//! ```

use chrono::{DateTime, Utc};
use reqwest::RequestBuilder;

/// A credential attached to every outgoing request.
///
/// # Variants
///
/// - `Bearer`: token authentication with optional expiry tracking
/// - `Basic`: HTTP Basic authentication with username and password
#[derive(Debug, Clone)]
pub enum Credential {
    /// Bearer token authentication.
    Bearer {
        /// The token placed in the `Authorization` header.
        token: String,
        /// Optional expiration timestamp for the token.
        expires_at: Option<DateTime<Utc>>,
    },
    /// HTTP Basic authentication.
    Basic {
        /// The username for authentication.
        username: String,
        /// The password for authentication.
        password: String,
    },
}

impl Credential {
    /// Creates a bearer credential without expiry tracking.
    pub fn bearer(token: impl Into<String>) -> Self {
        Self::Bearer {
            token: token.into(),
            expires_at: None,
        }
    }

    /// Creates a bearer credential that expires at the given time.
    pub fn bearer_until(token: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        Self::Bearer {
            token: token.into(),
            expires_at: Some(expires_at),
        }
    }

    /// Creates a basic-auth credential.
    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::Basic {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Applies the credential to an outgoing request.
    ///
    /// Expiry is not checked here; call [`is_expired`](Self::is_expired)
    /// before issuing requests when the host tracks token lifetimes.
    pub fn apply_to_request(&self, request: RequestBuilder) -> RequestBuilder {
        match self {
            Self::Bearer { token, .. } => request.bearer_auth(token),
            Self::Basic { username, password } => request.basic_auth(username, Some(password)),
        }
    }

    /// Checks if the credential has expired.
    ///
    /// Only bearer credentials with an explicit expiry can expire; everything
    /// else always returns `false`.
    pub fn is_expired(&self) -> bool {
        match self {
            Self::Bearer {
                expires_at: Some(expires_at),
                ..
            } => Utc::now() >= *expires_at,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_bearer_without_expiry_never_expires() {
        assert!(!Credential::bearer("token").is_expired());
    }

    #[test]
    fn test_bearer_expiry() {
        let expired = Credential::bearer_until("token", Utc::now() - Duration::minutes(1));
        assert!(expired.is_expired());

        let live = Credential::bearer_until("token", Utc::now() + Duration::minutes(5));
        assert!(!live.is_expired());
    }

    #[test]
    fn test_basic_never_expires() {
        assert!(!Credential::basic("user", "pass").is_expired());
    }

    #[tokio::test]
    async fn test_bearer_header_applied() {
        let client = reqwest::Client::new();
        let request = Credential::bearer("secret")
            .apply_to_request(client.get("http://localhost/ignored"))
            .build()
            .expect("request builds");

        let header = request
            .headers()
            .get(reqwest::header::AUTHORIZATION)
            .expect("authorization header");
        assert_eq!(header.to_str().unwrap(), "Bearer secret");
    }

    #[tokio::test]
    async fn test_basic_header_applied() {
        let client = reqwest::Client::new();
        let request = Credential::basic("user", "pass")
            .apply_to_request(client.get("http://localhost/ignored"))
            .build()
            .expect("request builds");

        assert!(request
            .headers()
            .get(reqwest::header::AUTHORIZATION)
            .expect("authorization header")
            .to_str()
            .unwrap()
            .starts_with("Basic "));
    }
}
