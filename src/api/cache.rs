//
//  crud-sdk
//  api/cache.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/14.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Cache collaborator interface and an in-process TTL implementation.
//!
//! The core treats the cache as best-effort: a miss, an expired entry, or an
//! absent collaborator always falls through to a live transport call. Keys are
//! method-qualified canonical URIs, so distinct filter and pagination
//! combinations never collide. Only GET-equivalent requests are eligible, and
//! only successful responses are stored — both rules are enforced by the
//! client, not by implementations of this trait.
//!
//! There is no single-flight deduplication: concurrent callers racing on the
//! same uncached key each trigger an independent live call and the last write
//! wins. Collaborators that need request coalescing must provide it themselves.
//!
//! # Example
//!
//! ```rust
//! use crud_sdk::api::{MemoryCache, Response, ResponseCache};
//! use serde_json::json;
//!
//! let cache = MemoryCache::new(chrono::Duration::seconds(60));
//! cache.put("GET crud/users", Response::ok(Some(json!([]))));
//!
//! assert!(cache.has("GET crud/users"));
//! assert!(!cache.has("GET crud/orders"));
//! ```

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Duration, Utc};

use super::response::Response;

/// The cache collaborator.
///
/// Implementations own entry storage and TTL expiry; the core only calls
/// `has`/`get`/`put`.
pub trait ResponseCache: Send + Sync {
    /// Returns `true` if a live entry exists for `key`.
    fn has(&self, key: &str) -> bool;

    /// Returns the cached response for `key`, if a live entry exists.
    fn get(&self, key: &str) -> Option<Response>;

    /// Stores a response under `key`.
    fn put(&self, key: &str, response: Response);
}

/// A cached response with its expiry timestamp.
#[derive(Debug, Clone)]
struct CacheEntry {
    response: Response,
    expires_at: DateTime<Utc>,
}

impl CacheEntry {
    fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }
}

/// An in-process cache with a fixed TTL per entry.
///
/// Entries expire `ttl` after insertion; expired entries are dropped lazily on
/// the next lookup. Suitable for tests and single-process use — nothing is
/// persisted and there is no size bound.
pub struct MemoryCache {
    ttl: Duration,
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl MemoryCache {
    /// Creates a cache whose entries live for `ttl` after insertion.
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Creates a cache with a TTL given in whole seconds.
    pub fn with_ttl_secs(secs: i64) -> Self {
        Self::new(Duration::seconds(secs))
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, CacheEntry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ResponseCache for MemoryCache {
    fn has(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    fn get(&self, key: &str) -> Option<Response> {
        let mut entries = self.lock();

        match entries.get(key) {
            Some(entry) if entry.is_expired() => {
                entries.remove(key);
                None
            }
            Some(entry) => Some(entry.response.clone()),
            None => None,
        }
    }

    fn put(&self, key: &str, response: Response) {
        let entry = CacheEntry {
            response,
            expires_at: Utc::now() + self.ttl,
        };
        self.lock().insert(key.to_string(), entry);
    }
}
