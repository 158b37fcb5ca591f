//! Caching layer for intent extraction.
//!
//! Model calls are slow and deterministic at temperature zero, so extracted
//! queries are cached by the normalized message text.

use std::time::Duration;

use moka::future::Cache as MokaCache;
use tracing::debug;

use crate::domain::TravelQuery;
use crate::intent::{IntentClient, IntentError};

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(600),
            max_capacity: 1000,
        }
    }
}

/// Cache key for a message: lowercase, with whitespace runs collapsed.
fn cache_key(message: &str) -> String {
    message
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Cache of extracted queries.
pub struct IntentCache {
    queries: MokaCache<String, TravelQuery>,
}

impl IntentCache {
    /// Create a new cache with the given configuration.
    pub fn new(config: &CacheConfig) -> Self {
        let queries = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { queries }
    }

    pub async fn get(&self, message: &str) -> Option<TravelQuery> {
        self.queries.get(&cache_key(message)).await
    }

    pub async fn insert(&self, message: &str, query: TravelQuery) {
        self.queries.insert(cache_key(message), query).await;
    }

    /// Get cache statistics (for monitoring).
    pub fn entry_count(&self) -> u64 {
        self.queries.entry_count()
    }

    /// Invalidate all cached entries.
    pub fn invalidate_all(&self) {
        self.queries.invalidate_all();
    }
}

/// Intent client with caching.
///
/// Only successful extractions are cached; failures are retried on the next
/// request.
pub struct CachedIntentClient {
    client: IntentClient,
    cache: IntentCache,
}

impl CachedIntentClient {
    /// Create a new cached client.
    pub fn new(client: IntentClient, cache_config: &CacheConfig) -> Self {
        Self {
            client,
            cache: IntentCache::new(cache_config),
        }
    }

    /// Extract a query, using the cache if available.
    pub async fn extract(&self, message: &str) -> Result<TravelQuery, IntentError> {
        if let Some(cached) = self.cache.get(message).await {
            debug!(message, "intent cache hit");
            return Ok(cached);
        }

        let query = self.client.extract(message).await?;
        self.cache.insert(message, query.clone()).await;

        Ok(query)
    }

    /// Access the underlying client for requests that bypass the cache.
    pub fn client(&self) -> &IntentClient {
        &self.client
    }

    /// Get cache statistics.
    pub fn cache_entry_count(&self) -> u64 {
        self.cache.entry_count()
    }

    /// Invalidate all cached entries.
    pub fn invalidate_cache(&self) {
        self.cache.invalidate_all();
    }
}
