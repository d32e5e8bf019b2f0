// ABOUTME: Single-slot TTL cache used for Recruitee lookup catalogs
// ABOUTME: Values expire after a fixed duration; readers clone the cached value
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 AppUnite

use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;

/// A single cached value with a time-to-live.
///
/// Lookup catalogs (offers, talent pools, tags, metric definitions) change
/// rarely; one slot per catalog is enough.
#[derive(Debug)]
pub struct TtlCache<T> {
    ttl: Duration,
    slot: RwLock<Option<(Instant, T)>>,
}

impl<T: Clone> TtlCache<T> {
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            slot: RwLock::new(None),
        }
    }

    /// Return the cached value if it has not expired
    pub async fn get(&self) -> Option<T> {
        let guard = self.slot.read().await;
        match guard.as_ref() {
            Some((stored_at, value)) if stored_at.elapsed() < self.ttl => Some(value.clone()),
            _ => None,
        }
    }

    /// Store a fresh value, resetting the TTL window
    pub async fn put(&self, value: T) {
        *self.slot.write().await = Some((Instant::now(), value));
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_returns_value_within_ttl() {
        let cache = TtlCache::new(Duration::from_secs(900));
        assert_eq!(cache.get().await, None::<u32>);

        cache.put(42_u32).await;
        tokio::time::advance(Duration::from_secs(899)).await;
        assert_eq!(cache.get().await, Some(42));
    }

    #[tokio::test(start_paused = true)]
    async fn test_expires_after_ttl() {
        let cache = TtlCache::new(Duration::from_secs(900));
        cache.put("catalog".to_string()).await;

        tokio::time::advance(Duration::from_secs(901)).await;
        assert_eq!(cache.get().await, None);

        // refreshing restarts the window
        cache.put("fresh".to_string()).await;
        assert_eq!(cache.get().await, Some("fresh".to_string()));
    }
}
