//! Memoization of chart views
//!
//! Views are pure functions of the stored bars, so the cache only saves recomputation.
//! Entries expire after the configured TTL and are dropped wholesale on refresh.

use crate::timeseries::ChartView;
use cached::{Cached, TimedCache};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

/// Cache key: ticker plus requested window size
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WindowKey {
    pub ticker: String,
    pub visible: usize,
}

impl WindowKey {
    pub fn new(ticker: impl Into<String>, visible: usize) -> Self {
        Self {
            ticker: ticker.into(),
            visible,
        }
    }
}

/// Thread-safe TTL cache of [`ChartView`]s
pub struct WindowCache {
    cache: Arc<RwLock<TimedCache<WindowKey, ChartView>>>,
}

impl WindowCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            cache: Arc::new(RwLock::new(TimedCache::with_lifespan(ttl))),
        }
    }

    pub async fn get(&self, key: &WindowKey) -> Option<ChartView> {
        let mut cache = self.cache.write().await;
        cache.cache_get(key).cloned()
    }

    pub async fn insert(&self, key: WindowKey, view: ChartView) {
        let mut cache = self.cache.write().await;
        let _ = cache.cache_set(key, view);
    }

    /// Return the cached view or compute, store and return a fresh one
    pub async fn get_or_compute<F, Fut, E>(&self, key: WindowKey, compute: F) -> Result<ChartView, E>
    where
        F: FnOnce() -> Fut,
        Fut: std::future::Future<Output = Result<ChartView, E>>,
    {
        if let Some(view) = self.get(&key).await {
            tracing::debug!(ticker = %key.ticker, visible = key.visible, "Window cache hit");
            return Ok(view);
        }

        tracing::debug!(ticker = %key.ticker, visible = key.visible, "Window cache miss");
        let view = compute().await?;
        self.insert(key, view.clone()).await;
        Ok(view)
    }

    pub async fn invalidate(&self, key: &WindowKey) {
        let mut cache = self.cache.write().await;
        let _ = cache.cache_remove(key);
    }

    pub async fn clear(&self) {
        let mut cache = self.cache.write().await;
        cache.cache_clear();
    }

    pub async fn len(&self) -> usize {
        let cache = self.cache.read().await;
        cache.cache_size()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Clone for WindowCache {
    fn clone(&self) -> Self {
        Self {
            cache: Arc::clone(&self.cache),
        }
    }
}

impl std::fmt::Debug for WindowCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WindowCache").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn view(visible: usize) -> ChartView {
        ChartView {
            bars: Vec::new(),
            levels: Vec::new(),
            visible_count: visible,
            total: 0,
        }
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let cache = WindowCache::new(Duration::from_secs(60));
        let key = WindowKey::new("005930", 90);
        assert!(cache.get(&key).await.is_none());

        cache.insert(key.clone(), view(90)).await;
        assert_eq!(cache.get(&key).await, Some(view(90)));
        assert!(cache.get(&WindowKey::new("005930", 60)).await.is_none());
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_get_or_compute_runs_once() {
        let cache = WindowCache::new(Duration::from_secs(60));
        let calls = AtomicUsize::new(0);

        for _ in 0..3 {
            let out: Result<ChartView, ()> = cache
                .get_or_compute(WindowKey::new("000660", 30), || async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(view(30))
                })
                .await;
            assert_eq!(out.unwrap().visible_count, 30);
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_compute_error_not_cached() {
        let cache = WindowCache::new(Duration::from_secs(60));
        let out: Result<ChartView, &str> = cache
            .get_or_compute(WindowKey::new("000660", 30), || async { Err("boom") })
            .await;
        assert!(out.is_err());
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn test_invalidate_and_clear() {
        let cache = WindowCache::new(Duration::from_secs(60));
        cache.insert(WindowKey::new("a", 30), view(30)).await;
        cache.insert(WindowKey::new("b", 30), view(30)).await;

        cache.invalidate(&WindowKey::new("a", 30)).await;
        assert_eq!(cache.len().await, 1);

        let shared = cache.clone();
        shared.clear().await;
        assert!(cache.is_empty().await);
    }
}
