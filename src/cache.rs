//! # Query Cache
//!
//! Memoizes line-item queries per opportunity. The same instance serves as the panel's query
//! service and as its [`CacheRefresh`] hook, so a refresh after a mutation rewrites exactly
//! the entry the next load will read.
//!
//! Failed fetches are never cached. A refresh that finds the parent empty (`NotFound`) drops
//! the entry and succeeds.

use crate::error::ServiceError;
use crate::model::{LineItem, OpportunityId};
use crate::services::{CacheRefresh, LineItemQuery};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, warn};

pub struct QueryCache {
    inner: Arc<dyn LineItemQuery>,
    entries: RwLock<HashMap<OpportunityId, Vec<LineItem>>>,
}

impl QueryCache {
    pub fn new(inner: Arc<dyn LineItemQuery>) -> Self {
        Self {
            inner,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// The cached result for `parent`, without touching the underlying service.
    pub async fn cached(&self, parent: &OpportunityId) -> Option<Vec<LineItem>> {
        self.entries.read().await.get(parent).cloned()
    }

    /// Drops the entry so the next read goes to the service.
    pub async fn invalidate(&self, parent: &OpportunityId) {
        self.entries.write().await.remove(parent);
    }
}

#[async_trait]
impl LineItemQuery for QueryCache {
    async fn fetch_line_items(
        &self,
        parent: &OpportunityId,
    ) -> Result<Vec<LineItem>, ServiceError> {
        if let Some(hit) = self.cached(parent).await {
            debug!(%parent, count = hit.len(), "query cache hit");
            return Ok(hit);
        }
        let items = self.inner.fetch_line_items(parent).await?;
        debug!(%parent, count = items.len(), "query cache fill");
        self.entries.write().await.insert(parent.clone(), items.clone());
        Ok(items)
    }
}

#[async_trait]
impl CacheRefresh for QueryCache {
    async fn refresh(&self, parent: &OpportunityId) -> Result<(), ServiceError> {
        match self.inner.fetch_line_items(parent).await {
            Ok(items) => {
                debug!(%parent, count = items.len(), "query cache refreshed");
                self.entries.write().await.insert(parent.clone(), items);
                Ok(())
            }
            Err(ServiceError::NotFound(_)) => {
                // Parent has no items left; the next read asks the service again.
                debug!(%parent, "query cache refreshed to empty, entry dropped");
                self.invalidate(parent).await;
                Ok(())
            }
            Err(e) => {
                warn!(%parent, error = %e, "query cache refresh failed, entry dropped");
                self.invalidate(parent).await;
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Product;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Serves whatever `items` currently holds and counts calls.
    #[derive(Default)]
    struct CountingQuery {
        calls: AtomicUsize,
        items: Mutex<Vec<LineItem>>,
        down: AtomicBool,
    }

    #[async_trait]
    impl LineItemQuery for CountingQuery {
        async fn fetch_line_items(
            &self,
            parent: &OpportunityId,
        ) -> Result<Vec<LineItem>, ServiceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.down.load(Ordering::SeqCst) {
                return Err(ServiceError::Transport("unreachable".into()));
            }
            let items = self.items.lock().unwrap().clone();
            if items.is_empty() {
                return Err(ServiceError::NotFound(parent.to_string()));
            }
            Ok(items)
        }
    }

    fn item(id: &str) -> LineItem {
        LineItem::new(id, "opp", 1.0, 1.0, Product::new("p1", "Widget", 5.0))
    }

    #[tokio::test]
    async fn test_second_read_is_served_from_cache() {
        let source = Arc::new(CountingQuery::default());
        *source.items.lock().unwrap() = vec![item("a")];
        let cache = QueryCache::new(source.clone());
        let opp = OpportunityId::from("opp");

        cache.fetch_line_items(&opp).await.unwrap();
        cache.fetch_line_items(&opp).await.unwrap();
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_refresh_replaces_entry() {
        let source = Arc::new(CountingQuery::default());
        *source.items.lock().unwrap() = vec![item("a"), item("b")];
        let cache = QueryCache::new(source.clone());
        let opp = OpportunityId::from("opp");
        cache.fetch_line_items(&opp).await.unwrap();

        *source.items.lock().unwrap() = vec![item("b")];
        cache.refresh(&opp).await.unwrap();

        let cached = cache.cached(&opp).await.unwrap();
        assert_eq!(cached, vec![item("b")]);
    }

    #[tokio::test]
    async fn test_failed_refresh_drops_entry() {
        let source = Arc::new(CountingQuery::default());
        *source.items.lock().unwrap() = vec![item("a")];
        let cache = QueryCache::new(source.clone());
        let opp = OpportunityId::from("opp");
        cache.fetch_line_items(&opp).await.unwrap();

        source.down.store(true, Ordering::SeqCst);
        let result = cache.refresh(&opp).await;

        assert!(matches!(result, Err(ServiceError::Transport(_))));
        assert!(cache.cached(&opp).await.is_none());
    }

    #[tokio::test]
    async fn test_refresh_of_emptied_parent_succeeds() {
        let source = Arc::new(CountingQuery::default());
        *source.items.lock().unwrap() = vec![item("a")];
        let cache = QueryCache::new(source.clone());
        let opp = OpportunityId::from("opp");
        cache.fetch_line_items(&opp).await.unwrap();

        source.items.lock().unwrap().clear();
        assert_eq!(cache.refresh(&opp).await, Ok(()));
        assert!(cache.cached(&opp).await.is_none());

        // The next read reports the empty parent itself.
        let next = cache.fetch_line_items(&opp).await;
        assert!(matches!(next, Err(ServiceError::NotFound(_))));
    }
}
