//! Runtime dependencies injected into a panel when it starts.

use crate::cache::QueryCache;
use crate::observe::{PanelObserver, TracingObserver};
use crate::roles::RoleMap;
use crate::services::{
    CacheRefresh, IdentityService, LineItemDeleter, LineItemQuery, NavigationSink, NoCache,
    NotificationSink, StockUpdater, TracingNavigator, TracingNotifier,
};
use std::sync::Arc;

/// Everything the panel talks to, passed to [`PanelActor::run`](super::PanelActor::run)
/// rather than to the constructor so the panel can be created before its platform is wired.
#[derive(Clone)]
pub struct PanelContext {
    pub query: Arc<dyn LineItemQuery>,
    pub deleter: Arc<dyn LineItemDeleter>,
    pub stock: Arc<dyn StockUpdater>,
    pub identity: Arc<dyn IdentityService>,
    pub cache: Arc<dyn CacheRefresh>,
    pub notifier: Arc<dyn NotificationSink>,
    pub navigator: Arc<dyn NavigationSink>,
    pub observer: Arc<dyn PanelObserver>,
    pub roles: RoleMap,
}

impl PanelContext {
    /// Wires every data service to one platform, with no query cache, tracing sinks and the
    /// default role table.
    pub fn new<P>(platform: Arc<P>) -> Self
    where
        P: LineItemQuery + LineItemDeleter + StockUpdater + IdentityService + 'static,
    {
        Self {
            query: platform.clone(),
            deleter: platform.clone(),
            stock: platform.clone(),
            identity: platform,
            cache: Arc::new(NoCache),
            notifier: Arc::new(TracingNotifier),
            navigator: Arc::new(TracingNavigator),
            observer: Arc::new(TracingObserver),
            roles: RoleMap::default(),
        }
    }

    /// Reads through `cache` and refreshes it after mutations.
    pub fn with_query_cache(mut self, cache: Arc<QueryCache>) -> Self {
        self.query = cache.clone();
        self.cache = cache;
        self
    }

    pub fn with_query(mut self, query: Arc<dyn LineItemQuery>) -> Self {
        self.query = query;
        self
    }

    pub fn with_deleter(mut self, deleter: Arc<dyn LineItemDeleter>) -> Self {
        self.deleter = deleter;
        self
    }

    pub fn with_stock_updater(mut self, stock: Arc<dyn StockUpdater>) -> Self {
        self.stock = stock;
        self
    }

    pub fn with_identity(mut self, identity: Arc<dyn IdentityService>) -> Self {
        self.identity = identity;
        self
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn NotificationSink>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn with_navigator(mut self, navigator: Arc<dyn NavigationSink>) -> Self {
        self.navigator = navigator;
        self
    }

    pub fn with_observer(mut self, observer: Arc<dyn PanelObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn with_roles(mut self, roles: RoleMap) -> Self {
        self.roles = roles;
        self
    }
}
