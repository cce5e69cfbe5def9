//! # Platform Collaborators
//!
//! The panel owns no data of its own. Everything it reads or writes goes through the
//! contracts below, injected at start-up through [`PanelContext`](crate::panel::PanelContext).
//!
//! The async services (`LineItemQuery`, `LineItemDeleter`, `StockUpdater`, `IdentityService`,
//! `CacheRefresh`) resolve once per call. The sinks (`NotificationSink`, `NavigationSink`) are
//! fire-and-forget: the panel never waits on them and ignores what they do.
//!
//! Implementations shipped with the crate:
//! - [`InMemoryCrm`](crate::crm::InMemoryCrm) for the four data services,
//! - [`QueryCache`](crate::cache::QueryCache) for `LineItemQuery` + `CacheRefresh`,
//! - `Tracing*` sinks that log, and `Recording*` sinks that remember what they were sent.

use crate::error::ServiceError;
use crate::model::{LineItem, LineItemId, OpportunityId, ProductId};
use async_trait::async_trait;
use std::sync::Mutex;
use tracing::{error, info, warn};

#[async_trait]
pub trait LineItemQuery: Send + Sync {
    /// Every line item of `parent`, each joined with its product's current stock.
    async fn fetch_line_items(&self, parent: &OpportunityId) -> Result<Vec<LineItem>, ServiceError>;
}

#[async_trait]
pub trait LineItemDeleter: Send + Sync {
    async fn delete_line_item(&self, id: &LineItemId) -> Result<(), ServiceError>;
}

#[async_trait]
pub trait StockUpdater: Send + Sync {
    async fn update_stock(&self, product: &ProductId, quantity: f64) -> Result<(), ServiceError>;
}

#[async_trait]
pub trait IdentityService: Send + Sync {
    async fn current_user_profile_name(&self) -> Result<String, ServiceError>;
}

/// Handle on a cached query result that can be asked to re-fetch after a mutation.
#[async_trait]
pub trait CacheRefresh: Send + Sync {
    async fn refresh(&self, parent: &OpportunityId) -> Result<(), ServiceError>;
}

/// Cache hook for hosts without a query cache.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoCache;

#[async_trait]
impl CacheRefresh for NoCache {
    async fn refresh(&self, _parent: &OpportunityId) -> Result<(), ServiceError> {
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub message: String,
    pub severity: Severity,
}

impl Notification {
    pub fn new(title: impl Into<String>, message: impl Into<String>, severity: Severity) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            severity,
        }
    }
}

pub trait NotificationSink: Send + Sync {
    fn notify(&self, notification: Notification);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordType {
    Product,
}

pub trait NavigationSink: Send + Sync {
    fn navigate_to_record(&self, record_id: &str, record_type: RecordType);
}

/// Writes notifications to the log at a level matching their severity.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl NotificationSink for TracingNotifier {
    fn notify(&self, n: Notification) {
        match n.severity {
            Severity::Success | Severity::Info => {
                info!(title = %n.title, message = %n.message, "notify")
            }
            Severity::Warning => warn!(title = %n.title, message = %n.message, "notify"),
            Severity::Error => error!(title = %n.title, message = %n.message, "notify"),
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNavigator;

impl NavigationSink for TracingNavigator {
    fn navigate_to_record(&self, record_id: &str, record_type: RecordType) {
        info!(record_id, ?record_type, "navigate");
    }
}

/// Keeps every notification it receives, in order.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    received: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.received.lock().map(|n| n.clone()).unwrap_or_default()
    }

    pub fn last(&self) -> Option<Notification> {
        self.received.lock().ok().and_then(|n| n.last().cloned())
    }
}

impl NotificationSink for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        if let Ok(mut received) = self.received.lock() {
            received.push(notification);
        }
    }
}

/// Keeps every navigation request it receives, in order.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    received: Mutex<Vec<(String, RecordType)>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visits(&self) -> Vec<(String, RecordType)> {
        self.received.lock().map(|v| v.clone()).unwrap_or_default()
    }
}

impl NavigationSink for RecordingNavigator {
    fn navigate_to_record(&self, record_id: &str, record_type: RecordType) {
        if let Ok(mut received) = self.received.lock() {
            received.push((record_id.to_string(), record_type));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_sinks_keep_order() {
        let notifier = RecordingNotifier::new();
        notifier.notify(Notification::new("a", "first", Severity::Success));
        notifier.notify(Notification::new("b", "second", Severity::Error));
        assert_eq!(notifier.notifications().len(), 2);
        assert_eq!(notifier.last().unwrap().severity, Severity::Error);

        let navigator = RecordingNavigator::new();
        navigator.navigate_to_record("p1", RecordType::Product);
        assert_eq!(navigator.visits(), vec![("p1".to_string(), RecordType::Product)]);
    }

    #[tokio::test]
    async fn test_no_cache_always_succeeds() {
        assert!(NoCache.refresh(&OpportunityId::from("opp")).await.is_ok());
    }
}
