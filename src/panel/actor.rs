//! # Panel Actor
//!
//! Owns one panel's working list, status and loading flag. Requests are handled strictly
//! one at a time, so a second mutation waits in the channel until the first has resolved
//! and a late response can never overwrite newer state.
//!
//! Every significant transition is reported to the injected
//! [`PanelObserver`](crate::observe::PanelObserver); the actor itself never logs.

use super::context::PanelContext;
use super::message::PanelRequest;
use super::parse_quantity;
use super::view::PanelView;
use crate::error::PanelError;
use crate::model::{LineItem, LineItemId, OpportunityId, ProductId};
use crate::observe::{Operation, PanelEvent, PanelStatus};
use crate::reconcile::{annotate, any_over_stock};
use crate::roles::ActorRole;
use crate::services::{Notification, RecordType, Severity};
use tokio::sync::{mpsc, watch};

pub struct PanelActor {
    receiver: mpsc::Receiver<PanelRequest>,
    parent: OpportunityId,
    items: Vec<LineItem>,
    status: PanelStatus,
    role: ActorRole,
    last_error: Option<PanelError>,
    loading: watch::Sender<bool>,
}

impl PanelActor {
    pub fn new(
        parent: OpportunityId,
        receiver: mpsc::Receiver<PanelRequest>,
        loading: watch::Sender<bool>,
    ) -> Self {
        Self {
            receiver,
            parent,
            items: Vec::new(),
            status: PanelStatus::Idle,
            role: ActorRole::Other,
            last_error: None,
            loading,
        }
    }

    /// Resolves the role, performs the initial load, then serves requests until every
    /// client is dropped.
    pub async fn run(mut self, ctx: PanelContext) {
        self.resolve_role(&ctx).await;
        // A failed mount is already reported and leaves the panel in LoadError.
        let _ = self.load(&ctx, false).await;

        while let Some(request) = self.receiver.recv().await {
            match request {
                PanelRequest::Reload { respond_to } => {
                    let _ = respond_to.send(self.load(&ctx, true).await);
                }
                PanelRequest::Delete { id, respond_to } => {
                    let _ = respond_to.send(self.delete(&ctx, id).await);
                }
                PanelRequest::UpdateStock {
                    product,
                    input,
                    respond_to,
                } => {
                    let _ = respond_to.send(self.update_stock(&ctx, product, &input).await);
                }
                PanelRequest::ViewProduct {
                    product,
                    respond_to,
                } => {
                    ctx.navigator
                        .navigate_to_record(&product.0, RecordType::Product);
                    let _ = respond_to.send(Ok(()));
                }
                PanelRequest::Snapshot { respond_to } => {
                    let _ = respond_to.send(Ok(self.view()));
                }
            }
        }

        ctx.observer.on_event(&PanelEvent::Stopped {
            parent: self.parent.clone(),
        });
    }

    async fn resolve_role(&mut self, ctx: &PanelContext) {
        match ctx.identity.current_user_profile_name().await {
            Ok(profile) => self.role = ctx.roles.classify(&profile),
            Err(e) => {
                // Unknown identity is shown the least privileged actions.
                self.role = ActorRole::Other;
                ctx.observer.on_event(&PanelEvent::OperationFailed {
                    operation: Operation::ResolveRole,
                    error: e.into(),
                });
            }
        }
        ctx.observer
            .on_event(&PanelEvent::RoleResolved { role: self.role });
    }

    /// Fetches the list for the parent. With `fresh`, the query cache is re-fetched first so
    /// the read cannot return a result older than the last mutation.
    async fn load(&mut self, ctx: &PanelContext, fresh: bool) -> Result<(), PanelError> {
        self.set_status(ctx, PanelStatus::Loading);
        self.set_loading(true);

        let result = if fresh {
            match ctx.cache.refresh(&self.parent).await {
                Ok(()) => ctx.query.fetch_line_items(&self.parent).await,
                Err(e) => Err(e),
            }
        } else {
            ctx.query.fetch_line_items(&self.parent).await
        };

        self.set_loading(false);
        match result {
            Ok(items) => {
                self.items = items;
                self.last_error = None;
                self.set_status(ctx, PanelStatus::Ready);
                ctx.observer.on_event(&PanelEvent::Loaded {
                    parent: self.parent.clone(),
                    count: self.items.len(),
                });
                Ok(())
            }
            Err(e) => {
                // The previous list stays as the last-known-good state.
                self.set_status(ctx, PanelStatus::LoadError);
                Err(self.fail(ctx, Operation::Load, e.into()))
            }
        }
    }

    async fn delete(&mut self, ctx: &PanelContext, id: LineItemId) -> Result<(), PanelError> {
        let Some(position) = self.items.iter().position(|item| item.id == id) else {
            let error = PanelError::NotFound(format!("Line item {} is not in this panel", id));
            return Err(self.fail(ctx, Operation::Delete, error));
        };

        self.set_loading(true);
        let result = ctx.deleter.delete_line_item(&id).await;
        self.set_loading(false);

        if let Err(e) = result {
            return Err(self.fail(ctx, Operation::Delete, e.into()));
        }

        self.items.remove(position);
        self.last_error = None;
        ctx.observer.on_event(&PanelEvent::ItemDeleted {
            id,
            remaining: self.items.len(),
        });
        ctx.notifier.notify(Notification::new(
            "Product deleted",
            "The product was removed.",
            Severity::Success,
        ));
        self.refresh_cache(ctx).await;
        Ok(())
    }

    async fn update_stock(
        &mut self,
        ctx: &PanelContext,
        product: ProductId,
        input: &str,
    ) -> Result<(), PanelError> {
        let quantity = match parse_quantity(input) {
            Ok(quantity) => quantity,
            Err(e) => return Err(self.fail(ctx, Operation::UpdateStock, e)),
        };

        self.set_loading(true);
        let result = ctx.stock.update_stock(&product, quantity).await;
        self.set_loading(false);

        if let Err(e) = result {
            return Err(self.fail(ctx, Operation::UpdateStock, PanelError::persistence(e)));
        }

        ctx.observer
            .on_event(&PanelEvent::StockUpdated { product, quantity });
        ctx.notifier.notify(Notification::new(
            "Stock updated",
            "Stock updated successfully.",
            Severity::Success,
        ));

        // The update itself succeeded; a failed reload is reported on its own.
        let _ = self.load(ctx, true).await;
        Ok(())
    }

    async fn refresh_cache(&self, ctx: &PanelContext) {
        if let Err(e) = ctx.cache.refresh(&self.parent).await {
            ctx.observer.on_event(&PanelEvent::OperationFailed {
                operation: Operation::RefreshCache,
                error: e.into(),
            });
        }
    }

    /// Records `error`, reports it to the observer and the user, and hands it back.
    fn fail(&mut self, ctx: &PanelContext, operation: Operation, error: PanelError) -> PanelError {
        self.last_error = Some(error.clone());
        ctx.observer.on_event(&PanelEvent::OperationFailed {
            operation,
            error: error.clone(),
        });
        ctx.notifier.notify(Notification::new(
            failure_title(operation, &error),
            error.to_string(),
            Severity::Error,
        ));
        error
    }

    fn set_status(&mut self, ctx: &PanelContext, to: PanelStatus) {
        if self.status != to {
            let from = std::mem::replace(&mut self.status, to);
            ctx.observer.on_event(&PanelEvent::StatusChanged { from, to });
        }
    }

    fn set_loading(&self, loading: bool) {
        self.loading.send_replace(loading);
    }

    fn view(&self) -> PanelView {
        let rows = annotate(&self.items);
        PanelView {
            parent: self.parent.clone(),
            status: self.status,
            any_over_stock: any_over_stock(&rows),
            rows,
            role: self.role,
            actions: self.role.allowed_actions().to_vec(),
            last_error: self.last_error.clone(),
        }
    }
}

fn failure_title(operation: Operation, error: &PanelError) -> &'static str {
    match (operation, error) {
        (_, PanelError::InvalidInput(_)) => "Invalid quantity",
        (Operation::Load, _) => "Error loading line items",
        (Operation::Delete, _) => "Error deleting product",
        (Operation::UpdateStock, _) => "Error updating stock",
        (Operation::ResolveRole | Operation::RefreshCache, _) => "Error",
    }
}

