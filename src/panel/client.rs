//! # Panel Client
//!
//! The handle a host UI holds to drive one panel. Cheap to clone; the panel stops once the
//! last clone is dropped.

use super::message::PanelRequest;
use super::view::PanelView;
use crate::error::PanelError;
use crate::model::{LineItemId, ProductId};
use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, instrument};

#[derive(Clone)]
pub struct PanelClient {
    sender: mpsc::Sender<PanelRequest>,
    loading: watch::Receiver<bool>,
}

impl PanelClient {
    pub fn new(
        sender: mpsc::Sender<PanelRequest>,
        loading: watch::Receiver<bool>,
    ) -> Self {
        Self { sender, loading }
    }

    /// Current value of the busy flag.
    pub fn is_loading(&self) -> bool {
        *self.loading.borrow()
    }

    /// A receiver that wakes on every busy-flag change, for renderers that show a spinner.
    pub fn loading_updates(&self) -> watch::Receiver<bool> {
        self.loading.clone()
    }

    #[instrument(skip(self))]
    pub async fn reload(&self) -> Result<(), PanelError> {
        debug!("Sending request");
        self.request(|respond_to| PanelRequest::Reload { respond_to })
            .await
    }

    #[instrument(skip(self))]
    pub async fn delete_item(&self, id: LineItemId) -> Result<(), PanelError> {
        debug!("Sending request");
        self.request(|respond_to| PanelRequest::Delete { id, respond_to })
            .await
    }

    /// Submits the stock level typed by the user for `product`.
    #[instrument(skip(self, input))]
    pub async fn update_stock(
        &self,
        product: ProductId,
        input: impl Into<String>,
    ) -> Result<(), PanelError> {
        let input = input.into();
        debug!(%input, "Sending request");
        self.request(|respond_to| PanelRequest::UpdateStock {
            product,
            input,
            respond_to,
        })
        .await
    }

    #[instrument(skip(self))]
    pub async fn view_product(&self, product: ProductId) -> Result<(), PanelError> {
        self.request(|respond_to| PanelRequest::ViewProduct {
            product,
            respond_to,
        })
        .await
    }

    pub async fn snapshot(&self) -> Result<PanelView, PanelError> {
        self.request(|respond_to| PanelRequest::Snapshot { respond_to })
            .await
    }

    async fn request<T>(
        &self,
        make: impl FnOnce(oneshot::Sender<Result<T, PanelError>>) -> PanelRequest,
    ) -> Result<T, PanelError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(make(respond_to))
            .await
            .map_err(|_| PanelError::PanelClosed)?;
        response.await.map_err(|_| PanelError::PanelDropped)?
    }
}
