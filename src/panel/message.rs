//! Requests accepted by a [`PanelActor`](super::PanelActor).

use super::view::PanelView;
use crate::error::PanelError;
use crate::model::{LineItemId, ProductId};
use tokio::sync::oneshot;

pub type Response<T> = oneshot::Sender<Result<T, PanelError>>;

#[derive(Debug)]
pub enum PanelRequest {
    /// Manual retry; the only way out of `LoadError`.
    Reload { respond_to: Response<()> },
    Delete {
        id: LineItemId,
        respond_to: Response<()>,
    },
    /// `input` is the raw text typed by the user; the panel validates it.
    UpdateStock {
        product: ProductId,
        input: String,
        respond_to: Response<()>,
    },
    ViewProduct {
        product: ProductId,
        respond_to: Response<()>,
    },
    Snapshot { respond_to: Response<PanelView> },
}
