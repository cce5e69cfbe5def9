//! Render-ready snapshot of a panel.

use crate::error::PanelError;
use crate::model::{LineItemId, OpportunityId};
use crate::observe::PanelStatus;
use crate::reconcile::DerivedRow;
use crate::roles::{ActorRole, PanelAction};

/// Everything a renderer needs, derived fresh from the working list on every request.
///
/// The busy flag is not part of the snapshot: a snapshot is only answered between
/// operations. Watch [`PanelClient::loading_updates`](super::PanelClient::loading_updates)
/// for it instead.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelView {
    pub parent: OpportunityId,
    pub status: PanelStatus,
    pub rows: Vec<DerivedRow>,
    pub any_over_stock: bool,
    pub role: ActorRole,
    pub actions: Vec<PanelAction>,
    pub last_error: Option<PanelError>,
}

impl PanelView {
    pub fn row(&self, id: &LineItemId) -> Option<&DerivedRow> {
        self.rows.iter().find(|r| &r.item.id == id)
    }

    pub fn item_ids(&self) -> Vec<LineItemId> {
        self.rows.iter().map(|r| r.item.id.clone()).collect()
    }

    pub fn can(&self, action: PanelAction) -> bool {
        self.actions.contains(&action)
    }
}
