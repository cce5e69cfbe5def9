//! # Role Resolution
//!
//! Maps the current user's profile name to an [`ActorRole`] through a single
//! configuration-supplied [`RoleMap`], and derives which panel actions that role is shown.
//! Roles only gate presentation; every role sees every row.

use serde::Deserialize;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActorRole {
    Administrator,
    SalesRole,
    Other,
}

/// Actions a row can offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelAction {
    ViewProduct,
    Delete,
    EditStock,
}

impl ActorRole {
    /// Actions presented to this role, in display order.
    pub fn allowed_actions(self) -> &'static [PanelAction] {
        match self {
            ActorRole::Administrator => &[
                PanelAction::ViewProduct,
                PanelAction::Delete,
                PanelAction::EditStock,
            ],
            ActorRole::SalesRole => &[PanelAction::ViewProduct, PanelAction::Delete],
            ActorRole::Other => &[PanelAction::ViewProduct],
        }
    }

    pub fn can(self, action: PanelAction) -> bool {
        self.allowed_actions().contains(&action)
    }
}

/// Profile-name → role table. Names match exactly; anything unlisted is [`ActorRole::Other`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleMap(HashMap<String, ActorRole>);

impl Default for RoleMap {
    fn default() -> Self {
        Self::from_pairs([
            ("System Administrator", ActorRole::Administrator),
            ("Commercial", ActorRole::SalesRole),
        ])
    }
}

impl RoleMap {
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, ActorRole)>) -> Self {
        Self(
            pairs
                .into_iter()
                .map(|(name, role)| (name.to_string(), role))
                .collect(),
        )
    }

    pub fn classify(&self, profile_name: &str) -> ActorRole {
        self.0
            .get(profile_name)
            .copied()
            .unwrap_or(ActorRole::Other)
    }
}
