//! Mounting and unmounting a panel: spawn its task with a context and configuration, then
//! wait for it to stop.

use crate::config::PanelConfig;
use crate::model::OpportunityId;
use crate::panel::{self, PanelClient, PanelContext};
use tracing::{error, info};

/// A running panel and the task that owns it.
///
/// # Example
///
/// ```ignore
/// let platform = CrmSystem::start("System Administrator");
/// let context = PanelContext::new(platform.crm.clone());
/// let panel = PanelSystem::mount("opp-1", context, &PanelConfig::default());
///
/// let view = panel.client.snapshot().await?;
///
/// panel.shutdown().await?;
/// platform.shutdown().await?;
/// ```
pub struct PanelSystem {
    pub client: PanelClient,
    handle: tokio::task::JoinHandle<()>,
}

impl PanelSystem {
    /// Spawns a panel for `parent`. The role table and channel size come from `config`,
    /// replacing whatever table `context` carried when the config defines one.
    pub fn mount(
        parent: impl Into<OpportunityId>,
        context: PanelContext,
        config: &PanelConfig,
    ) -> Self {
        let parent = parent.into();
        let context = match config.roles {
            Some(_) => context.with_roles(config.role_map()),
            None => context,
        };

        info!(%parent, buffer = config.request_buffer, "Mounting panel");
        let (actor, client) = panel::new(parent, config.request_buffer.max(1));
        let handle = tokio::spawn(actor.run(context));

        Self { client, handle }
    }

    /// Drops this system's client and waits for the panel task. Clones of the client held
    /// elsewhere keep the panel alive until they are dropped too.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Unmounting panel...");
        drop(self.client);

        if let Err(e) = self.handle.await {
            error!("Panel task failed: {:?}", e);
            return Err(format!("Panel task failed: {:?}", e));
        }

        info!("Panel unmounted.");
        Ok(())
    }
}
