use line_item_panel::cache::QueryCache;
use line_item_panel::config::PanelConfig;
use line_item_panel::crm::CrmSystem;
use line_item_panel::model::Product;
use line_item_panel::{PanelContext, PanelSystem};
use record_store::tracing::setup_tracing;
use std::sync::Arc;
use tracing::{error, info, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let config = PanelConfig::load().map_err(|e| e.to_string())?;
    info!("Starting line-item panel demo");

    let platform = CrmSystem::start("System Administrator");

    // Seed one opportunity: "a" orders more than p1 has in stock.
    let crm = platform.crm.clone();
    async {
        crm.add_product(Product::new("p1", "Widget", 3.0)).await?;
        crm.add_product(Product::new("p2", "Gadget", 50.0)).await?;
        crm.add_line_item("a", "opp-1", "p1", 5.0, 12.0).await?;
        crm.add_line_item("b", "opp-1", "p2", 2.0, 80.0).await?;
        crm.add_line_item("c", "opp-1", "p1", 1.0, 12.0).await
    }
    .instrument(tracing::info_span!("seed"))
    .await
    .map_err(|e| e.to_string())?;

    let cache = Arc::new(QueryCache::new(crm.clone()));
    let context = PanelContext::new(crm).with_query_cache(cache);
    let panel = PanelSystem::mount("opp-1", context, &config);

    let view = panel.client.snapshot().await.map_err(|e| e.to_string())?;
    info!(
        rows = view.rows.len(),
        over_stock = view.any_over_stock,
        role = ?view.role,
        "Panel mounted"
    );

    let span = tracing::info_span!("stock_update");
    let result = async {
        // Rejected locally; nothing reaches the platform.
        if let Err(e) = panel.client.update_stock("p1".into(), "ten").await {
            info!(error = %e, "Invalid input rejected");
        }
        panel.client.update_stock("p1".into(), "10").await
    }
    .instrument(span)
    .await;

    match result {
        Ok(()) => {
            let view = panel.client.snapshot().await.map_err(|e| e.to_string())?;
            info!(over_stock = view.any_over_stock, "Stock corrected");
        }
        Err(e) => error!(error = %e, "Stock update failed"),
    }

    let span = tracing::info_span!("delete");
    match panel.client.delete_item("b".into()).instrument(span).await {
        Ok(()) => {
            let view = panel.client.snapshot().await.map_err(|e| e.to_string())?;
            info!(remaining = view.rows.len(), "Line item removed");
        }
        Err(e) => error!(error = %e, "Delete failed"),
    }

    panel.client.view_product("p2".into()).await.map_err(|e| e.to_string())?;

    panel.shutdown().await?;
    platform.shutdown().await?;

    info!("Demo completed successfully");
    Ok(())
}
