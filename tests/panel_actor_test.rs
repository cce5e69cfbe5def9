mod common;

use common::{seeded, Counting, Flaky, Gated, NoIdentity, Slow};
use line_item_panel::crm::{InMemoryCrm, LineItemRecord, ProductRecord};
use line_item_panel::model::{LineItemId, Product};
use line_item_panel::observe::{Operation, PanelEvent, PanelStatus, RecordingObserver};
use line_item_panel::panel;
use line_item_panel::roles::ActorRole;
use line_item_panel::services::{LineItemDeleter, RecordingNotifier, Severity};
use line_item_panel::{PanelContext, PanelError};
use record_store::mock::MockStore;
use record_store::StoreError;
use std::sync::atomic::Ordering;
use std::sync::Arc;

#[tokio::test]
async fn test_invalid_quantity_never_reaches_the_platform() {
    let platform = seeded("System Administrator").await;
    let counting = Arc::new(Counting::new(platform.crm.clone()));
    let notifier = Arc::new(RecordingNotifier::new());
    let context = PanelContext::new(platform.crm.clone())
        .with_stock_updater(counting.clone())
        .with_notifier(notifier.clone());

    let (actor, client) = panel::new("opp", 8);
    let handle = tokio::spawn(actor.run(context));

    for input in ["abc", "NaN", "inf", ""] {
        let result = client.update_stock("p1".into(), input).await;
        assert!(
            matches!(result, Err(PanelError::InvalidInput(_))),
            "{input:?} gave {result:?}"
        );
    }
    assert_eq!(counting.stock_updates.load(Ordering::SeqCst), 0);

    let view = client.snapshot().await.unwrap();
    assert_eq!(view.status, PanelStatus::Ready);
    assert!(matches!(view.last_error, Some(PanelError::InvalidInput(_))));
    assert_eq!(notifier.notifications().len(), 4);
    assert!(notifier
        .notifications()
        .iter()
        .all(|n| n.title == "Invalid quantity" && n.severity == Severity::Error));

    let product = platform.crm.product(&"p1".into()).await.unwrap().unwrap();
    assert_eq!(product.quantity_in_stock, 3.0);

    drop(client);
    handle.await.unwrap();
    drop(counting);
    platform.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_delete_of_unloaded_id_is_rejected_locally() {
    let platform = seeded("Commercial").await;
    let counting = Arc::new(Counting::new(platform.crm.clone()));
    let context = PanelContext::new(platform.crm.clone()).with_deleter(counting.clone());

    let (actor, client) = panel::new("opp", 8);
    let handle = tokio::spawn(actor.run(context));

    let result = client.delete_item("zzz".into()).await;
    assert!(matches!(result, Err(PanelError::NotFound(_))));
    assert_eq!(counting.deletes.load(Ordering::SeqCst), 0);
    assert_eq!(client.snapshot().await.unwrap().rows.len(), 1);

    drop(client);
    handle.await.unwrap();
    drop(counting);
    platform.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_delete_removes_exactly_one_entry() {
    let platform = seeded("Commercial").await;
    for (id, qty) in [("b", 1.0), ("c", 2.0), ("d", 3.0)] {
        platform.crm.add_line_item(id, "opp", "p1", qty, 12.0).await.unwrap();
    }
    let observer = Arc::new(RecordingObserver::new());
    let context = PanelContext::new(platform.crm.clone()).with_observer(observer.clone());

    let (actor, client) = panel::new("opp", 8);
    let handle = tokio::spawn(actor.run(context));

    client.delete_item("c".into()).await.unwrap();

    let view = client.snapshot().await.unwrap();
    assert_eq!(
        view.item_ids(),
        vec![
            LineItemId::from("a"),
            LineItemId::from("b"),
            LineItemId::from("d")
        ]
    );
    assert_eq!(view.status, PanelStatus::Ready);
    assert!(observer.events().contains(&PanelEvent::ItemDeleted {
        id: "c".into(),
        remaining: 3
    }));
    // Delete patches in place: no reload.
    assert_eq!(observer.transitions().len(), 2);

    drop(client);
    handle.await.unwrap();
    platform.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_failed_delete_keeps_the_row() {
    let platform = seeded("Commercial").await;
    let notifier = Arc::new(RecordingNotifier::new());
    let context = PanelContext::new(platform.crm.clone()).with_notifier(notifier.clone());

    let (actor, client) = panel::new("opp", 8);
    let handle = tokio::spawn(actor.run(context));
    client.snapshot().await.unwrap();

    // Removed behind the panel's back.
    platform.crm.delete_line_item(&"a".into()).await.unwrap();

    let result = client.delete_item("a".into()).await;
    assert_eq!(result, Err(PanelError::NotFound("a".into())));

    let view = client.snapshot().await.unwrap();
    assert_eq!(view.item_ids(), vec![LineItemId::from("a")]);
    assert_eq!(view.last_error, Some(PanelError::NotFound("a".into())));
    assert_eq!(notifier.last().unwrap().title, "Error deleting product");

    drop(client);
    handle.await.unwrap();
    platform.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_failed_load_preserves_last_known_list() {
    let platform = seeded("System Administrator").await;
    let flaky = Arc::new(Flaky::new(platform.crm.clone()));
    let notifier = Arc::new(RecordingNotifier::new());
    let context = PanelContext::new(platform.crm.clone())
        .with_query(flaky.clone())
        .with_notifier(notifier.clone());

    let (actor, client) = panel::new("opp", 8);
    let handle = tokio::spawn(actor.run(context));
    let before = client.snapshot().await.unwrap();
    assert_eq!(before.status, PanelStatus::Ready);

    flaky.set_down(true);
    let result = client.reload().await;
    assert_eq!(result, Err(PanelError::Transport("connection reset".into())));

    let view = client.snapshot().await.unwrap();
    assert_eq!(view.status, PanelStatus::LoadError);
    assert_eq!(view.rows, before.rows);
    assert_eq!(view.last_error, result.err());
    assert!(!client.is_loading());
    assert_eq!(notifier.last().unwrap().title, "Error loading line items");

    // Manual retry is the way out.
    flaky.set_down(false);
    client.reload().await.unwrap();
    let view = client.snapshot().await.unwrap();
    assert_eq!(view.status, PanelStatus::Ready);
    assert_eq!(view.last_error, None);

    drop(client);
    handle.await.unwrap();
    drop(flaky);
    platform.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_stock_update_succeeds_even_if_reload_fails() {
    let platform = seeded("System Administrator").await;
    let flaky = Arc::new(Flaky::new(platform.crm.clone()));
    let observer = Arc::new(RecordingObserver::new());
    let context = PanelContext::new(platform.crm.clone())
        .with_query(flaky.clone())
        .with_observer(observer.clone());

    let (actor, client) = panel::new("opp", 8);
    let handle = tokio::spawn(actor.run(context));
    client.snapshot().await.unwrap();

    flaky.set_down(true);
    client.update_stock("p1".into(), "10").await.unwrap();

    let view = client.snapshot().await.unwrap();
    assert_eq!(view.status, PanelStatus::LoadError);
    assert!(matches!(view.last_error, Some(PanelError::Transport(_))));
    assert!(observer.events().contains(&PanelEvent::StockUpdated {
        product: "p1".into(),
        quantity: 10.0
    }));

    let product = platform.crm.product(&"p1".into()).await.unwrap().unwrap();
    assert_eq!(product.quantity_in_stock, 10.0);

    drop(client);
    handle.await.unwrap();
    drop(flaky);
    platform.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_mutations_never_overlap() {
    let platform = seeded("System Administrator").await;
    platform.crm.add_line_item("b", "opp", "p1", 1.0, 12.0).await.unwrap();
    platform.crm.add_line_item("c", "opp", "p1", 2.0, 12.0).await.unwrap();

    let slow = Arc::new(Slow::new(platform.crm.clone()));
    let context = PanelContext::new(platform.crm.clone())
        .with_deleter(slow.clone())
        .with_stock_updater(slow.clone());

    let (actor, client) = panel::new("opp", 8);
    let handle = tokio::spawn(actor.run(context));
    client.snapshot().await.unwrap();

    let (first, second, third) = tokio::join!(
        client.delete_item("a".into()),
        client.update_stock("p1".into(), "7"),
        client.delete_item("c".into()),
    );
    assert!(first.is_ok() && second.is_ok() && third.is_ok());
    assert_eq!(slow.max_in_flight.load(Ordering::SeqCst), 1);

    let view = client.snapshot().await.unwrap();
    assert_eq!(view.item_ids(), vec![LineItemId::from("b")]);
    assert_eq!(view.rows[0].item.product.quantity_in_stock, 7.0);

    drop(client);
    handle.await.unwrap();
    drop(slow);
    platform.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_loading_flag_is_raised_while_delete_is_in_flight() {
    let platform = seeded("System Administrator").await;
    let gated = Arc::new(Gated::new(platform.crm.clone()));
    let context = PanelContext::new(platform.crm.clone()).with_deleter(gated.clone());

    let (actor, client) = panel::new("opp", 8);
    let handle = tokio::spawn(actor.run(context));
    client.snapshot().await.unwrap();
    assert!(!client.is_loading());

    let mut loading = client.loading_updates();
    let deleting = {
        let client = client.clone();
        tokio::spawn(async move { client.delete_item("a".into()).await })
    };

    loading.wait_for(|busy| *busy).await.unwrap();
    assert!(client.is_loading());

    gated.release.notify_one();
    deleting.await.unwrap().unwrap();
    assert!(!client.is_loading());

    drop(client);
    drop(loading);
    handle.await.unwrap();
    drop(gated);
    platform.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_identity_failure_falls_back_to_least_privilege() {
    let platform = seeded("System Administrator").await;
    let observer = Arc::new(RecordingObserver::new());
    let context = PanelContext::new(platform.crm.clone())
        .with_identity(Arc::new(NoIdentity))
        .with_observer(observer.clone());

    let (actor, client) = panel::new("opp", 8);
    let handle = tokio::spawn(actor.run(context));

    let view = client.snapshot().await.unwrap();
    assert_eq!(view.role, ActorRole::Other);
    assert_eq!(view.status, PanelStatus::Ready);
    assert_eq!(view.rows.len(), 1);
    assert!(observer.events().iter().any(|e| matches!(
        e,
        PanelEvent::OperationFailed {
            operation: Operation::ResolveRole,
            ..
        }
    )));

    drop(client);
    handle.await.unwrap();
    platform.shutdown().await.unwrap();
}

/// Real panel actor over mocked stores.
#[tokio::test]
async fn test_panel_over_mocked_stores() {
    let mut products = MockStore::<ProductRecord>::new();
    let mut line_items = MockStore::<LineItemRecord>::new();

    let line = LineItemRecord {
        id: "a".into(),
        opportunity_id: "opp".into(),
        product_id: "p1".into(),
        quantity: 5.0,
        unit_price: 12.0,
    };
    line_items.expect_list().return_ok(vec![line]);
    products
        .expect_get("p1".into())
        .return_ok(Some(Product::new("p1", "Widget", 3.0).into()));
    line_items
        .expect_delete("a".into())
        .return_err(StoreError::StoreClosed);

    let crm = Arc::new(InMemoryCrm::new(
        products.client(),
        line_items.client(),
        "Commercial",
    ));
    let (actor, client) = panel::new("opp", 8);
    let handle = tokio::spawn(actor.run(PanelContext::new(crm)));

    let view = client.snapshot().await.unwrap();
    assert_eq!(view.role, ActorRole::SalesRole);
    assert!(view.any_over_stock);

    let result = client.delete_item("a".into()).await;
    assert!(matches!(result, Err(PanelError::Transport(_))));
    assert_eq!(client.snapshot().await.unwrap().rows.len(), 1);

    products.verify();
    line_items.verify();

    drop(client);
    handle.await.unwrap();
}

#[tokio::test]
async fn test_stopped_event_after_last_client_drops() {
    let platform = seeded("System Administrator").await;
    let observer = Arc::new(RecordingObserver::new());
    let context = PanelContext::new(platform.crm.clone()).with_observer(observer.clone());

    let (actor, client) = panel::new("opp", 8);
    let handle = tokio::spawn(actor.run(context));
    let other = client.clone();
    drop(client);
    other.snapshot().await.unwrap();
    drop(other);
    handle.await.unwrap();

    assert_eq!(
        observer.events().last(),
        Some(&PanelEvent::Stopped {
            parent: "opp".into()
        })
    );
    platform.shutdown().await.unwrap();
}
