//! Reconciliation sweep tests
//!
//! The sweep repairs bindings that drifted: channels deleted behind the
//! bot's back and tickets whose channel never got created.

use integration_tests::{test_app, DESCRIPTION, GUILD};
use ticket_core::Snowflake;
use ticket_service::{ReconcileService, TicketService};

async fn open_ticket(app: &integration_tests::TestApp) -> i64 {
    let creator = app.seed_user(Snowflake::new(1), "alice", false).await.unwrap();
    let category = app.category_id("Transfer").await.unwrap();
    TicketService::new(&app.ctx)
        .create_ticket(
            &creator,
            GUILD,
            ticket_service::dto::OpenTicketRequest {
                category_id: category,
                description: DESCRIPTION.to_string(),
            },
        )
        .await
        .unwrap()
        .ticket
        .id
}

#[tokio::test]
async fn test_sweep_leaves_healthy_bindings_alone() {
    let app = test_app().await.unwrap();
    let ticket_id = open_ticket(&app).await;
    let before = TicketService::new(&app.ctx).get_ticket(ticket_id).await.unwrap();

    let report = ReconcileService::new(&app.ctx).sweep(GUILD).await.unwrap();

    assert_eq!(report.scanned, 1);
    assert_eq!(report.repaired, 0);
    assert_eq!(report.failed, 0);
    let after = TicketService::new(&app.ctx).get_ticket(ticket_id).await.unwrap();
    assert_eq!(after.channel_id, before.channel_id);
}

#[tokio::test]
async fn test_sweep_rebinds_vanished_channel() {
    let app = test_app().await.unwrap();
    let ticket_id = open_ticket(&app).await;
    let before = TicketService::new(&app.ctx).get_ticket(ticket_id).await.unwrap();
    let old_channel = before.channel_id.unwrap();

    // A moderator deletes the channel by hand
    app.platform.drop_channel(old_channel);

    let report = ReconcileService::new(&app.ctx).sweep(GUILD).await.unwrap();
    assert_eq!(report.repaired, 1);

    let after = TicketService::new(&app.ctx).get_ticket(ticket_id).await.unwrap();
    let new_channel = after.channel_id.unwrap();
    assert_ne!(new_channel, old_channel);

    // The replacement channel resolves to the same ticket
    let resolved = TicketService::new(&app.ctx)
        .get_by_channel(new_channel)
        .await
        .unwrap();
    assert_eq!(resolved.id, ticket_id);
}

#[tokio::test]
async fn test_sweep_binds_never_bound_ticket() {
    let app = test_app().await.unwrap();
    app.platform.fail_next_creates(3);
    let ticket_id = open_ticket(&app).await;
    let before = TicketService::new(&app.ctx).get_ticket(ticket_id).await.unwrap();
    assert!(before.channel_id.is_none());

    let report = ReconcileService::new(&app.ctx).sweep(GUILD).await.unwrap();
    assert_eq!(report.repaired, 1);

    let after = TicketService::new(&app.ctx).get_ticket(ticket_id).await.unwrap();
    assert!(after.channel_id.is_some());
}

#[tokio::test]
async fn test_sweep_counts_repairs_it_cannot_make() {
    let app = test_app().await.unwrap();
    let ticket_id = open_ticket(&app).await;
    let before = TicketService::new(&app.ctx).get_ticket(ticket_id).await.unwrap();

    app.platform.drop_channel(before.channel_id.unwrap());
    app.platform.fail_next_creates(3);

    let report = ReconcileService::new(&app.ctx).sweep(GUILD).await.unwrap();
    assert_eq!(report.repaired, 0);
    assert_eq!(report.failed, 1);

    // Stale id was cleared; the next sweep can try again
    let after = TicketService::new(&app.ctx).get_ticket(ticket_id).await.unwrap();
    assert!(after.channel_id.is_none());

    let retry = ReconcileService::new(&app.ctx).sweep(GUILD).await.unwrap();
    assert_eq!(retry.repaired, 1);
}
