//! Ticket lifecycle scenario tests
//!
//! Run against the in-memory store and the scripted fake platform:
//! cargo test -p integration-tests --test lifecycle_tests

use integration_tests::{test_app, DESCRIPTION, GUILD};
use ticket_core::{DomainError, Snowflake, TicketStatus};
use ticket_service::{ServiceError, TicketService};

// ============================================================================
// Creation
// ============================================================================

#[tokio::test]
async fn test_create_assigns_sequential_numbers() {
    let app = test_app().await.unwrap();
    let creator = app.seed_user(Snowflake::new(1), "alice", false).await.unwrap();
    let category = app.category_id("Transfer").await.unwrap();
    let service = TicketService::new(&app.ctx);

    let first = service
        .create_ticket(
            &creator,
            GUILD,
            ticket_service::dto::OpenTicketRequest {
                category_id: category,
                description: DESCRIPTION.to_string(),
            },
        )
        .await
        .unwrap();
    let second = service
        .create_ticket(
            &creator,
            GUILD,
            ticket_service::dto::OpenTicketRequest {
                category_id: category,
                description: DESCRIPTION.to_string(),
            },
        )
        .await
        .unwrap();

    assert_eq!(first.ticket.number, 1);
    assert_eq!(second.ticket.number, 2);
    assert_eq!(first.ticket.status, "pending");
}

#[tokio::test]
async fn test_create_binds_private_channel() {
    let app = test_app().await.unwrap();
    let creator = app.seed_user(Snowflake::new(1), "alice", false).await.unwrap();
    let category = app.category_id("Transfer").await.unwrap();

    let created = TicketService::new(&app.ctx)
        .create_ticket(
            &creator,
            GUILD,
            ticket_service::dto::OpenTicketRequest {
                category_id: category,
                description: DESCRIPTION.to_string(),
            },
        )
        .await
        .unwrap();

    assert!(created.channel_bound);
    assert!(created.binding_error.is_none());
    let channel_id = created.ticket.channel_id.unwrap();
    assert_eq!(app.platform.channel_count(), 1);

    // Welcome message landed in the new channel
    let posted = app.platform.channel_messages();
    assert!(!posted.is_empty());
    assert_eq!(posted[0].0, channel_id);

    // And the channel resolves back to the ticket
    let resolved = TicketService::new(&app.ctx)
        .get_by_channel(channel_id)
        .await
        .unwrap();
    assert_eq!(resolved.id, created.ticket.id);
}

#[tokio::test]
async fn test_binding_failure_keeps_ticket_recoverable() {
    let app = test_app().await.unwrap();
    let creator = app.seed_user(Snowflake::new(1), "alice", false).await.unwrap();
    let category = app.category_id("Transfer").await.unwrap();
    app.platform.fail_next_creates(3);

    let created = TicketService::new(&app.ctx)
        .create_ticket(
            &creator,
            GUILD,
            ticket_service::dto::OpenTicketRequest {
                category_id: category,
                description: DESCRIPTION.to_string(),
            },
        )
        .await
        .unwrap();

    // The number was reserved and the ticket persisted despite the failure
    assert_eq!(created.ticket.number, 1);
    assert!(!created.channel_bound);
    assert!(created.binding_error.is_some());

    // A later retry binds it
    let retried = TicketService::new(&app.ctx)
        .retry_binding(created.ticket.id)
        .await
        .unwrap();
    assert!(retried.channel_id.is_some());
}

#[tokio::test]
async fn test_create_rejects_short_description() {
    let app = test_app().await.unwrap();
    let creator = app.seed_user(Snowflake::new(1), "alice", false).await.unwrap();
    let category = app.category_id("Transfer").await.unwrap();

    let result = TicketService::new(&app.ctx)
        .create_ticket(
            &creator,
            GUILD,
            ticket_service::dto::OpenTicketRequest {
                category_id: category,
                description: "short".to_string(),
            },
        )
        .await;

    assert!(matches!(result, Err(ServiceError::Validation(_))));
}

// ============================================================================
// Transitions
// ============================================================================

async fn open_ticket(app: &integration_tests::TestApp, creator: &ticket_core::User) -> i64 {
    let category = app.category_id("Transfer").await.unwrap();
    TicketService::new(&app.ctx)
        .create_ticket(
            creator,
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
async fn test_accept_then_close() {
    let app = test_app().await.unwrap();
    let creator = app.seed_user(Snowflake::new(1), "alice", false).await.unwrap();
    let staff = app.seed_user(Snowflake::new(2), "bob", true).await.unwrap();
    let ticket_id = open_ticket(&app, &creator).await;
    let service = TicketService::new(&app.ctx);

    let accepted = service.accept(ticket_id, &staff).await.unwrap();
    assert_eq!(accepted.status, "accepted");
    assert_eq!(accepted.assigned_to.unwrap().username, "bob");

    let closed = service.close(ticket_id, &staff).await.unwrap();
    assert_eq!(closed.status, "closed");
    assert!(closed.closed_at.is_some());

    // The bound channel was torn down
    assert_eq!(app.platform.deleted_channels().len(), 1);

    // The creator was notified of the acceptance
    assert!(app
        .platform
        .direct_messages()
        .iter()
        .any(|(user, _)| *user == creator.discord_id));
}

#[tokio::test]
async fn test_double_accept_fails() {
    let app = test_app().await.unwrap();
    let creator = app.seed_user(Snowflake::new(1), "alice", false).await.unwrap();
    let staff = app.seed_user(Snowflake::new(2), "bob", true).await.unwrap();
    let ticket_id = open_ticket(&app, &creator).await;
    let service = TicketService::new(&app.ctx);

    service.accept(ticket_id, &staff).await.unwrap();
    let second = service.accept(ticket_id, &staff).await;

    assert!(matches!(
        second,
        Err(ServiceError::Domain(DomainError::InvalidTransition {
            from: TicketStatus::Accepted,
            to: TicketStatus::Accepted,
        }))
    ));
}

#[tokio::test]
async fn test_reject_requires_reason() {
    let app = test_app().await.unwrap();
    let creator = app.seed_user(Snowflake::new(1), "alice", false).await.unwrap();
    let staff = app.seed_user(Snowflake::new(2), "bob", true).await.unwrap();
    let ticket_id = open_ticket(&app, &creator).await;
    let service = TicketService::new(&app.ctx);

    let result = service.reject(ticket_id, &staff, "  ").await;
    assert!(matches!(
        result,
        Err(ServiceError::Domain(DomainError::EmptyRejectReason))
    ));

    // The ticket is untouched and still rejectable with a real reason
    let rejected = service
        .reject(ticket_id, &staff, "not enough information")
        .await
        .unwrap();
    assert_eq!(rejected.status, "rejected");
    assert_eq!(rejected.reject_reason.as_deref(), Some("not enough information"));
}

#[tokio::test]
async fn test_rejected_is_terminal() {
    let app = test_app().await.unwrap();
    let creator = app.seed_user(Snowflake::new(1), "alice", false).await.unwrap();
    let staff = app.seed_user(Snowflake::new(2), "bob", true).await.unwrap();
    let ticket_id = open_ticket(&app, &creator).await;
    let service = TicketService::new(&app.ctx);

    service.reject(ticket_id, &staff, "wrong guild").await.unwrap();

    assert!(service.accept(ticket_id, &staff).await.is_err());
    assert!(service.close(ticket_id, &staff).await.is_err());
}

#[tokio::test]
async fn test_closed_channel_no_longer_resolves() {
    let app = test_app().await.unwrap();
    let creator = app.seed_user(Snowflake::new(1), "alice", false).await.unwrap();
    let staff = app.seed_user(Snowflake::new(2), "bob", true).await.unwrap();
    let ticket_id = open_ticket(&app, &creator).await;
    let service = TicketService::new(&app.ctx);

    let ticket = service.get_ticket(ticket_id).await.unwrap();
    let channel_id = ticket.channel_id.unwrap();

    service.close(ticket_id, &staff).await.unwrap();

    let result = service.get_by_channel(channel_id).await;
    assert!(matches!(
        result,
        Err(ServiceError::Domain(DomainError::ChannelNotBound(_)))
    ));
}

// ============================================================================
// Replies
// ============================================================================

#[tokio::test]
async fn test_staff_reply_auto_assigns() {
    let app = test_app().await.unwrap();
    let creator = app.seed_user(Snowflake::new(1), "alice", false).await.unwrap();
    let staff = app.seed_user(Snowflake::new(2), "bob", true).await.unwrap();
    let ticket_id = open_ticket(&app, &creator).await;
    let service = TicketService::new(&app.ctx);

    service
        .add_response(ticket_id, &staff, "looking into it")
        .await
        .unwrap();

    let ticket = service.get_ticket(ticket_id).await.unwrap();
    assert_eq!(ticket.assigned_to, Some(staff.id));
}

#[tokio::test]
async fn test_creator_reply_does_not_assign() {
    let app = test_app().await.unwrap();
    let creator = app.seed_user(Snowflake::new(1), "alice", false).await.unwrap();
    let ticket_id = open_ticket(&app, &creator).await;
    let service = TicketService::new(&app.ctx);

    service
        .add_response(ticket_id, &creator, "any update on this?")
        .await
        .unwrap();

    let ticket = service.get_ticket(ticket_id).await.unwrap();
    assert_eq!(ticket.assigned_to, None);
}

#[tokio::test]
async fn test_reply_on_closed_ticket_rejected() {
    let app = test_app().await.unwrap();
    let creator = app.seed_user(Snowflake::new(1), "alice", false).await.unwrap();
    let staff = app.seed_user(Snowflake::new(2), "bob", true).await.unwrap();
    let ticket_id = open_ticket(&app, &creator).await;
    let service = TicketService::new(&app.ctx);

    service.close(ticket_id, &staff).await.unwrap();

    let result = service.add_response(ticket_id, &creator, "one more thing").await;
    assert!(matches!(
        result,
        Err(ServiceError::Domain(DomainError::TicketClosed(_)))
    ));
}

#[tokio::test]
async fn test_ticket_log_collects_replies() {
    let app = test_app().await.unwrap();
    let creator = app.seed_user(Snowflake::new(1), "alice", false).await.unwrap();
    let staff = app.seed_user(Snowflake::new(2), "bob", true).await.unwrap();
    let ticket_id = open_ticket(&app, &creator).await;
    let service = TicketService::new(&app.ctx);

    service.add_response(ticket_id, &creator, "first message").await.unwrap();
    service.add_response(ticket_id, &staff, "second message").await.unwrap();

    let log = service.ticket_log(ticket_id).await.unwrap();
    assert_eq!(log.ticket.id, ticket_id);
    assert_eq!(log.replies.len(), 2);
    // Newest first
    assert_eq!(log.replies[0].content, "second message");
    assert_eq!(
        log.replies[0].author.as_ref().unwrap().username,
        "bob"
    );
}
