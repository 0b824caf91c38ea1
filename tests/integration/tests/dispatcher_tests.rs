//! Dispatcher scenario tests
//!
//! Everything goes through `Dispatcher::dispatch`, so these cover
//! authorization, the cooldown gate, and the awaited-input reject flow
//! end to end.

use std::sync::Arc;

use integration_tests::{
    admin_actor, configure_staff_role, member_actor, staff_actor, test_app, test_app_with,
    test_bot_config, DESCRIPTION, GUILD,
};
use ticket_core::Snowflake;
use ticket_service::{Action, Dispatcher, ServiceError, TicketService};

fn open_action(category_id: i64) -> Action {
    Action::OpenTicket {
        category_id,
        description: DESCRIPTION.to_string(),
    }
}

/// Open a ticket through the dispatcher and return (ticket_id, channel_id)
async fn open_via_dispatcher(
    app: &integration_tests::TestApp,
    dispatcher: &Dispatcher,
    user_id: i64,
) -> (i64, Snowflake) {
    let category = app.category_id("Transfer").await.unwrap();
    dispatcher
        .dispatch(&member_actor(user_id, 10), open_action(category))
        .await
        .unwrap();

    let tickets = app.ctx.ticket_repo().list_open_by_guild(GUILD).await.unwrap();
    let ticket = tickets.first().expect("ticket created");
    (ticket.id, ticket.channel_id.expect("ticket bound"))
}

// ============================================================================
// Authorization
// ============================================================================

#[tokio::test]
async fn test_anyone_may_open_a_ticket() {
    let app = test_app().await.unwrap();
    let dispatcher = Dispatcher::new(app.ctx.clone());
    let category = app.category_id("Transfer").await.unwrap();

    let payload = dispatcher
        .dispatch(&member_actor(1, 10), open_action(category))
        .await
        .unwrap();
    assert!(payload.get("content").is_some());

    let tickets = app.ctx.ticket_repo().list_open_by_guild(GUILD).await.unwrap();
    assert_eq!(tickets.len(), 1);
}

#[tokio::test]
async fn test_accept_requires_staff() {
    let app = test_app().await.unwrap();
    configure_staff_role(&app).await.unwrap();
    let dispatcher = Dispatcher::new(app.ctx.clone());
    let (_, channel) = open_via_dispatcher(&app, &dispatcher, 1).await;

    // Another plain member cannot accept
    let denied = dispatcher
        .dispatch(&member_actor(2, channel.into_inner()), Action::Accept)
        .await;
    assert!(matches!(denied, Err(ServiceError::PermissionDenied { .. })));

    // A member carrying the staff role can
    dispatcher
        .dispatch(&staff_actor(3, channel.into_inner()), Action::Accept)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_creator_may_close_own_ticket() {
    let app = test_app().await.unwrap();
    configure_staff_role(&app).await.unwrap();
    let dispatcher = Dispatcher::new(app.ctx.clone());
    let (ticket_id, channel) = open_via_dispatcher(&app, &dispatcher, 1).await;

    // A stranger cannot close it
    let denied = dispatcher
        .dispatch(&member_actor(2, channel.into_inner()), Action::Close)
        .await;
    assert!(matches!(denied, Err(ServiceError::PermissionDenied { .. })));

    // The creator can
    dispatcher
        .dispatch(&member_actor(1, channel.into_inner()), Action::Close)
        .await
        .unwrap();

    let ticket = TicketService::new(&app.ctx).get_ticket(ticket_id).await.unwrap();
    assert_eq!(ticket.status.as_str(), "closed");
}

#[tokio::test]
async fn test_configuration_requires_admin() {
    let app = test_app().await.unwrap();
    let dispatcher = Dispatcher::new(app.ctx.clone());

    let denied = dispatcher
        .dispatch(
            &staff_actor(1, 10),
            Action::SetPrefix {
                prefix: "!".to_string(),
            },
        )
        .await;
    assert!(matches!(denied, Err(ServiceError::PermissionDenied { .. })));

    dispatcher
        .dispatch(
            &admin_actor(2, 10),
            Action::SetPrefix {
                prefix: "!".to_string(),
            },
        )
        .await
        .unwrap();

    let settings = app.ctx.settings_repo().find_or_default(GUILD).await.unwrap();
    assert_eq!(settings.prefix, "!");
}

// ============================================================================
// Cooldown gate
// ============================================================================

#[tokio::test]
async fn test_cooldown_absorbs_double_click() {
    let mut bot = test_bot_config();
    bot.cooldown_seconds = 60;
    let app = test_app_with(bot).await.unwrap();
    let dispatcher = Dispatcher::new(app.ctx.clone());
    let category = app.category_id("Transfer").await.unwrap();
    let actor = member_actor(1, 10);

    dispatcher
        .dispatch(&actor, open_action(category))
        .await
        .unwrap();
    let second = dispatcher.dispatch(&actor, open_action(category)).await;

    assert!(matches!(second, Err(ServiceError::DuplicateAction)));

    // The duplicate produced no second ticket
    let tickets = app.ctx.ticket_repo().list_open_by_guild(GUILD).await.unwrap();
    assert_eq!(tickets.len(), 1);
}

#[tokio::test]
async fn test_cooldown_scoped_per_actor() {
    let mut bot = test_bot_config();
    bot.cooldown_seconds = 60;
    let app = test_app_with(bot).await.unwrap();
    let dispatcher = Dispatcher::new(app.ctx.clone());
    let category = app.category_id("Transfer").await.unwrap();

    dispatcher
        .dispatch(&member_actor(1, 10), open_action(category))
        .await
        .unwrap();
    // A different actor in the same channel is not throttled
    dispatcher
        .dispatch(&member_actor(2, 10), open_action(category))
        .await
        .unwrap();
}

// ============================================================================
// Awaited-input reject flow
// ============================================================================

#[tokio::test]
async fn test_reject_prompt_roundtrip() {
    let app = test_app().await.unwrap();
    configure_staff_role(&app).await.unwrap();
    let dispatcher = Dispatcher::new(app.ctx.clone());
    let (ticket_id, channel) = open_via_dispatcher(&app, &dispatcher, 1).await;
    let staff = staff_actor(2, channel.into_inner());

    dispatcher
        .dispatch(&staff, Action::BeginReject)
        .await
        .unwrap();
    assert!(dispatcher.awaits_input(&staff));

    dispatcher
        .dispatch(
            &staff,
            Action::SubmitInput {
                content: "not enough information".to_string(),
            },
        )
        .await
        .unwrap();

    let ticket = TicketService::new(&app.ctx).get_ticket(ticket_id).await.unwrap();
    assert_eq!(ticket.status.as_str(), "rejected");
    assert_eq!(ticket.reject_reason.as_deref(), Some("not enough information"));
    assert!(!dispatcher.awaits_input(&staff));
}

#[tokio::test]
async fn test_submit_without_prompt_is_not_found() {
    let app = test_app().await.unwrap();
    let dispatcher = Dispatcher::new(app.ctx.clone());

    let result = dispatcher
        .dispatch(
            &member_actor(1, 10),
            Action::SubmitInput {
                content: "whatever".to_string(),
            },
        )
        .await;
    assert!(matches!(result, Err(ServiceError::NotFound { .. })));
}

#[tokio::test]
async fn test_expired_prompt_leaves_ticket_pending() {
    let mut bot = test_bot_config();
    bot.prompt_timeout_seconds = 0;
    let app = test_app_with(bot).await.unwrap();
    configure_staff_role(&app).await.unwrap();
    let dispatcher = Dispatcher::new(app.ctx.clone());
    let (ticket_id, channel) = open_via_dispatcher(&app, &dispatcher, 1).await;
    let staff = staff_actor(2, channel.into_inner());

    dispatcher
        .dispatch(&staff, Action::BeginReject)
        .await
        .unwrap();
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;

    let result = dispatcher
        .dispatch(
            &staff,
            Action::SubmitInput {
                content: "too late".to_string(),
            },
        )
        .await;
    assert!(matches!(result, Err(ServiceError::PromptExpired)));

    let ticket = TicketService::new(&app.ctx).get_ticket(ticket_id).await.unwrap();
    assert_eq!(ticket.status.as_str(), "pending");
}

// ============================================================================
// Rendering
// ============================================================================

#[tokio::test]
async fn test_errors_render_to_payloads() {
    let app = test_app().await.unwrap();
    let dispatcher = Dispatcher::new(Arc::clone(&app.ctx));

    let err = dispatcher
        .dispatch(&member_actor(1, 10), Action::Accept)
        .await
        .unwrap_err();
    let payload = dispatcher.render_error(&err);
    assert!(payload.get("content").is_some());
}
