//! Concurrency property tests
//!
//! Exercise the atomicity guarantees under real task interleaving:
//! per-guild numbering stays unique and contiguous, and racing transitions
//! produce exactly one winner.

use std::collections::HashSet;
use std::sync::Arc;

use integration_tests::{test_app, DESCRIPTION, GUILD};
use ticket_core::{DomainError, SettingsRepository, Snowflake};
use ticket_service::{ServiceError, TicketService};

#[tokio::test]
async fn test_concurrent_numbering_unique_and_contiguous() {
    let app = test_app().await.unwrap();
    let tasks = 32;

    let mut handles = Vec::with_capacity(tasks);
    for _ in 0..tasks {
        let store = app.store.clone();
        handles.push(tokio::spawn(async move {
            SettingsRepository::next_ticket_number(&store, GUILD)
                .await
                .unwrap()
        }));
    }

    let mut numbers = HashSet::new();
    for handle in handles {
        assert!(numbers.insert(handle.await.unwrap()));
    }

    // No duplicates and no holes
    let expected: HashSet<i32> = (1..=tasks as i32).collect();
    assert_eq!(numbers, expected);
}

#[tokio::test]
async fn test_numbering_independent_per_guild() {
    let app = test_app().await.unwrap();
    let other = Snowflake::new(999);

    let first = SettingsRepository::next_ticket_number(&app.store, GUILD)
        .await
        .unwrap();
    let second = SettingsRepository::next_ticket_number(&app.store, GUILD)
        .await
        .unwrap();
    let other_first = SettingsRepository::next_ticket_number(&app.store, other)
        .await
        .unwrap();

    assert_eq!((first, second), (1, 2));
    assert_eq!(other_first, 1);
}

#[tokio::test]
async fn test_concurrent_creates_get_distinct_numbers() {
    let app = test_app().await.unwrap();
    let creator = Arc::new(app.seed_user(Snowflake::new(1), "alice", false).await.unwrap());
    let category = app.category_id("Transfer").await.unwrap();
    let tasks = 8;

    let mut handles = Vec::with_capacity(tasks);
    for _ in 0..tasks {
        let ctx = app.ctx.clone();
        let creator = creator.clone();
        handles.push(tokio::spawn(async move {
            TicketService::new(&ctx)
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
                .number
        }));
    }

    let mut numbers = HashSet::new();
    for handle in handles {
        assert!(numbers.insert(handle.await.unwrap()), "number reused");
    }
    assert_eq!(numbers.len(), tasks);
}

#[tokio::test]
async fn test_double_close_race_has_one_winner() {
    let app = test_app().await.unwrap();
    let creator = app.seed_user(Snowflake::new(1), "alice", false).await.unwrap();
    let staff = Arc::new(app.seed_user(Snowflake::new(2), "bob", true).await.unwrap());
    let category = app.category_id("Transfer").await.unwrap();

    let ticket_id = TicketService::new(&app.ctx)
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
        .id;

    let mut handles = Vec::new();
    for _ in 0..2 {
        let ctx = app.ctx.clone();
        let staff = staff.clone();
        handles.push(tokio::spawn(async move {
            TicketService::new(&ctx).close(ticket_id, &staff).await
        }));
    }

    let mut wins = 0;
    let mut losses = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(view) => {
                assert_eq!(view.status, "closed");
                wins += 1;
            }
            Err(ServiceError::Domain(DomainError::InvalidTransition { .. })) => losses += 1,
            Err(other) => panic!("unexpected error: {other}"),
        }
    }
    assert_eq!((wins, losses), (1, 1));

    // One channel torn down, not two
    assert_eq!(app.platform.deleted_channels().len(), 1);
}
