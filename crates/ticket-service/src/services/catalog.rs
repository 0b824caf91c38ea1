//! Category catalog service
//!
//! Pure reads over the seeded category table.

use tracing::{info, instrument};

use ticket_core::{Category, DomainError, NewCategory};

use crate::dto::{category_view, CategoryView};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Default categories seeded into an empty catalog
fn default_categories() -> Vec<NewCategory> {
    let defaults = [
        ("Transfer", "⚽", "Requests about team transfers"),
        ("Referee Complaint", "❗", "Complaints about referee decisions"),
        ("Press Conference", "🗣️", "Requests to hold a press conference"),
        ("License Issue", "⚙️", "Problems with player licenses"),
        ("Emergency", "💥", "Situations needing an urgent response"),
    ];
    defaults
        .into_iter()
        .map(|(name, emoji, description)| NewCategory {
            name: name.to_string(),
            emoji: emoji.to_string(),
            description: Some(description.to_string()),
        })
        .collect()
}

/// Canned quips posted alongside the welcome message
fn default_auto_replies() -> Vec<String> {
    [
        "A support agent will warm up and come off the bench shortly.",
        "Your request is under VAR review. Please hold.",
        "We have forwarded this to the technical staff. No comment until full time.",
        "The transfer window for answers opens soon. Stay tuned.",
        "Our keeper caught your ticket safely. We will play it out from the back.",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

/// Category catalog service
pub struct CatalogService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CatalogService<'a> {
    /// Create a new CatalogService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// List all categories in display order
    #[instrument(skip(self))]
    pub async fn list_categories(&self) -> ServiceResult<Vec<CategoryView>> {
        let categories = self.ctx.category_repo().list().await?;
        Ok(categories.iter().map(category_view).collect())
    }

    /// Get a category by id
    #[instrument(skip(self))]
    pub async fn get_category(&self, id: i64) -> ServiceResult<Category> {
        Ok(self
            .ctx
            .category_repo()
            .find_by_id(id)
            .await?
            .ok_or(DomainError::CategoryNotFound(id))?)
    }

    /// Seed the default catalog and canned replies into an empty store;
    /// no-op for tables that already have rows
    #[instrument(skip(self))]
    pub async fn seed_defaults(&self) -> ServiceResult<()> {
        self.ctx
            .category_repo()
            .seed(&default_categories())
            .await?;
        self.ctx
            .auto_reply_repo()
            .seed(&default_auto_replies())
            .await?;
        info!("Category catalog and auto-replies seeded");
        Ok(())
    }
}
