//! Identity service
//!
//! Upserts users by their Discord id on every interaction.

use tracing::instrument;

use ticket_core::{User, UserProfile};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Identity service
pub struct IdentityService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> IdentityService<'a> {
    /// Create a new IdentityService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Resolve the acting user, creating the record on first contact and
    /// refreshing name, avatar, staff flag and last-seen otherwise
    #[instrument(skip(self, profile), fields(discord_id = %profile.discord_id))]
    pub async fn resolve_user(&self, profile: &UserProfile) -> ServiceResult<User> {
        Ok(self.ctx.user_repo().upsert(profile).await?)
    }
}
