//! Service context - dependency container for services
//!
//! Holds all repositories, the platform client, the presenter, and the
//! shared in-process coordination state (ticket locks, cooldowns, prompts).

use std::sync::Arc;

use ticket_common::BotConfig;
use ticket_core::{
    AutoReplyRepository, CategoryRepository, PlatformClient, ResponseRepository,
    SettingsRepository, TicketRepository, UserRepository,
};

use crate::presenter::Presenter;

use super::cooldown::CooldownGate;
use super::locks::TicketLocks;
use super::prompts::PendingPrompts;

/// Service context containing all dependencies
///
/// This is the main dependency container that gets passed to all services.
/// It provides access to:
/// - Storage repositories (any backend implementing the core traits)
/// - The platform client (real gateway adapter or a scripted fake)
/// - The presenter for user-facing payloads
/// - Dispatcher coordination state: per-ticket locks, the de-duplication
///   cooldown gate, and pending awaited-input prompts
#[derive(Clone)]
pub struct ServiceContext {
    // Repositories
    user_repo: Arc<dyn UserRepository>,
    category_repo: Arc<dyn CategoryRepository>,
    ticket_repo: Arc<dyn TicketRepository>,
    response_repo: Arc<dyn ResponseRepository>,
    settings_repo: Arc<dyn SettingsRepository>,
    auto_reply_repo: Arc<dyn AutoReplyRepository>,

    // Ports
    platform: Arc<dyn PlatformClient>,
    presenter: Arc<dyn Presenter>,

    // Configuration
    bot: BotConfig,

    // Coordination state
    locks: TicketLocks,
    cooldowns: Arc<CooldownGate>,
    prompts: Arc<PendingPrompts>,
}

impl ServiceContext {
    /// Get the user repository
    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    /// Get the category repository
    pub fn category_repo(&self) -> &dyn CategoryRepository {
        self.category_repo.as_ref()
    }

    /// Get the ticket repository
    pub fn ticket_repo(&self) -> &dyn TicketRepository {
        self.ticket_repo.as_ref()
    }

    /// Get the response repository
    pub fn response_repo(&self) -> &dyn ResponseRepository {
        self.response_repo.as_ref()
    }

    /// Get the settings repository
    pub fn settings_repo(&self) -> &dyn SettingsRepository {
        self.settings_repo.as_ref()
    }

    /// Get the auto-reply repository
    pub fn auto_reply_repo(&self) -> &dyn AutoReplyRepository {
        self.auto_reply_repo.as_ref()
    }

    /// Get the platform client
    pub fn platform(&self) -> &dyn PlatformClient {
        self.platform.as_ref()
    }

    /// Get the presenter
    pub fn presenter(&self) -> &dyn Presenter {
        self.presenter.as_ref()
    }

    /// Get the bot configuration
    pub fn bot(&self) -> &BotConfig {
        &self.bot
    }

    /// Get the per-ticket lock table
    pub fn locks(&self) -> &TicketLocks {
        &self.locks
    }

    /// Get the de-duplication cooldown gate
    pub fn cooldowns(&self) -> &CooldownGate {
        &self.cooldowns
    }

    /// Get the pending prompt table
    pub fn prompts(&self) -> &PendingPrompts {
        &self.prompts
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("platform", &"dyn PlatformClient")
            .field("bot", &self.bot)
            .finish()
    }
}

/// Builder for creating ServiceContext
pub struct ServiceContextBuilder {
    user_repo: Option<Arc<dyn UserRepository>>,
    category_repo: Option<Arc<dyn CategoryRepository>>,
    ticket_repo: Option<Arc<dyn TicketRepository>>,
    response_repo: Option<Arc<dyn ResponseRepository>>,
    settings_repo: Option<Arc<dyn SettingsRepository>>,
    auto_reply_repo: Option<Arc<dyn AutoReplyRepository>>,
    platform: Option<Arc<dyn PlatformClient>>,
    presenter: Option<Arc<dyn Presenter>>,
    bot: Option<BotConfig>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self {
            user_repo: None,
            category_repo: None,
            ticket_repo: None,
            response_repo: None,
            settings_repo: None,
            auto_reply_repo: None,
            platform: None,
            presenter: None,
            bot: None,
        }
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn category_repo(mut self, repo: Arc<dyn CategoryRepository>) -> Self {
        self.category_repo = Some(repo);
        self
    }

    pub fn ticket_repo(mut self, repo: Arc<dyn TicketRepository>) -> Self {
        self.ticket_repo = Some(repo);
        self
    }

    pub fn response_repo(mut self, repo: Arc<dyn ResponseRepository>) -> Self {
        self.response_repo = Some(repo);
        self
    }

    pub fn settings_repo(mut self, repo: Arc<dyn SettingsRepository>) -> Self {
        self.settings_repo = Some(repo);
        self
    }

    pub fn auto_reply_repo(mut self, repo: Arc<dyn AutoReplyRepository>) -> Self {
        self.auto_reply_repo = Some(repo);
        self
    }

    pub fn platform(mut self, platform: Arc<dyn PlatformClient>) -> Self {
        self.platform = Some(platform);
        self
    }

    pub fn presenter(mut self, presenter: Arc<dyn Presenter>) -> Self {
        self.presenter = Some(presenter);
        self
    }

    pub fn bot_config(mut self, bot: BotConfig) -> Self {
        self.bot = Some(bot);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> super::error::ServiceResult<ServiceContext> {
        use super::error::ServiceError;

        let bot = self
            .bot
            .ok_or_else(|| ServiceError::validation("bot config is required"))?;
        let cooldowns = Arc::new(CooldownGate::new(std::time::Duration::from_secs(
            bot.cooldown_seconds,
        )));
        let prompts = Arc::new(PendingPrompts::new(std::time::Duration::from_secs(
            bot.prompt_timeout_seconds,
        )));

        Ok(ServiceContext {
            user_repo: self
                .user_repo
                .ok_or_else(|| ServiceError::validation("user_repo is required"))?,
            category_repo: self
                .category_repo
                .ok_or_else(|| ServiceError::validation("category_repo is required"))?,
            ticket_repo: self
                .ticket_repo
                .ok_or_else(|| ServiceError::validation("ticket_repo is required"))?,
            response_repo: self
                .response_repo
                .ok_or_else(|| ServiceError::validation("response_repo is required"))?,
            settings_repo: self
                .settings_repo
                .ok_or_else(|| ServiceError::validation("settings_repo is required"))?,
            auto_reply_repo: self
                .auto_reply_repo
                .ok_or_else(|| ServiceError::validation("auto_reply_repo is required"))?,
            platform: self
                .platform
                .ok_or_else(|| ServiceError::validation("platform is required"))?,
            presenter: self
                .presenter
                .ok_or_else(|| ServiceError::validation("presenter is required"))?,
            bot,
            locks: TicketLocks::default(),
            cooldowns,
            prompts,
        })
    }
}

impl Default for ServiceContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}
