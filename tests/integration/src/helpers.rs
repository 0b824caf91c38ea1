//! Test helpers for integration tests
//!
//! Builds the full service stack over the in-memory store and a scripted
//! fake platform client that records every call and can be told to fail.

use std::collections::HashSet;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;

use ticket_common::BotConfig;
use ticket_core::{
    ChannelOverwrite, PlatformClient, PlatformError, PlatformResult, Snowflake, User, UserProfile,
    UserRepository,
};
use ticket_memory::MemoryStore;
use ticket_service::{
    CatalogService, ServiceContext, ServiceContextBuilder, TextPresenter,
};

// ============================================================================
// Fake platform client
// ============================================================================

#[derive(Debug, Default)]
struct FakeState {
    channels: HashSet<i64>,
    /// Fail this many upcoming channel creations
    create_failures: u32,
    channel_messages: Vec<(Snowflake, Value)>,
    direct_messages: Vec<(Snowflake, Value)>,
    deleted: Vec<Snowflake>,
}

/// Scripted platform client recording every call
pub struct FakePlatform {
    next_channel: AtomicI64,
    state: Mutex<FakeState>,
}

impl Default for FakePlatform {
    fn default() -> Self {
        Self {
            next_channel: AtomicI64::new(5000),
            state: Mutex::new(FakeState::default()),
        }
    }
}

impl FakePlatform {
    /// Make the next `n` channel creations fail
    pub fn fail_next_creates(&self, n: u32) {
        self.state.lock().create_failures = n;
    }

    /// Remove a channel behind the services' back, as a moderator would
    pub fn drop_channel(&self, channel_id: Snowflake) {
        self.state.lock().channels.remove(&channel_id.into_inner());
    }

    /// Number of live channels
    pub fn channel_count(&self) -> usize {
        self.state.lock().channels.len()
    }

    /// Payloads posted to channels, in order
    pub fn channel_messages(&self) -> Vec<(Snowflake, Value)> {
        self.state.lock().channel_messages.clone()
    }

    /// Payloads delivered as DMs, in order
    pub fn direct_messages(&self) -> Vec<(Snowflake, Value)> {
        self.state.lock().direct_messages.clone()
    }

    /// Channels deleted through the client, in order
    pub fn deleted_channels(&self) -> Vec<Snowflake> {
        self.state.lock().deleted.clone()
    }
}

#[async_trait]
impl PlatformClient for FakePlatform {
    async fn create_private_channel(
        &self,
        _guild_id: Snowflake,
        _name: &str,
        _overwrites: &[ChannelOverwrite],
    ) -> PlatformResult<Snowflake> {
        let mut state = self.state.lock();
        if state.create_failures > 0 {
            state.create_failures -= 1;
            return Err(PlatformError::Failed("scripted create failure".into()));
        }
        let id = self.next_channel.fetch_add(1, Ordering::SeqCst);
        state.channels.insert(id);
        Ok(Snowflake::new(id))
    }

    async fn delete_channel(&self, channel_id: Snowflake) -> PlatformResult<()> {
        let mut state = self.state.lock();
        if !state.channels.remove(&channel_id.into_inner()) {
            return Err(PlatformError::UnknownChannel(channel_id));
        }
        state.deleted.push(channel_id);
        Ok(())
    }

    async fn channel_exists(&self, channel_id: Snowflake) -> PlatformResult<bool> {
        Ok(self.state.lock().channels.contains(&channel_id.into_inner()))
    }

    async fn send_channel_message(
        &self,
        channel_id: Snowflake,
        payload: &Value,
    ) -> PlatformResult<()> {
        self.state
            .lock()
            .channel_messages
            .push((channel_id, payload.clone()));
        Ok(())
    }

    async fn send_direct_message(
        &self,
        user_id: Snowflake,
        payload: &Value,
    ) -> PlatformResult<()> {
        self.state
            .lock()
            .direct_messages
            .push((user_id, payload.clone()));
        Ok(())
    }
}

// ============================================================================
// Test application
// ============================================================================

/// Fully wired memory-backed service stack
pub struct TestApp {
    pub ctx: Arc<ServiceContext>,
    pub store: MemoryStore,
    pub platform: Arc<FakePlatform>,
}

/// Bot configuration used by tests
///
/// The cooldown window is zero so repeated calls in one test do not trip
/// the duplicate gate; tests that exercise the gate pass their own config.
pub fn test_bot_config() -> BotConfig {
    BotConfig {
        token: "test-token".to_string(),
        default_prefix: ".".to_string(),
        bot_user_id: Some(Snowflake::new(1)),
        cooldown_seconds: 0,
        prompt_timeout_seconds: 60,
        channel_create_retries: 3,
        reconcile_interval_seconds: 300,
    }
}

/// Build a test app with the default test bot config and a seeded catalog
pub async fn test_app() -> Result<TestApp> {
    test_app_with(test_bot_config()).await
}

/// Build a test app with a custom bot config
pub async fn test_app_with(bot: BotConfig) -> Result<TestApp> {
    let store = MemoryStore::default();
    let platform = Arc::new(FakePlatform::default());

    let ctx = ServiceContextBuilder::new()
        .user_repo(Arc::new(store.clone()))
        .category_repo(Arc::new(store.clone()))
        .ticket_repo(Arc::new(store.clone()))
        .response_repo(Arc::new(store.clone()))
        .settings_repo(Arc::new(store.clone()))
        .auto_reply_repo(Arc::new(store.clone()))
        .platform(platform.clone())
        .presenter(Arc::new(TextPresenter))
        .bot_config(bot)
        .build()
        .map_err(|e| anyhow::anyhow!("{e}"))?;
    let ctx = Arc::new(ctx);

    CatalogService::new(&ctx)
        .seed_defaults()
        .await
        .map_err(|e| anyhow::anyhow!("{e}"))?;

    Ok(TestApp {
        ctx,
        store,
        platform,
    })
}

impl TestApp {
    /// Create a user record directly in the store
    pub async fn seed_user(
        &self,
        discord_id: Snowflake,
        username: &str,
        is_staff: bool,
    ) -> Result<User> {
        let user = UserRepository::upsert(
            &self.store,
            &UserProfile {
                discord_id,
                username: username.to_string(),
                avatar: None,
                is_staff,
            },
        )
        .await
        .map_err(|e| anyhow::anyhow!("{e}"))?;
        Ok(user)
    }

    /// Resolve a seeded category id by name
    pub async fn category_id(&self, name: &str) -> Result<i64> {
        let categories = CatalogService::new(&self.ctx)
            .list_categories()
            .await
            .map_err(|e| anyhow::anyhow!("{e}"))?;
        categories
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.id)
            .ok_or_else(|| anyhow::anyhow!("category {name} not seeded"))
    }
}
