//! Traits (ports) - interfaces the domain expects its collaborators to fill

mod platform;
mod repositories;

pub use platform::{ChannelOverwrite, PlatformClient, PlatformError, PlatformResult};
pub use repositories::{
    AutoReplyRepository, CategoryRepository, NewCategory, NewTicket, RepoResult,
    ResponseRepository, SettingsMutation, SettingsRepository, TicketRepository, UserProfile,
    UserRepository,
};
