//! Business logic services
//!
//! This module contains all service layer implementations that handle
//! business logic, validation, and orchestration of domain operations.

pub mod binding;
pub mod catalog;
pub mod config;
pub mod context;
pub mod cooldown;
pub mod dispatcher;
pub mod error;
pub mod identity;
pub mod lifecycle;
pub mod locks;
pub mod prompts;
pub mod reconcile;

// Re-export all services for convenience
pub use binding::BindingService;
pub use catalog::CatalogService;
pub use config::GuildConfigService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use cooldown::CooldownGate;
pub use dispatcher::{Action, ActorContext, Dispatcher};
pub use error::{ServiceError, ServiceResult};
pub use identity::IdentityService;
pub use lifecycle::TicketService;
pub use locks::TicketLocks;
pub use prompts::{PendingPrompts, PromptKind};
pub use reconcile::{run_reconcile_loop, ReconcileService, SweepReport};
