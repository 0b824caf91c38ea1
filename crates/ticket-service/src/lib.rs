//! # ticket-service
//!
//! Application layer containing business logic, services, and DTOs.
//!
//! The [`services::Dispatcher`] is the single entry point a transport
//! (gateway adapter, test harness) calls into; everything below it is
//! reached through the [`services::ServiceContext`] dependency container.

pub mod dto;
pub mod presenter;
pub mod services;

pub use presenter::{Presenter, RenderPayload, TextPresenter};
pub use services::{
    Action, ActorContext, BindingService, CatalogService, Dispatcher, GuildConfigService,
    IdentityService, ReconcileService, ServiceContext, ServiceContextBuilder, ServiceError,
    ServiceResult, TicketService,
};
