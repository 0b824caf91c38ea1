//! Integration test utilities for the ticket bot
//!
//! This crate provides a memory-backed service stack and a scripted fake
//! platform client for end-to-end scenario and concurrency tests.

pub mod helpers;
pub mod fixtures;

pub use helpers::*;
pub use fixtures::*;
