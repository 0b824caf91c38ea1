//! # ticket-memory
//!
//! In-memory implementation of the repository traits from `ticket-core`.
//!
//! One [`MemoryStore`] implements every repository trait over a single
//! shared state guarded by a `parking_lot::RwLock`. Because every write
//! takes the one write lock, the atomicity guarantees the traits demand
//! (sequence numbering, status transitions) hold trivially.
//!
//! The store backs the integration test suite and doubles as a throwaway
//! backend for local runs without PostgreSQL.

mod store;

pub use store::MemoryStore;
