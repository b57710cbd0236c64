//! SQLite-backed item store implementation
//!
//! Holds the single inventory table behind the gateway.
//!
//! Key features:
//! - Schema created on first open, reused afterwards
//! - Schema version bookkeeping (no upgrade steps)
//! - WAL mode and configurable synchronous mode
//! - Bound-parameter reads and writes

pub mod schema;
pub mod store;

pub use store::SqliteItemStore;
