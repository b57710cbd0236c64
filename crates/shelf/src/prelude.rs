//! Shelf Prelude
//!
//! Import this to get all commonly used types and traits:
//!
//! ```
//! use shelf::prelude::*;
//! ```

// Core types
pub use crate::{
    Category, Column, Item, ItemId, Locator, Payload, Rejection, Result, Row, Selection,
    ShelfError, SortOrder, StockStatus, Value,
};

// Routing
pub use crate::{ResourceType, Route, Router};

// Config
pub use crate::{StoreConfig, SynchronousMode};

// Traits
pub use crate::{ItemStore, RejectionNotifier};

// Gateway and collaborators
pub use crate::{
    ChangeHub, InsertOutcome, InventoryGateway, ItemListAdapter, LocatorFilter, RowSet, Shelf,
    SqliteItemStore, Subscription,
};

// Re-export common external deps
pub use anyhow;
pub use std::sync::Arc;
pub use tracing;
