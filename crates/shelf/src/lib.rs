//! Shelf: a request-routed data-access gateway for a local inventory table
//!
//! Shelf mediates every read and write of the inventory table:
//! - **Routing**: locators resolve to the whole collection or a single item
//! - **Validation**: insert and update payloads are checked before storage
//! - **Storage**: a single SQLite table, created on first open
//! - **Notifications**: successful writes publish a change keyed by locator
//!
//! # Quick Start
//!
//! ```no_run
//! use shelf::prelude::*;
//!
//! # fn main() -> Result<()> {
//! let shelf = Shelf::open("./data")?;
//! let gateway = shelf.gateway();
//!
//! let payload = Payload::new()
//!     .with_name("Pen")
//!     .with_category(Category::Other)
//!     .with_price(10)
//!     .with_quantity(5)
//!     .with_seller("Acme")
//!     .with_stock(StockStatus::Available);
//!
//! if let InsertOutcome::Inserted(locator) = gateway.insert(&shelf.collection_locator(), &payload)? {
//!     let rows = gateway.query(&locator, None, None, None)?;
//!     assert_eq!(rows.len(), 1);
//! }
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod db;
pub mod gateway;
pub mod notice;
pub mod prelude;
pub mod rowset;

// Re-export core types
pub use shelf_core::{
    config::{StoreConfig, SynchronousMode},
    error::{Result, ShelfError},
    locator::{Locator, ResourceType, Route, Router},
    traits::ItemStore,
    types::{Category, Column, Item, ItemId, Payload, Row, Selection, SortOrder, StockStatus, Value},
    validate::{validate_for_insert, validate_for_update, Field, Rejection},
};

// Re-export implementations
pub use shelf_bus::{Change, ChangeHub, LocatorFilter, Subscription};
pub use shelf_sqlite::SqliteItemStore;

// Re-export main types from this crate
pub use adapter::ItemListAdapter;
pub use db::Shelf;
pub use gateway::{InsertOutcome, InventoryGateway};
pub use notice::{ChannelNotifier, LogNotifier, RejectionNotifier, SilentNotifier};
pub use rowset::RowSet;
