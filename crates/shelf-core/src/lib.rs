//! Shelf Core: types and rules for the shelf inventory gateway
//!
//! This crate defines the pieces of the gateway that do not touch storage:
//! - Locators: opaque `content://authority/collection[/id]` references
//! - Router: classifies a locator as the whole collection or a single item
//! - Validator: domain rules for insert and update payloads
//! - Store trait: the contract the SQLite backend implements
//!
//! Everything here is pure; the `shelf-sqlite` and `shelf` crates wire it to
//! a database and to change notifications.

pub mod config;
pub mod error;
pub mod locator;
pub mod observe;
pub mod traits;
pub mod types;
pub mod validate;

pub use config::{StoreConfig, SynchronousMode};
pub use error::{Result, ShelfError};
pub use locator::{Locator, ResourceType, Route, Router};
pub use traits::ItemStore;
pub use types::{
    Category, Column, Item, ItemId, Payload, Row, Selection, SortOrder, StockStatus, Value,
};
pub use validate::{validate_for_insert, validate_for_update, Field, Rejection};
