//! # Shelf Bus
//!
//! Change notifications keyed by locator.
//!
//! The hub provides:
//! - Subscriptions on a single locator or on a locator and everything beneath it
//! - Synchronous fan-out: `publish` returns after every matching queue has the change
//! - Coalesced subscriptions that keep at most one pending change
//! - Eager unsubscribe on drop, plus pruning of dead queues on publish
//!
//! ## Example
//!
//! ```rust
//! use shelf_bus::{ChangeHub, LocatorFilter};
//! use shelf_core::Router;
//!
//! let router = Router::new("com.example.android.inventory", "inventory");
//! let hub = ChangeHub::new();
//!
//! // Watch the collection and every item in it
//! let sub = hub.subscribe(LocatorFilter::subtree(router.collection_locator()));
//!
//! hub.publish(&router.item_locator(7));
//!
//! let change = sub.try_recv().unwrap().unwrap();
//! assert_eq!(change.locator, router.item_locator(7));
//! ```

pub mod error;
pub mod filter;
pub mod notification;

pub use error::{BusError, Result};
pub use filter::LocatorFilter;
pub use notification::{Change, ChangeHub, Subscription};
