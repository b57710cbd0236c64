//! The gateway: routed, validated access to the inventory table
//!
//! Every operation follows the same path:
//! 1. **Route**: the locator is classified as the collection or one item
//! 2. **Validate**: insert and update payloads are checked (rejections are
//!    reported as sentinel results, not errors)
//! 3. **Execute**: the store runs the statement; item locators replace the
//!    caller's filter with `_id = ?`
//! 4. **Notify**: successful writes publish a change for the locator before
//!    the call returns
//!
//! # Example
//!
//! ```no_run
//! use shelf::prelude::*;
//!
//! # fn main() -> Result<()> {
//! let shelf = Shelf::open("./data")?;
//! let gateway = shelf.gateway();
//! let item = shelf.item_locator(1);
//!
//! // Filter arguments are ignored for item locators
//! let changed = gateway.update(&item, &Payload::new().with_quantity(0), None)?;
//! if changed == 0 {
//!     println!("nothing updated");
//! }
//! # Ok(())
//! # }
//! ```

use shelf_bus::{ChangeHub, Subscription};
use shelf_core::{
    observe, validate_for_insert, validate_for_update, Column, ItemStore, Locator, Payload,
    Rejection, ResourceType, Result, Route, Router, Selection, ShelfError, SortOrder,
};
use shelf_sqlite::SqliteItemStore;
use std::sync::Arc;
use std::time::Instant;

use crate::notice::{LogNotifier, RejectionNotifier};
use crate::rowset::RowSet;

/// Result of an insert that did not fail outright
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertOutcome {
    /// Row written; the locator addresses the new item
    Inserted(Locator),
    /// Payload refused by validation; nothing was written
    Rejected(Rejection),
}

impl InsertOutcome {
    pub fn locator(&self) -> Option<&Locator> {
        match self {
            InsertOutcome::Inserted(locator) => Some(locator),
            InsertOutcome::Rejected(_) => None,
        }
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, InsertOutcome::Rejected(_))
    }

    /// Lift a rejection into [`ShelfError::ValidationRejected`]
    pub fn into_result(self) -> Result<Locator> {
        match self {
            InsertOutcome::Inserted(locator) => Ok(locator),
            InsertOutcome::Rejected(rejection) => Err(rejection.into()),
        }
    }
}

/// Request-routed gateway over an [`ItemStore`]
///
/// Holds an immutable routing table, the store, and the change hub. All calls
/// are synchronous; the gateway adds no locking of its own.
pub struct InventoryGateway<S: ItemStore = SqliteItemStore> {
    store: Arc<S>,
    router: Router,
    hub: ChangeHub,
    notifier: Arc<dyn RejectionNotifier>,
}

impl<S: ItemStore> InventoryGateway<S> {
    pub fn new(store: Arc<S>, router: Router, hub: ChangeHub) -> Self {
        Self {
            store,
            router,
            hub,
            notifier: Arc::new(LogNotifier),
        }
    }

    /// Replace the notifier used for rejected payloads
    pub fn with_notifier(mut self, notifier: Arc<dyn RejectionNotifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    pub fn hub(&self) -> &ChangeHub {
        &self.hub
    }

    /// Watch a locator for changes, optionally including everything beneath it
    pub fn subscribe(&self, locator: &Locator, descendants: bool) -> Subscription {
        self.hub.watch(locator.clone(), descendants)
    }

    /// Read rows addressed by `locator`
    ///
    /// For an item locator the caller's `selection` is discarded and replaced
    /// by the embedded id. The returned set is subscribed to changes on the
    /// locator and everything beneath it; at most one change stays pending.
    pub fn query(
        &self,
        locator: &Locator,
        projection: Option<&[Column]>,
        selection: Option<&Selection>,
        sort: Option<&SortOrder>,
    ) -> Result<RowSet> {
        let route = self.router.classify(locator)?;
        let by_id;
        let effective = match route {
            Route::Collection => selection,
            Route::Item(id) => {
                by_id = Selection::by_id(id);
                Some(&by_id)
            }
        };
        tracing::debug!(%locator, ?route, "query");

        let start = Instant::now();
        let rows = self
            .store
            .query(projection, effective, sort)
            .inspect_err(|e| tracing::error!("Query failed for {}: {}", locator, e))?;
        observe::record_query(start.elapsed(), rows.len());

        let subscription = self.hub.watch_coalesced(locator.clone(), true);
        Ok(RowSet::new(locator.clone(), rows, Some(subscription)))
    }

    /// Insert one item into the collection
    ///
    /// Only the collection locator accepts inserts. A rejected payload returns
    /// [`InsertOutcome::Rejected`] without touching storage.
    pub fn insert(&self, locator: &Locator, payload: &Payload) -> Result<InsertOutcome> {
        match self.router.classify(locator)? {
            Route::Collection => {}
            Route::Item(_) => {
                return Err(ShelfError::UnsupportedLocator(format!(
                    "insertion is not supported for {}",
                    locator
                )))
            }
        }

        if let Err(rejection) = validate_for_insert(payload) {
            self.reject("insert", &rejection);
            return Ok(InsertOutcome::Rejected(rejection));
        }

        let start = Instant::now();
        let id = self
            .store
            .insert(payload)
            .inspect_err(|e| tracing::error!("Failed to insert row for {}: {}", locator, e))?;
        let Some(id) = id else {
            tracing::error!("Failed to insert row for {}", locator);
            return Err(ShelfError::storage(format!("no row written for {}", locator)));
        };
        observe::record_write("insert", start.elapsed(), 1);
        tracing::info!(%locator, id, "inserted item");

        self.hub.publish(locator);
        Ok(InsertOutcome::Inserted(locator.with_appended_id(id)))
    }

    /// Update rows addressed by `locator`
    ///
    /// The payload is validated before the locator's route is acted on: a
    /// rejected payload returns `0` for any locator and never reaches storage.
    /// Item locators replace `selection` with the embedded id.
    pub fn update(
        &self,
        locator: &Locator,
        payload: &Payload,
        selection: Option<&Selection>,
    ) -> Result<usize> {
        let route = self.router.classify(locator);

        if let Err(rejection) = validate_for_update(payload) {
            self.reject("update", &rejection);
            return Ok(0);
        }

        let route = route?;
        let by_id;
        let effective = match route {
            Route::Collection => selection,
            Route::Item(id) => {
                by_id = Selection::by_id(id);
                Some(&by_id)
            }
        };
        tracing::debug!(%locator, ?route, fields = payload.len(), "update");

        let start = Instant::now();
        let updated = self
            .store
            .update(payload, effective)
            .inspect_err(|e| tracing::error!("Update failed for {}: {}", locator, e))?;
        observe::record_write("update", start.elapsed(), updated);

        if updated != 0 {
            self.hub.publish(locator);
        }
        Ok(updated)
    }

    /// Delete rows addressed by `locator`
    ///
    /// Item locators replace `selection` with the embedded id. With the
    /// collection locator and no selection, every row is deleted.
    pub fn delete(&self, locator: &Locator, selection: Option<&Selection>) -> Result<usize> {
        let route = self.router.classify(locator)?;
        let by_id;
        let effective = match route {
            Route::Collection => selection,
            Route::Item(id) => {
                by_id = Selection::by_id(id);
                Some(&by_id)
            }
        };
        tracing::debug!(%locator, ?route, "delete");

        let start = Instant::now();
        let deleted = self
            .store
            .delete(effective)
            .inspect_err(|e| tracing::error!("Delete failed for {}: {}", locator, e))?;
        observe::record_write("delete", start.elapsed(), deleted);

        if deleted != 0 {
            self.hub.publish(locator);
        }
        Ok(deleted)
    }

    /// Cardinality of the resource a locator addresses
    pub fn resolve_type(&self, locator: &Locator) -> Result<ResourceType> {
        self.router.resource_type(locator)
    }

    fn reject(&self, op: &'static str, rejection: &Rejection) {
        observe::record_rejection(op);
        tracing::debug!(op, %rejection, "payload rejected");
        self.notifier.notify(rejection);
    }
}
