//! Unified Shelf interface
//!
//! Provides a single entry point that opens the store and wires the router,
//! change hub, and gateway together.

use crate::{
    ChangeHub, InventoryGateway, ItemId, ItemStore, Locator, RejectionNotifier, Result, Router,
    SqliteItemStore, StoreConfig,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// File name of the inventory database inside a shelf directory
pub const DATABASE_FILE: &str = "inventory.db";

/// An open inventory
///
/// Bundles the SQLite store, the routing table, the change hub, and a
/// gateway over all three.
pub struct Shelf {
    store: Arc<SqliteItemStore>,
    gateway: InventoryGateway<SqliteItemStore>,
    base_path: PathBuf,
}

impl Shelf {
    /// Open the inventory in a directory
    ///
    /// The database lives at `{path}/inventory.db` and is created with its
    /// schema on first open.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config = StoreConfig::new(path.as_ref().join(DATABASE_FILE));
        Self::open_with_config(config)
    }

    /// Open with a custom configuration
    pub fn open_with_config(config: StoreConfig) -> Result<Self> {
        let base_path = config
            .path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        let router = Router::new(config.authority.clone(), config.collection.clone());

        let store = Arc::new(SqliteItemStore::open(config)?);
        let gateway = InventoryGateway::new(store.clone(), router, ChangeHub::new());

        tracing::debug!("Opened shelf at {}", base_path.display());
        Ok(Self {
            store,
            gateway,
            base_path,
        })
    }

    /// Replace the notifier that receives rejected payloads
    pub fn with_notifier(mut self, notifier: Arc<dyn RejectionNotifier>) -> Self {
        self.gateway = self.gateway.with_notifier(notifier);
        self
    }

    /// Get reference to the gateway
    pub fn gateway(&self) -> &InventoryGateway<SqliteItemStore> {
        &self.gateway
    }

    /// Get reference to the store
    pub fn store(&self) -> &Arc<SqliteItemStore> {
        &self.store
    }

    pub fn router(&self) -> &Router {
        self.gateway.router()
    }

    pub fn hub(&self) -> &ChangeHub {
        self.gateway.hub()
    }

    /// Locator of the whole collection
    pub fn collection_locator(&self) -> Locator {
        self.router().collection_locator()
    }

    /// Locator of one item
    pub fn item_locator(&self, id: ItemId) -> Locator {
        self.router().item_locator(id)
    }

    /// Get the base path
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Close the store
    pub fn close(self) -> Result<()> {
        self.store.close()?;
        tracing::debug!("Closed shelf at {}", self.base_path.display());
        Ok(())
    }
}
