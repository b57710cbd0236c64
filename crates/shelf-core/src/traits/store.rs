use crate::config::StoreConfig;
use crate::error::Result;
use crate::types::{Column, ItemId, Payload, Row, Selection, SortOrder};

/// Item store: the single inventory table behind the gateway
///
/// Provides:
/// - Schema creation on first open
/// - Filtered, projected, sorted reads
/// - Single-row insert and filtered update/delete
///
/// Implementations run each call to completion and do not retry. They do not
/// validate payloads; the gateway does that before calling in.
pub trait ItemStore: Send + Sync {
    /// Open the store, creating the schema on first use
    fn open(cfg: StoreConfig) -> Result<Self>
    where
        Self: Sized;

    /// Close the store
    fn close(&self) -> Result<()>;

    /// Read rows
    ///
    /// `projection` of `None` selects every column in table order.
    fn query(
        &self,
        projection: Option<&[Column]>,
        selection: Option<&Selection>,
        sort: Option<&SortOrder>,
    ) -> Result<Vec<Row>>;

    /// Insert one row and return its assigned id
    ///
    /// `Ok(None)` means the store accepted the statement but wrote no row.
    fn insert(&self, payload: &Payload) -> Result<Option<ItemId>>;

    /// Update rows matching `selection` (all rows when `None`)
    fn update(&self, payload: &Payload, selection: Option<&Selection>) -> Result<usize>;

    /// Delete rows matching `selection` (all rows when `None`)
    fn delete(&self, selection: Option<&Selection>) -> Result<usize>;

    /// Record a target schema version
    fn migrate(&self, target_version: u32) -> Result<()>;

    /// Get the schema version
    fn schema_version(&self) -> Result<u32>;
}
