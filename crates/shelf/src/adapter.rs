//! List adapter: binds a query result to a positional list view

use shelf_core::{ItemId, Result, Row, ShelfError};

use crate::rowset::RowSet;

type RefreshFn = Box<dyn FnMut(usize) + Send>;

/// Adapts an optional [`RowSet`] for a list view
///
/// The adapter owns its source and the source's change subscription. When a
/// change arrives the data is marked stale; the caller re-queries and hands
/// the fresh set to [`replace_source`](Self::replace_source).
pub struct ItemListAdapter {
    source: Option<RowSet>,
    stale: bool,
    on_refresh: RefreshFn,
}

impl ItemListAdapter {
    /// Create an empty adapter
    ///
    /// `on_refresh` is called with the new item count every time the source
    /// is replaced.
    pub fn new(on_refresh: impl FnMut(usize) + Send + 'static) -> Self {
        Self {
            source: None,
            stale: false,
            on_refresh: Box::new(on_refresh),
        }
    }

    /// Swap in a new source and return the previous one
    ///
    /// The previous source's subscription is released before the new source
    /// is installed; the new source's subscription stays active.
    pub fn replace_source(&mut self, source: Option<RowSet>) -> Option<RowSet> {
        let mut old = self.source.take();
        if let Some(prev) = old.as_mut() {
            drop(prev.take_subscription());
        }

        self.source = source;
        self.stale = false;

        let count = self.item_count();
        tracing::debug!(count, "adapter source replaced");
        (self.on_refresh)(count);
        old
    }

    pub fn source(&self) -> Option<&RowSet> {
        self.source.as_ref()
    }

    /// Number of rows, zero without a source
    pub fn item_count(&self) -> usize {
        self.source.as_ref().map_or(0, RowSet::len)
    }

    /// Stable row id at `position`
    ///
    /// Returns 0 when there is no source, the data is stale, or the position
    /// is out of range.
    pub fn item_id(&self, position: usize) -> ItemId {
        if !self.is_data_valid() {
            return 0;
        }
        self.source
            .as_ref()
            .and_then(|rows| rows.get(position))
            .and_then(Row::id)
            .unwrap_or(0)
    }

    /// Row at `position`
    pub fn row(&self, position: usize) -> Result<&Row> {
        let source = self
            .source
            .as_ref()
            .ok_or_else(|| ShelfError::InvalidState("adapter has no source".into()))?;
        source.get(position).ok_or_else(|| {
            ShelfError::InvalidState(format!(
                "position {} out of range for {} rows",
                position,
                source.len()
            ))
        })
    }

    /// Check the source subscription for changes
    ///
    /// Returns true and marks the data stale when at least one change arrived.
    pub fn poll_changes(&mut self) -> bool {
        let changed = self.source.as_ref().is_some_and(RowSet::has_changed);
        if changed {
            self.stale = true;
        }
        changed
    }

    pub fn is_stale(&self) -> bool {
        self.stale
    }

    /// True with a source whose data has not been invalidated
    pub fn is_data_valid(&self) -> bool {
        self.source.is_some() && !self.stale
    }
}

impl std::fmt::Debug for ItemListAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ItemListAdapter")
            .field("source", &self.source)
            .field("stale", &self.stale)
            .finish()
    }
}
