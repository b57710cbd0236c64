//! Query results

use shelf_bus::Subscription;
use shelf_core::{Item, Locator, Result, Row};

/// Rows returned by a gateway query
///
/// Rows are read positionally. The set also owns the change subscription
/// attached at query time for the queried locator; dropping or closing the
/// set releases it.
#[derive(Debug)]
pub struct RowSet {
    locator: Locator,
    rows: Vec<Row>,
    subscription: Option<Subscription>,
}

impl RowSet {
    pub fn new(locator: Locator, rows: Vec<Row>, subscription: Option<Subscription>) -> Self {
        Self {
            locator,
            rows,
            subscription,
        }
    }

    /// The locator this set was queried with
    pub fn locator(&self) -> &Locator {
        &self.locator
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Row at `position`, if in range
    pub fn get(&self, position: usize) -> Option<&Row> {
        self.rows.get(position)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Row> {
        self.rows.iter()
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Convert every row to a typed [`Item`]
    ///
    /// Requires the query to have projected every column.
    pub fn items(&self) -> Result<Vec<Item>> {
        self.rows.iter().map(Item::try_from).collect()
    }

    pub fn subscription(&self) -> Option<&Subscription> {
        self.subscription.as_ref()
    }

    /// Detach the change subscription, leaving the rows in place
    pub fn take_subscription(&mut self) -> Option<Subscription> {
        self.subscription.take()
    }

    /// True if at least one change arrived since the last call
    ///
    /// Queued changes are consumed.
    pub fn has_changed(&self) -> bool {
        self.subscription
            .as_ref()
            .is_some_and(|sub| !sub.drain().is_empty())
    }

    /// Release the rows and the subscription
    pub fn close(self) {}
}

impl<'a> IntoIterator for &'a RowSet {
    type Item = &'a Row;
    type IntoIter = std::slice::Iter<'a, Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

impl IntoIterator for RowSet {
    type Item = Row;
    type IntoIter = std::vec::IntoIter<Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}
