use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use super::item::{Category, ItemId, StockStatus};

/// A persisted column of the inventory table
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Column {
    Id,
    Name,
    Category,
    Price,
    Quantity,
    Seller,
    InStock,
}

impl Column {
    /// Every column, in table order
    pub const ALL: [Column; 7] = [
        Column::Id,
        Column::Name,
        Column::Category,
        Column::Price,
        Column::Quantity,
        Column::Seller,
        Column::InStock,
    ];

    /// Column name as stored in SQLite
    pub fn name(&self) -> &'static str {
        match self {
            Column::Id => "_id",
            Column::Name => "name",
            Column::Category => "category",
            Column::Price => "price",
            Column::Quantity => "qty",
            Column::Seller => "seller",
            Column::InStock => "in_stock",
        }
    }

    pub fn from_name(name: &str) -> Option<Column> {
        Column::ALL.into_iter().find(|c| c.name() == name)
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single cell value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Integer(i64),
    Text(String),
}

impl Value {
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("NULL"),
            Value::Integer(v) => write!(f, "{}", v),
            Value::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Integer(v as i64)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}

/// A partial or full set of column values for insert/update
///
/// The typed `with_*` setters cover the domain fields. `set` accepts any
/// value for any column, so a payload may hold values the validator will
/// reject; that is how callers outside this crate hand over raw input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Payload {
    values: BTreeMap<Column, Value>,
}

impl Payload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, column: Column, value: impl Into<Value>) -> &mut Self {
        self.values.insert(column, value.into());
        self
    }

    pub fn with(mut self, column: Column, value: impl Into<Value>) -> Self {
        self.set(column, value);
        self
    }

    pub fn with_name(self, name: impl Into<String>) -> Self {
        self.with(Column::Name, name.into())
    }

    pub fn with_category(self, category: Category) -> Self {
        self.with(Column::Category, category.code())
    }

    pub fn with_price(self, price: i64) -> Self {
        self.with(Column::Price, price)
    }

    pub fn with_quantity(self, quantity: i64) -> Self {
        self.with(Column::Quantity, quantity)
    }

    pub fn with_seller(self, seller: impl Into<String>) -> Self {
        self.with(Column::Seller, seller.into())
    }

    pub fn with_stock(self, stock: StockStatus) -> Self {
        self.with(Column::InStock, stock.code())
    }

    pub fn get(&self, column: Column) -> Option<&Value> {
        self.values.get(&column)
    }

    pub fn contains(&self, column: Column) -> bool {
        self.values.contains_key(&column)
    }

    pub fn remove(&mut self, column: Column) -> Option<Value> {
        self.values.remove(&column)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate entries in column order
    pub fn iter(&self) -> impl Iterator<Item = (Column, &Value)> {
        self.values.iter().map(|(c, v)| (*c, v))
    }
}

impl FromIterator<(Column, Value)> for Payload {
    fn from_iter<I: IntoIterator<Item = (Column, Value)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

/// One materialized row of a query result
///
/// Rows of the same result share their column list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    columns: Arc<[Column]>,
    values: Vec<Value>,
}

impl Row {
    pub fn new(columns: Arc<[Column]>, values: Vec<Value>) -> Self {
        debug_assert_eq!(columns.len(), values.len());
        Self { columns, values }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Position of a column in this row, if it was projected
    pub fn column_index(&self, column: Column) -> Option<usize> {
        self.columns.iter().position(|c| *c == column)
    }

    pub fn get(&self, column: Column) -> Option<&Value> {
        self.column_index(column).map(|i| &self.values[i])
    }

    pub fn get_i64(&self, column: Column) -> Option<i64> {
        self.get(column).and_then(Value::as_i64)
    }

    pub fn get_str(&self, column: Column) -> Option<&str> {
        self.get(column).and_then(Value::as_str)
    }

    /// Stable row identifier, if `_id` was projected
    pub fn id(&self) -> Option<ItemId> {
        self.get_i64(Column::Id)
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }
}
