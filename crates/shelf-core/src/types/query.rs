use super::item::ItemId;
use super::value::{Column, Value};

/// A `WHERE` clause with positional `?` arguments
///
/// The clause is handed to SQLite as written; arguments are always bound,
/// never spliced into the text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    clause: String,
    args: Vec<Value>,
}

impl Selection {
    pub fn new(clause: impl Into<String>, args: impl IntoIterator<Item = Value>) -> Self {
        Self {
            clause: clause.into(),
            args: args.into_iter().collect(),
        }
    }

    /// `_id = ?` bound to a single item id
    pub fn by_id(id: ItemId) -> Self {
        Self::new(format!("{} = ?", Column::Id.name()), [Value::Integer(id)])
    }

    pub fn clause(&self) -> &str {
        &self.clause
    }

    pub fn args(&self) -> &[Value] {
        &self.args
    }

    /// A blank clause filters nothing
    pub fn is_empty(&self) -> bool {
        self.clause.trim().is_empty()
    }
}

/// `ORDER BY` on one column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortOrder {
    pub column: Column,
    pub descending: bool,
}

impl SortOrder {
    pub fn asc(column: Column) -> Self {
        Self {
            column,
            descending: false,
        }
    }

    pub fn desc(column: Column) -> Self {
        Self {
            column,
            descending: true,
        }
    }

    pub fn to_sql(&self) -> String {
        let dir = if self.descending { "DESC" } else { "ASC" };
        format!("{} {}", self.column.name(), dir)
    }
}
