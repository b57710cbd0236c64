pub mod item;
pub mod query;
pub mod value;

pub use item::{Category, Item, ItemId, StockStatus};
pub use query::{Selection, SortOrder};
pub use value::{Column, Payload, Row, Value};
