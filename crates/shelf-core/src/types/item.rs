use serde::{Deserialize, Serialize};
use std::fmt;

use super::value::{Column, Payload, Row};
use crate::error::{Result, ShelfError};

/// Store-assigned row identifier
pub type ItemId = i64;

/// Product category (stored as its integer code)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Other,
    Electronics,
    Apparel,
    HealthAndBeauty,
    Music,
    Books,
    VideoAndGames,
    Toys,
    Grocery,
}

impl Category {
    pub const ALL: [Category; 9] = [
        Category::Other,
        Category::Electronics,
        Category::Apparel,
        Category::HealthAndBeauty,
        Category::Music,
        Category::Books,
        Category::VideoAndGames,
        Category::Toys,
        Category::Grocery,
    ];

    pub fn code(&self) -> i64 {
        match self {
            Category::Other => 0,
            Category::Electronics => 1,
            Category::Apparel => 2,
            Category::HealthAndBeauty => 3,
            Category::Music => 4,
            Category::Books => 5,
            Category::VideoAndGames => 6,
            Category::Toys => 7,
            Category::Grocery => 8,
        }
    }

    pub fn from_code(code: i64) -> Option<Category> {
        Category::ALL.into_iter().find(|c| c.code() == code)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::Other => "other",
            Category::Electronics => "electronics",
            Category::Apparel => "apparel",
            Category::HealthAndBeauty => "health-and-beauty",
            Category::Music => "music",
            Category::Books => "books",
            Category::VideoAndGames => "video-and-games",
            Category::Toys => "toys",
            Category::Grocery => "grocery",
        }
    }

    pub fn from_label(label: &str) -> Option<Category> {
        Category::ALL.into_iter().find(|c| c.label() == label)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Stock availability (stored as 0/1)
///
/// The default matches the `in_stock` column default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum StockStatus {
    Available,
    #[default]
    NotAvailable,
}

impl StockStatus {
    pub fn code(&self) -> i64 {
        match self {
            StockStatus::Available => 0,
            StockStatus::NotAvailable => 1,
        }
    }

    pub fn from_code(code: i64) -> Option<StockStatus> {
        match code {
            0 => Some(StockStatus::Available),
            1 => Some(StockStatus::NotAvailable),
            _ => None,
        }
    }
}

/// A fully typed inventory row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub category: Category,
    pub price: i64,
    pub quantity: i64,
    pub seller: String,
    pub in_stock: StockStatus,
}

impl Item {
    /// Payload carrying every domain field of this item (no id)
    pub fn to_payload(&self) -> Payload {
        Payload::new()
            .with_name(self.name.clone())
            .with_category(self.category)
            .with_price(self.price)
            .with_quantity(self.quantity)
            .with_seller(self.seller.clone())
            .with_stock(self.in_stock)
    }
}

impl TryFrom<&Row> for Item {
    type Error = ShelfError;

    /// Requires a row projected with every column.
    fn try_from(row: &Row) -> Result<Self> {
        let int = |column: Column| {
            row.get_i64(column).ok_or_else(|| {
                ShelfError::InvalidState(format!("row has no integer '{}'", column))
            })
        };
        let text = |column: Column| {
            row.get_str(column).map(str::to_string).ok_or_else(|| {
                ShelfError::InvalidState(format!("row has no text '{}'", column))
            })
        };

        let category = int(Column::Category)?;
        let in_stock = int(Column::InStock)?;

        Ok(Item {
            id: int(Column::Id)?,
            name: text(Column::Name)?,
            category: Category::from_code(category).ok_or_else(|| {
                ShelfError::InvalidState(format!("unknown category code {}", category))
            })?,
            price: int(Column::Price)?,
            quantity: int(Column::Quantity)?,
            seller: text(Column::Seller)?,
            in_stock: StockStatus::from_code(in_stock).ok_or_else(|| {
                ShelfError::InvalidState(format!("unknown stock code {}", in_stock))
            })?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_codes_are_dense() {
        for (i, category) in Category::ALL.iter().enumerate() {
            assert_eq!(category.code(), i as i64);
            assert_eq!(Category::from_code(i as i64), Some(*category));
        }
        assert_eq!(Category::from_code(9), None);
        assert_eq!(Category::from_code(-1), None);
    }

    #[test]
    fn test_stock_default_matches_schema() {
        assert_eq!(StockStatus::default().code(), 1);
    }
}
