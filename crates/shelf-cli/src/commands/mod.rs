pub mod edit;
pub mod list;
pub mod status;

use anyhow::{Context, Result};
use shelf::prelude::*;
use std::path::PathBuf;

/// Where to find the inventory
pub struct Target {
    pub db_path: PathBuf,
    pub config: Option<PathBuf>,
}

impl Target {
    pub fn open(&self) -> Result<Shelf> {
        match &self.config {
            Some(file) => {
                let config = StoreConfig::from_json(file)
                    .with_context(|| format!("Failed to load config {}", file.display()))?;
                Shelf::open_with_config(config).context("Failed to open database")
            }
            None => Shelf::open(&self.db_path).context("Failed to open database"),
        }
    }
}

/// Integers stay integers; everything else is text
pub fn parse_value(raw: &str) -> Value {
    raw.parse::<i64>()
        .map(Value::Integer)
        .unwrap_or_else(|_| Value::from(raw))
}

pub fn parse_category(raw: &str) -> Result<Category> {
    raw.parse::<i64>()
        .ok()
        .and_then(Category::from_code)
        .or_else(|| Category::from_label(raw))
        .with_context(|| format!("Unknown category '{}'", raw))
}

pub fn parse_column(raw: &str) -> Result<Column> {
    Column::from_name(raw).with_context(|| format!("Unknown column '{}'", raw))
}

pub fn print_row(row: &Row) {
    let cells: Vec<String> = row
        .columns()
        .iter()
        .zip(row.values())
        .map(|(column, value)| match (column, value.as_i64()) {
            (Column::Category, Some(code)) => match Category::from_code(code) {
                Some(category) => format!("{}={}", column, category),
                None => format!("{}={}", column, value),
            },
            _ => format!("{}={}", column, value),
        })
        .collect();
    println!("  {}", cells.join("  "));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_value() {
        assert_eq!(parse_value("42"), Value::Integer(42));
        assert_eq!(parse_value("-3"), Value::Integer(-3));
        assert_eq!(parse_value("Acme"), Value::Text("Acme".into()));
    }

    #[test]
    fn test_parse_category() {
        assert_eq!(parse_category("books").unwrap(), Category::Books);
        assert_eq!(parse_category("8").unwrap(), Category::Grocery);
        assert!(parse_category("9").is_err());
        assert!(parse_category("furniture").is_err());
    }

    #[test]
    fn test_parse_column() {
        assert_eq!(parse_column("qty").unwrap(), Column::Quantity);
        assert!(parse_column("weight").is_err());
    }
}
