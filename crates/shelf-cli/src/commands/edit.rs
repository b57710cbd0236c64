//! Write commands

use anyhow::{Context, Result};
use shelf::prelude::*;

use super::{parse_category, Target};

/// Field values given on the command line
pub struct Fields {
    pub name: Option<String>,
    pub category: Option<String>,
    pub price: Option<i64>,
    pub qty: Option<i64>,
    pub seller: Option<String>,
    pub stock: Option<StockStatus>,
}

impl Fields {
    fn into_payload(self) -> Result<Payload> {
        let mut payload = Payload::new();
        if let Some(name) = self.name {
            payload.set(Column::Name, name);
        }
        if let Some(category) = self.category {
            payload.set(Column::Category, parse_category(&category)?.code());
        }
        if let Some(price) = self.price {
            payload.set(Column::Price, price);
        }
        if let Some(qty) = self.qty {
            payload.set(Column::Quantity, qty);
        }
        if let Some(seller) = self.seller {
            payload.set(Column::Seller, seller);
        }
        if let Some(stock) = self.stock {
            payload.set(Column::InStock, stock.code());
        }
        Ok(payload)
    }
}

pub fn add(target: &Target, fields: Fields) -> Result<()> {
    let shelf = target.open()?;
    let payload = fields.into_payload()?;

    let locator = shelf
        .gateway()
        .insert(&shelf.collection_locator(), &payload)
        .context("Failed to insert item")?
        .into_result()
        .context("Item rejected")?;

    println!("Added {}", locator);
    Ok(())
}

pub fn update(target: &Target, id: i64, fields: Fields) -> Result<()> {
    let shelf = target.open()?;
    let payload = fields.into_payload()?;
    let locator = shelf.item_locator(id);

    let updated = shelf
        .gateway()
        .update(&locator, &payload, None)
        .with_context(|| format!("Failed to update {}", locator))?;

    if updated == 0 {
        println!("No item updated");
    } else {
        println!("Updated {}", locator);
    }
    Ok(())
}

/// Delete one item, or every item when `id` is `None`
pub fn delete(target: &Target, id: Option<i64>) -> Result<()> {
    let shelf = target.open()?;
    let locator = match id {
        Some(id) => shelf.item_locator(id),
        None => shelf.collection_locator(),
    };

    let deleted = shelf
        .gateway()
        .delete(&locator, None)
        .with_context(|| format!("Failed to delete {}", locator))?;

    println!("Deleted {} item(s)", deleted);
    Ok(())
}
