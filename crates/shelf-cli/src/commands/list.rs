//! Read commands

use anyhow::{Context, Result};
use shelf::prelude::*;

use super::{parse_column, parse_value, print_row, Target};

pub fn list(
    target: &Target,
    where_clause: Option<String>,
    args: Vec<String>,
    sort: Option<String>,
    desc: bool,
) -> Result<()> {
    let shelf = target.open()?;

    let selection =
        where_clause.map(|clause| Selection::new(clause, args.iter().map(|a| parse_value(a))));
    let sort = sort
        .map(|name| {
            let column = parse_column(&name)?;
            Ok::<_, anyhow::Error>(if desc {
                SortOrder::desc(column)
            } else {
                SortOrder::asc(column)
            })
        })
        .transpose()?;

    let rows = shelf
        .gateway()
        .query(
            &shelf.collection_locator(),
            None,
            selection.as_ref(),
            sort.as_ref(),
        )
        .context("Failed to query items")?;

    println!("\n{} item(s)", rows.len());
    println!("{}", "=".repeat(60));
    for row in &rows {
        print_row(row);
    }

    Ok(())
}

pub fn show(target: &Target, id: i64) -> Result<()> {
    let shelf = target.open()?;
    let locator = shelf.item_locator(id);

    let rows = shelf
        .gateway()
        .query(&locator, None, None, None)
        .with_context(|| format!("Failed to query {}", locator))?;

    let Some(item) = rows.items()?.into_iter().next() else {
        println!("No item with id {}", id);
        return Ok(());
    };

    println!("\n{}", locator);
    println!("{}", "=".repeat(60));
    println!("Name:     {}", item.name);
    println!("Category: {}", item.category);
    println!("Price:    {}", item.price);
    println!("Quantity: {}", item.quantity);
    println!("Seller:   {}", item.seller);
    println!(
        "Stock:    {}",
        match item.in_stock {
            StockStatus::Available => "available",
            StockStatus::NotAvailable => "not available",
        }
    );

    Ok(())
}
