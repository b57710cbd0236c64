//! Status command implementation

use anyhow::{Context, Result};
use shelf::prelude::*;

use super::Target;

pub fn execute(target: &Target) -> Result<()> {
    let shelf = target.open()?;
    let config = shelf.store().config();
    tracing::info!("Checking database status: {}", config.path.display());

    println!("\nDatabase Status");
    println!("{}", "=".repeat(60));
    println!("Path: {}", config.path.display());

    let schema_version = shelf
        .store()
        .schema_version()
        .context("Failed to get schema version")?;
    println!("Schema Version: {}", schema_version);
    println!("WAL Mode: {}", config.wal_mode);
    println!("Synchronous: {}", config.synchronous.as_pragma());

    let items = shelf
        .gateway()
        .query(&shelf.collection_locator(), Some(&[Column::Id][..]), None, None)
        .context("Failed to count items")?;
    println!("\nCollection: {}", shelf.collection_locator());
    println!("  Items: {}", items.len());

    Ok(())
}

pub fn resource_type(target: &Target, raw: &str) -> Result<()> {
    let shelf = target.open()?;
    let locator = Locator::parse(raw).with_context(|| format!("Invalid locator '{}'", raw))?;

    let resource = shelf
        .gateway()
        .resolve_type(&locator)
        .with_context(|| format!("Failed to resolve {}", locator))?;

    let kind = if resource.is_collection() {
        "collection"
    } else {
        "item"
    };
    println!("{} ({})", resource.mime(), kind);
    Ok(())
}
