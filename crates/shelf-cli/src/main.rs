//! Shelf CLI - Command-line interface for a shelf inventory

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(name = "shelf")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to the database directory
    #[arg(short, long, default_value = "./data")]
    db_path: PathBuf,

    /// JSON store configuration (overrides --db-path)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List items in the collection
    List {
        /// SQL filter clause with `?` placeholders
        #[arg(short, long = "where")]
        where_clause: Option<String>,

        /// Filter argument, one per placeholder
        #[arg(short, long = "arg", requires = "where_clause")]
        args: Vec<String>,

        /// Column to sort by
        #[arg(short, long)]
        sort: Option<String>,

        /// Sort descending
        #[arg(long, requires = "sort")]
        desc: bool,
    },

    /// Show one item
    Show {
        /// Item id
        id: i64,
    },

    /// Add an item
    Add {
        #[arg(long)]
        name: String,

        /// Category label (e.g. "books") or code
        #[arg(long)]
        category: String,

        #[arg(long, allow_negative_numbers = true)]
        price: i64,

        #[arg(long, allow_negative_numbers = true)]
        qty: i64,

        #[arg(long)]
        seller: String,

        #[command(flatten)]
        stock: StockArgs,
    },

    /// Update fields of one item
    Update {
        /// Item id
        id: i64,

        #[arg(long)]
        name: Option<String>,

        /// Category label (e.g. "books") or code
        #[arg(long)]
        category: Option<String>,

        #[arg(long, allow_negative_numbers = true)]
        price: Option<i64>,

        #[arg(long, allow_negative_numbers = true)]
        qty: Option<i64>,

        #[arg(long)]
        seller: Option<String>,

        #[command(flatten)]
        stock: StockArgs,
    },

    /// Delete one item, or every item
    Delete {
        /// Item id
        #[arg(required_unless_present = "all", conflicts_with = "all")]
        id: Option<i64>,

        /// Delete every item
        #[arg(long)]
        all: bool,
    },

    /// Show the resource type of a locator
    Type {
        /// Locator, e.g. content://com.example.android.inventory/inventory/1
        locator: String,
    },

    /// Database information and status
    Status,
}

#[derive(Args)]
struct StockArgs {
    /// Mark as available
    #[arg(long, conflicts_with = "out_of_stock")]
    in_stock: bool,

    /// Mark as not available
    #[arg(long)]
    out_of_stock: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();

    let target = commands::Target {
        db_path: cli.db_path,
        config: cli.config,
    };

    // Execute command
    match cli.command {
        Commands::List {
            where_clause,
            args,
            sort,
            desc,
        } => {
            commands::list::list(&target, where_clause, args, sort, desc)?;
        }
        Commands::Show { id } => {
            commands::list::show(&target, id)?;
        }
        Commands::Add {
            name,
            category,
            price,
            qty,
            seller,
            stock,
        } => {
            let fields = commands::edit::Fields {
                name: Some(name),
                category: Some(category),
                price: Some(price),
                qty: Some(qty),
                seller: Some(seller),
                stock: stock.status(),
            };
            commands::edit::add(&target, fields)?;
        }
        Commands::Update {
            id,
            name,
            category,
            price,
            qty,
            seller,
            stock,
        } => {
            let fields = commands::edit::Fields {
                name,
                category,
                price,
                qty,
                seller,
                stock: stock.status(),
            };
            commands::edit::update(&target, id, fields)?;
        }
        Commands::Delete { id, all } => {
            commands::edit::delete(&target, if all { None } else { id })?;
        }
        Commands::Type { locator } => {
            commands::status::resource_type(&target, &locator)?;
        }
        Commands::Status => {
            commands::status::execute(&target)?;
        }
    }

    Ok(())
}

impl StockArgs {
    fn status(&self) -> Option<shelf::StockStatus> {
        if self.in_stock {
            Some(shelf::StockStatus::Available)
        } else if self.out_of_stock {
            Some(shelf::StockStatus::NotAvailable)
        } else {
            None
        }
    }
}
