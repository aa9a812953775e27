mod commands;

use std::process::ExitCode;

use anyhow::Context;
use commands::{CommandLine, Commands, parse_target};
use stockroom_core::Actor;
use stockroom_infra::{InventoryStore, PurchaseError, StoreConfig};
use stockroom_inventory::{PurchaseItem, PurchaseRejected, render_catalog, render_listing};

fn main() -> anyhow::Result<ExitCode> {
    let cli = CommandLine::parse_args();
    stockroom_observability::init();

    let mut config = StoreConfig::from_env();
    if let Some(path) = cli.catalog {
        config = config.with_catalog_path(path);
    }
    if let Some(path) = cli.audit_log {
        config = config.with_audit_log_path(path);
    }
    tracing::debug!(catalog = %config.catalog_path.display(), audit_log = %config.audit_log_path.display(), "configured");

    let store = InventoryStore::from_config(&config);

    match cli.command {
        Commands::List => {
            let catalog = store.load_catalog();
            println!("{}", "=".repeat(40));
            println!("INVENTORY SYSTEM");
            println!("{}", "=".repeat(40));
            if catalog.is_empty() {
                println!("Inventory is empty or missing {}.", config.catalog_path.display());
            } else {
                print!("\n{}", render_catalog(&catalog));
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Buy { target: None, .. } => {
            let catalog = store.load_catalog();
            if catalog.is_empty() {
                println!("Inventory is empty or missing {}.", config.catalog_path.display());
            } else {
                println!("Choose an item to buy:");
                print!("{}", render_listing(&catalog));
                println!("\nThen run: stockroom buy <department/item> [-q QUANTITY] [-n NAME]");
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Buy {
            target: Some(target),
            quantity,
            name,
        } => {
            let item = parse_target(&target).with_context(|| format!("invalid item '{target}'"))?;
            let command = PurchaseItem::new(None, item, quantity, Actor::from_optional(name.as_deref()));

            match store.buy(&command) {
                Ok(event) => {
                    println!("Purchase successful!");
                    println!("Total cost: ${}", event.total);
                    Ok(ExitCode::SUCCESS)
                }
                Err(PurchaseError::Rejected(rejection)) => {
                    match rejection {
                        PurchaseRejected::ItemNotFound { .. } => eprintln!("Item not found!"),
                        PurchaseRejected::InsufficientStock { available, .. } => {
                            eprintln!("Not enough stock! Only {available} left.")
                        }
                        PurchaseRejected::TotalOverflow { .. } => eprintln!("Total price is too large!"),
                        PurchaseRejected::Invalid(err) => eprintln!("{err}"),
                    }
                    Ok(ExitCode::FAILURE)
                }
                Err(err @ PurchaseError::Persistence(_)) => {
                    Err::<ExitCode, _>(err).with_context(|| format!("failed to save {}", config.catalog_path.display()))
                }
                Err(err @ PurchaseError::Inconsistent(_)) => Err(err.into()),
            }
        }
    }
}
