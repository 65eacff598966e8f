//! Category CLI commands

use clap::Subcommand;

use crate::error::MoneyTrackResult;
use crate::models::Category;
use crate::storage::Storage;

/// Category subcommands
#[derive(Subcommand)]
pub enum CategoryCommands {
    /// List all categories
    List,

    /// Add a new category
    Add {
        /// Category name
        name: String,
        /// Description
        #[arg(short, long)]
        description: Option<String>,
        /// Display color (hex, e.g. "#FF8800")
        #[arg(short, long)]
        color: Option<String>,
    },
}

/// Handle a category command
pub fn handle_category_command(storage: &Storage, cmd: CategoryCommands) -> MoneyTrackResult<()> {
    match cmd {
        CategoryCommands::List => {
            let categories = storage.categories.get_all()?;

            println!("{:14} {:22} {:8}", "ID", "Name", "Default");
            println!("{}", "-".repeat(46));
            for category in categories {
                println!(
                    "{:14} {:22} {:8}",
                    category.id.to_string(),
                    category.name,
                    if category.is_default { "yes" } else { "" }
                );
            }
        }

        CategoryCommands::Add {
            name,
            description,
            color,
        } => {
            let category = Category::with_details(name, description.unwrap_or_default(), color);

            storage.categories.insert(category.clone())?;
            storage.categories.save()?;

            println!("Added category {}: {}", category.id, category.name);
        }
    }

    Ok(())
}
