//! Category CLI commands
//!
//! Implements CLI commands for the permanent and temporary category trees.

use clap::Subcommand;

use super::subcategory_key;
use crate::display::category::format_category_tree;
use crate::error::HearthResult;
use crate::models::BudgetScope;
use crate::services::CategoryService;
use crate::storage::Storage;

/// Category subcommands
#[derive(Subcommand)]
pub enum CategoryCommands {
    /// List the category tree
    List {
        /// Show the temporary tree
        #[arg(short, long)]
        temporary: bool,
    },

    /// Add a category, or a subcategory when one is given
    Add {
        /// Category name
        category: String,
        /// Subcategory name
        subcategory: Option<String>,
        /// Add to the temporary tree
        #[arg(short, long)]
        temporary: bool,
    },

    /// Remove a category with everything under it, or a single subcategory
    Remove {
        /// Category name
        category: String,
        /// Subcategory name
        subcategory: Option<String>,
        /// Remove from the temporary tree
        #[arg(short, long)]
        temporary: bool,
    },
}

fn scope(temporary: bool) -> BudgetScope {
    if temporary {
        BudgetScope::Temporary
    } else {
        BudgetScope::Permanent
    }
}

/// Handle a category command
pub fn handle_category_command(storage: &Storage, cmd: CategoryCommands) -> HearthResult<()> {
    let service = CategoryService::new(storage);

    match cmd {
        CategoryCommands::List { temporary } => {
            let scope = scope(temporary);
            let tree = service.tree(scope)?;
            let budgets = match scope {
                BudgetScope::Permanent => Some(storage.budgets.get()?),
                BudgetScope::Temporary => None,
            };
            print!("{}", format_category_tree(&tree, scope, budgets.as_ref()));
        }

        CategoryCommands::Add {
            category,
            subcategory,
            temporary,
        } => {
            let scope = scope(temporary);
            match subcategory {
                Some(sub) => {
                    let key = subcategory_key(&category, &sub)?;
                    service.add_subcategory(scope, &key)?;
                    println!("Added {} subcategory: {}", scope, key);
                }
                None => {
                    service.add_category(scope, &category)?;
                    println!("Added {} category: {}", scope, category.trim());
                }
            }
        }

        CategoryCommands::Remove {
            category,
            subcategory,
            temporary,
        } => {
            let scope = scope(temporary);
            match subcategory {
                Some(sub) => {
                    let key = subcategory_key(&category, &sub)?;
                    service.remove_subcategory(scope, &key)?;
                    println!("Removed {} subcategory: {}", scope, key);
                }
                None => {
                    let removed = service.remove_category(scope, &category)?;
                    println!("Removed {} category: {}", scope, category.trim());
                    if !removed.is_empty() {
                        println!("  Subcategories removed: {}", removed.join(", "));
                    }
                }
            }
        }
    }

    Ok(())
}
