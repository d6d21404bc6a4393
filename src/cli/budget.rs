//! Budget CLI commands
//!
//! Permanent monthly amounts and temporary budget periods.

use clap::Subcommand;

use super::{parse_amount, parse_month, subcategory_key};
use crate::config::Settings;
use crate::display::{budget::format_periods, money};
use crate::error::HearthResult;
use crate::models::BudgetPeriod;
use crate::services::CategoryService;
use crate::storage::Storage;

/// Permanent budget subcommands
#[derive(Subcommand)]
pub enum BudgetCommands {
    /// Set the monthly budget of a permanent subcategory
    Set {
        category: String,
        subcategory: String,
        /// Amount in whole units
        amount: String,
    },

    /// Remove the budget of a permanent subcategory
    Clear { category: String, subcategory: String },
}

/// Temporary period subcommands
#[derive(Subcommand)]
pub enum PeriodCommands {
    /// List the periods of a temporary subcategory
    List { category: String, subcategory: String },

    /// Add a budget period to a temporary subcategory
    Add {
        category: String,
        subcategory: String,
        /// Amount in whole units
        amount: String,
        /// First month (YYYY-MM)
        #[arg(long)]
        from: String,
        /// Last month (YYYY-MM), inclusive
        #[arg(long)]
        to: String,
    },

    /// Remove a period by its index in `period list`
    Remove {
        category: String,
        subcategory: String,
        index: usize,
    },
}

/// Handle a budget command
pub fn handle_budget_command(storage: &Storage, settings: &Settings, cmd: BudgetCommands) -> HearthResult<()> {
    let service = CategoryService::new(storage);

    match cmd {
        BudgetCommands::Set {
            category,
            subcategory,
            amount,
        } => {
            let key = subcategory_key(&category, &subcategory)?;
            let amount = parse_amount(&amount, settings)?;
            let previous = service.set_budget(&key, amount)?;

            match previous {
                Some(old) => println!(
                    "Budget for {}: {} (was {})",
                    key,
                    money(amount, settings),
                    money(old, settings)
                ),
                None => println!("Budget for {}: {}", key, money(amount, settings)),
            }
        }

        BudgetCommands::Clear {
            category,
            subcategory,
        } => {
            let key = subcategory_key(&category, &subcategory)?;
            let old = service.clear_budget(&key)?;
            println!("Cleared budget for {} (was {})", key, money(old, settings));
        }
    }

    Ok(())
}

/// Handle a period command
pub fn handle_period_command(storage: &Storage, settings: &Settings, cmd: PeriodCommands) -> HearthResult<()> {
    let service = CategoryService::new(storage);

    match cmd {
        PeriodCommands::List {
            category,
            subcategory,
        } => {
            let key = subcategory_key(&category, &subcategory)?;
            let periods = service.periods(&key)?;
            print!("{}", format_periods(&key, &periods, settings));
        }

        PeriodCommands::Add {
            category,
            subcategory,
            amount,
            from,
            to,
        } => {
            let key = subcategory_key(&category, &subcategory)?;
            let period = BudgetPeriod::new(
                parse_amount(&amount, settings)?,
                parse_month(&from)?,
                parse_month(&to)?,
            );
            service.add_period(&key, period)?;
            println!(
                "Added period {}..{} of {} to {}",
                period.from,
                period.to,
                money(period.amount, settings),
                key
            );
        }

        PeriodCommands::Remove {
            category,
            subcategory,
            index,
        } => {
            let key = subcategory_key(&category, &subcategory)?;
            let removed = service.remove_period(&key, index)?;
            println!("Removed period {}..{} from {}", removed.from, removed.to, key);
        }
    }

    Ok(())
}
