//! Transaction CLI commands
//!
//! Implements CLI commands for income and expense transactions.

use chrono::Local;
use clap::Subcommand;

use super::{parse_amount, parse_date, parse_month, subcategory_key};
use crate::config::Settings;
use crate::display::transaction::{format_transaction_details, format_transaction_list};
use crate::error::{HearthError, HearthResult};
use crate::models::{DateWindow, SubcategoryKey, TransactionKind};
use crate::services::{CreateTransactionInput, TransactionService, TransactionUpdate};
use crate::storage::Storage;

/// Transaction subcommands
#[derive(Subcommand)]
pub enum TransactionCommands {
    /// Add a new transaction
    Add {
        /// income or expense
        kind: String,
        /// Amount in whole units (e.g. "17000" or "17.000")
        amount: String,
        /// Category of an expense
        #[arg(short, long)]
        category: Option<String>,
        /// Subcategory of an expense
        #[arg(short, long)]
        subcategory: Option<String>,
        /// Transaction date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
        /// Free-text description
        #[arg(short = 'm', long)]
        description: Option<String>,
    },
    /// List transactions
    List {
        /// Only this month (YYYY-MM)
        #[arg(long, conflicts_with_all = ["from", "to"])]
        month: Option<String>,
        /// Start date (YYYY-MM-DD)
        #[arg(long, requires = "to")]
        from: Option<String>,
        /// End date (YYYY-MM-DD)
        #[arg(long, requires = "from")]
        to: Option<String>,
        /// Show only the most recent N transactions
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Show transaction details
    Show {
        /// Transaction ID (full or short)
        id: String,
    },
    /// Edit a transaction
    Edit {
        /// Transaction ID (full or short)
        id: String,
        /// New kind (income or expense)
        #[arg(short, long)]
        kind: Option<String>,
        /// New amount
        #[arg(short, long)]
        amount: Option<String>,
        /// New date
        #[arg(short, long)]
        date: Option<String>,
        /// New description
        #[arg(short = 'm', long)]
        description: Option<String>,
        /// New category (together with --subcategory)
        #[arg(short, long, requires = "subcategory")]
        category: Option<String>,
        /// New subcategory (together with --category)
        #[arg(short, long, requires = "category")]
        subcategory: Option<String>,
    },
    /// Delete a transaction
    Delete {
        /// Transaction ID (full or short)
        id: String,
    },
}

fn parse_kind(s: &str) -> HearthResult<TransactionKind> {
    s.parse()
        .map_err(|e: crate::models::TransactionValidationError| HearthError::Validation(e.to_string()))
}

fn optional_key(category: Option<String>, subcategory: Option<String>) -> HearthResult<Option<SubcategoryKey>> {
    match (category, subcategory) {
        (Some(c), Some(s)) => subcategory_key(&c, &s).map(Some),
        (None, None) => Ok(None),
        _ => Err(HearthError::Validation(
            "Give both --category and --subcategory".into(),
        )),
    }
}

/// Handle a transaction command
pub fn handle_transaction_command(
    storage: &Storage,
    settings: &Settings,
    cmd: TransactionCommands,
) -> HearthResult<()> {
    let service = TransactionService::new(storage);

    match cmd {
        TransactionCommands::Add {
            kind,
            amount,
            category,
            subcategory,
            date,
            description,
        } => {
            let input = CreateTransactionInput {
                kind: parse_kind(&kind)?,
                date: match date {
                    Some(d) => parse_date(&d)?,
                    None => Local::now().date_naive(),
                },
                amount: parse_amount(&amount, settings)?,
                description,
                key: optional_key(category, subcategory)?,
            };

            let txn = service.create(input)?;
            println!("Created transaction: {}", txn.id);
            print!("{}", format_transaction_details(&txn, settings));
        }

        TransactionCommands::List {
            month,
            from,
            to,
            limit,
        } => {
            let window = match (month, from, to) {
                (Some(m), _, _) => Some(DateWindow::month(parse_month(&m)?)),
                (None, Some(f), Some(t)) => Some(
                    DateWindow::from_dates(parse_date(&f)?, parse_date(&t)?)
                        .map_err(|e| HearthError::Validation(e.to_string()))?,
                ),
                _ => None,
            };

            let mut transactions = service.list(window.as_ref())?;
            if let Some(limit) = limit {
                let skip = transactions.len().saturating_sub(limit);
                transactions.drain(..skip);
            }
            print!("{}", format_transaction_list(&transactions, settings));
        }

        TransactionCommands::Show { id } => {
            let txn = service
                .find(&id)?
                .ok_or_else(|| HearthError::transaction_not_found(&id))?;
            print!("{}", format_transaction_details(&txn, settings));
        }

        TransactionCommands::Edit {
            id,
            kind,
            amount,
            date,
            description,
            category,
            subcategory,
        } => {
            let update = TransactionUpdate {
                kind: kind.as_deref().map(parse_kind).transpose()?,
                date: date.as_deref().map(parse_date).transpose()?,
                amount: amount.as_deref().map(|a| parse_amount(a, settings)).transpose()?,
                description,
                key: optional_key(category, subcategory)?,
            };

            let txn = service.update(&id, update)?;
            println!("Updated transaction: {}", txn.id);
            print!("{}", format_transaction_details(&txn, settings));
        }

        TransactionCommands::Delete { id } => {
            let txn = service.delete(&id)?;
            println!("Deleted transaction: {}", txn.id);
        }
    }

    Ok(())
}
