//! Record CLI commands

use clap::Subcommand;

use super::parse_amount;
use crate::config::Settings;
use crate::display::record::{format_record_details, format_record_list};
use crate::error::{HearthError, HearthResult};
use crate::services::RecordService;
use crate::storage::Storage;

/// Record subcommands
#[derive(Subcommand)]
pub enum RecordCommands {
    /// List all records
    List,

    /// Show a record with its entries
    Show {
        /// Record name or ID
        record: String,
    },

    /// Create an empty record
    Create {
        /// Record name
        name: String,
    },

    /// Append an entry to a record
    Add {
        /// Record name or ID
        record: String,
        /// Entry description
        description: String,
        /// Amount in whole units
        amount: String,
    },

    /// Remove an entry by its index in `record show`
    Remove {
        /// Record name or ID
        record: String,
        index: usize,
    },

    /// Rename a record
    Rename {
        /// Record name or ID
        record: String,
        /// New name
        name: String,
    },

    /// Delete a record with all its entries
    Delete {
        /// Record name or ID
        record: String,
    },
}

/// Handle a record command
pub fn handle_record_command(storage: &Storage, settings: &Settings, cmd: RecordCommands) -> HearthResult<()> {
    let service = RecordService::new(storage);

    match cmd {
        RecordCommands::List => {
            let records = service.list()?;
            print!("{}", format_record_list(&records, settings));
        }

        RecordCommands::Show { record } => {
            let found = service
                .find(&record)?
                .ok_or_else(|| HearthError::record_not_found(&record))?;
            print!("{}", format_record_details(&found, settings));
        }

        RecordCommands::Create { name } => {
            let record = service.create(&name)?;
            println!("Created record: {}", record.name);
            println!("  ID: {}", record.id);
        }

        RecordCommands::Add {
            record,
            description,
            amount,
        } => {
            let amount = parse_amount(&amount, settings)?;
            let updated = service.add_entry(&record, &description, amount)?;
            print!("{}", format_record_details(&updated, settings));
        }

        RecordCommands::Remove { record, index } => {
            let updated = service.remove_entry(&record, index)?;
            print!("{}", format_record_details(&updated, settings));
        }

        RecordCommands::Rename { record, name } => {
            let updated = service.rename(&record, &name)?;
            println!("Renamed record to: {}", updated.name);
        }

        RecordCommands::Delete { record } => {
            let deleted = service.delete(&record)?;
            println!("Deleted record: {}", deleted.name);
        }
    }

    Ok(())
}
