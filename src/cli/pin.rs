//! PIN gate commands
//!
//! `pin set` and `pin clear` manage the 4-digit lock. Every data command
//! goes through [`require_unlocked`] first.

use clap::Subcommand;

use crate::config::{HearthPaths, Settings};
use crate::crypto::{hash_pin, unlock, validate_pin, SecureString};
use crate::error::{HearthError, HearthResult};

/// PIN subcommands
#[derive(Subcommand)]
pub enum PinCommands {
    /// Set or change the PIN
    Set {
        /// New PIN; prompted for when omitted
        #[arg(long)]
        new: Option<String>,
    },
    /// Remove the PIN
    Clear,
    /// Show whether a PIN is set
    Status,
}

fn prompt_pin(prompt: &str) -> HearthResult<SecureString> {
    rpassword::prompt_password(prompt)
        .map(SecureString::new)
        .map_err(|e| HearthError::Io(format!("Failed to read PIN: {}", e)))
}

/// Open the gate with `entered`, prompting when a PIN is set and none was given
pub fn require_unlocked(settings: &Settings, entered: Option<&str>) -> HearthResult<()> {
    let Some(hash) = settings.pin_hash.as_deref() else {
        return Ok(());
    };

    match entered {
        Some(pin) => unlock(Some(hash), Some(pin)),
        None => {
            let pin = prompt_pin("PIN: ")?;
            unlock(Some(hash), Some(pin.as_str()))
        }
    }
}

fn prompt_new_pin() -> HearthResult<SecureString> {
    let first = prompt_pin("New PIN: ")?;
    validate_pin(first.as_str())?;
    let second = prompt_pin("Confirm PIN: ")?;
    if first.as_str() != second.as_str() {
        return Err(HearthError::Validation("PINs do not match".into()));
    }
    Ok(first)
}

/// Handle a PIN command; the caller has already passed the gate
pub fn handle_pin_command(paths: &HearthPaths, settings: &mut Settings, cmd: PinCommands) -> HearthResult<()> {
    match cmd {
        PinCommands::Set { new } => {
            let pin = match new {
                Some(pin) => SecureString::new(pin),
                None => prompt_new_pin()?,
            };
            settings.pin_hash = Some(hash_pin(pin.as_str())?);
            settings.save(paths)?;
            tracing::info!("PIN set");
            println!("PIN set.");
        }
        PinCommands::Clear => {
            settings.pin_hash = None;
            settings.save(paths)?;
            tracing::info!("PIN cleared");
            println!("PIN cleared.");
        }
        PinCommands::Status => {
            println!("PIN: {}", if settings.has_pin() { "set" } else { "not set" });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_open_without_pin() {
        assert!(require_unlocked(&Settings::default(), None).is_ok());
    }

    #[test]
    fn test_gate_with_pin() {
        let mut settings = Settings::default();
        settings.pin_hash = Some(hash_pin("0420").unwrap());

        assert!(require_unlocked(&settings, Some("0420")).is_ok());
        assert!(matches!(
            require_unlocked(&settings, Some("1111")).unwrap_err(),
            HearthError::Locked(_)
        ));
    }
}
