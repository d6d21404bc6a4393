//! PIN gate
//!
//! A 4-digit screen lock checked before any data operation. The code is
//! stored as an Argon2 PHC string in the settings file. This is a lock
//! screen, not an access-control system: the data files stay readable.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::error::{HearthError, HearthResult};

/// Number of digits in a PIN
pub const PIN_LENGTH: usize = 4;

/// Check that `pin` is exactly four ASCII digits
pub fn validate_pin(pin: &str) -> HearthResult<()> {
    if pin.len() != PIN_LENGTH || !pin.chars().all(|c| c.is_ascii_digit()) {
        return Err(HearthError::Validation(format!(
            "PIN must be exactly {} digits",
            PIN_LENGTH
        )));
    }
    Ok(())
}

/// Hash a PIN for storage
pub fn hash_pin(pin: &str) -> HearthResult<String> {
    validate_pin(pin)?;
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(pin.as_bytes(), &salt)
        .map_err(|e| HearthError::Config(format!("Failed to hash PIN: {}", e)))?;
    Ok(hash.to_string())
}

/// Compare an entered PIN against the stored hash
pub fn verify_pin(pin: &str, stored_hash: &str) -> HearthResult<bool> {
    if validate_pin(pin).is_err() {
        return Ok(false);
    }
    let parsed = PasswordHash::new(stored_hash)
        .map_err(|e| HearthError::Config(format!("Stored PIN hash is invalid: {}", e)))?;
    Ok(Argon2::default()
        .verify_password(pin.as_bytes(), &parsed)
        .is_ok())
}

/// Open the gate or fail with [`HearthError::Locked`]
///
/// With no PIN configured the gate is always open.
pub fn unlock(stored_hash: Option<&str>, entered: Option<&str>) -> HearthResult<()> {
    let Some(hash) = stored_hash else {
        return Ok(());
    };
    let Some(pin) = entered else {
        return Err(HearthError::Locked("PIN required".into()));
    };
    if verify_pin(pin, hash)? {
        Ok(())
    } else {
        Err(HearthError::Locked("Incorrect PIN".into()))
    }
}
