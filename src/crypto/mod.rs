//! PIN hashing and sensitive-input handling
//!
//! Argon2 hashes the 4-digit PIN; entered digits live in a zeroizing string.

pub mod pin;
pub mod secure_memory;

pub use pin::{hash_pin, unlock, validate_pin, verify_pin, PIN_LENGTH};
pub use secure_memory::SecureString;
