//! Secure memory handling for sensitive data
//!
//! PIN input is held in a string that is zeroed when dropped.

use std::fmt;
use std::ops::Deref;

use zeroize::{Zeroize, ZeroizeOnDrop};

/// A string type that zeros its contents on drop
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct SecureString {
    inner: String,
}

impl SecureString {
    pub fn new(s: impl Into<String>) -> Self {
        Self { inner: s.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.inner
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Append a character (PIN pad input)
    pub fn push(&mut self, c: char) {
        self.inner.push(c);
    }

    /// Remove the last character
    pub fn pop(&mut self) -> Option<char> {
        self.inner.pop()
    }

    /// Wipe the contents in place
    pub fn clear(&mut self) {
        self.inner.zeroize();
    }
}

impl Default for SecureString {
    fn default() -> Self {
        Self::new(String::new())
    }
}

impl Clone for SecureString {
    fn clone(&self) -> Self {
        Self::new(self.inner.clone())
    }
}

impl PartialEq for SecureString {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl Eq for SecureString {}

impl Deref for SecureString {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl From<String> for SecureString {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for SecureString {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl fmt::Debug for SecureString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecureString([REDACTED])")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts() {
        let s = SecureString::new("1234");
        assert!(!format!("{:?}", s).contains("1234"));
    }

    #[test]
    fn test_push_pop_clear() {
        let mut s = SecureString::default();
        s.push('1');
        s.push('2');
        assert_eq!(s.as_str(), "12");
        assert_eq!(s.pop(), Some('2'));
        s.clear();
        assert!(s.is_empty());
    }
}
