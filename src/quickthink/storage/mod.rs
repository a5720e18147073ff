//! # Durable Client State
//!
//! QuickThink keeps a tiny amount of state on the client: the deck the user last
//! opened and the auth session. Both are single string values under fixed keys,
//! so storage is modeled as a key/value map rather than a document store.
//!
//! ## Implementations
//!
//! - [`fs::FileStorage`]: one `{key}.json` file per key inside the data directory.
//!   Writes go through a temporary file and a rename, so a reader sees either the
//!   old value or the new one.
//! - [`memory::MemoryStorage`]: shared in-memory map for tests. Clones share the
//!   same entries, which lets a test "reload" by opening a second store over a
//!   clone.
//!
//! There is a single writer per process and values are last-writer-wins.
//! Concurrent processes are not reconciled.

use crate::error::{QuickThinkError, Result};

pub mod fs;
pub mod memory;

pub trait KeyValueStorage {
    /// Read the raw value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value stored under `key`.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`. Removing a missing key is not an error.
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// Keys double as file names, so only a conservative character set is allowed.
pub(crate) fn validate_key(key: &str) -> Result<()> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(QuickThinkError::Store(format!("Invalid storage key: {:?}", key)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_keys() {
        assert!(validate_key("selectedDeck").is_ok());
        assert!(validate_key("session_v2-a").is_ok());
    }

    #[test]
    fn rejects_path_like_keys() {
        assert!(validate_key("").is_err());
        assert!(validate_key("../escape").is_err());
        assert!(validate_key("a/b").is_err());
    }
}
