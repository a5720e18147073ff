use super::{validate_key, KeyValueStorage};
use crate::error::{QuickThinkError, Result};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

/// In-memory storage for testing. Does NOT persist data.
///
/// Clones share entries, so two stores opened over clones of the same
/// `MemoryStorage` behave like two runs over the same data directory.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Rc<RefCell<HashMap<String, String>>>,
    simulate_write_error: Rc<Cell<bool>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write a raw value directly, bypassing any serialization by the caller.
    pub fn insert_raw(&self, key: &str, value: &str) {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.borrow().contains_key(key)
    }

    /// Make `set` and `remove` fail, on this store and all its clones.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.simulate_write_error.set(simulate);
    }

    fn check_writable(&self) -> Result<()> {
        if self.simulate_write_error.get() {
            return Err(QuickThinkError::Store("Simulated write error".to_string()));
        }
        Ok(())
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        validate_key(key)?;
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        validate_key(key)?;
        self.check_writable()?;
        self.insert_raw(key, value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        validate_key(key)?;
        self.check_writable()?;
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_entries() {
        let mut a = MemoryStorage::new();
        let b = a.clone();

        a.set("k", "v").unwrap();
        assert_eq!(b.get("k").unwrap().as_deref(), Some("v"));

        a.remove("k").unwrap();
        assert!(!b.contains("k"));
    }

    #[test]
    fn simulated_write_error_keeps_entries() {
        let mut a = MemoryStorage::new();
        a.set("k", "v").unwrap();
        a.clone().set_simulate_write_error(true);

        assert!(a.set("k", "w").is_err());
        assert!(a.remove("k").is_err());
        assert_eq!(a.get("k").unwrap().as_deref(), Some("v"));
    }
}
