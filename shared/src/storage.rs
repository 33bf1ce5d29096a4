//! Durable client key/value storage.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

pub const CURRENT_USER_KEY: &str = "currentUser";
pub const LOGGED_IN_KEY: &str = "isLoggedIn";
pub const THEME_KEY: &str = "theme";

/// Synchronous string storage local to one client, e.g. `localStorage`.
///
/// Handles are cheap to clone and all clones see the same entries.
/// Write failures are the implementation's to log; callers treat storage
/// as best effort.
pub trait KeyValueStorage {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }
}
