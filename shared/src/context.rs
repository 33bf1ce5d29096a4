//! Client state injected into the UI instead of looked up globally.

use crate::session::Session;
use crate::storage::KeyValueStorage;
use crate::tasks::TaskList;
use crate::widgets::ThemePreference;

/// Session and theme restored from one durable storage handle.
#[derive(Debug, Clone)]
pub struct ClientContext<K> {
    pub session: Session<K>,
    pub theme: ThemePreference<K>,
}

impl<K: KeyValueStorage + Clone> ClientContext<K> {
    pub fn restore(storage: K) -> Self {
        Self {
            session: Session::restore(storage.clone()),
            theme: ThemePreference::restore(storage),
        }
    }

    /// Signs out and drops the task list back to the logged-out view.
    pub fn logout(&mut self, tasks: &mut TaskList) {
        self.session.sign_out();
        tasks.clear();
    }
}
