//! Who is signed in on this client.
//!
//! # Invariants
//! - The stored user never carries a password.
//! - `currentUser` and `isLoggedIn` are written and cleared together.

use log::{info, warn};

use crate::api::ApiGateway;
use crate::error::TrackerResult;
use crate::model::{NewUser, RecordId, User};
use crate::storage::{KeyValueStorage, CURRENT_USER_KEY, LOGGED_IN_KEY};
use crate::store::RecordStore;

#[derive(Debug, Clone)]
pub struct Session<K> {
    storage: K,
    user: Option<User>,
    logged_in: bool,
}

impl<K: KeyValueStorage> Session<K> {
    /// Rehydrates the session persisted by a previous page load.
    ///
    /// An unreadable `currentUser` entry is logged and treated as signed out.
    pub fn restore(storage: K) -> Self {
        let user = storage
            .get(CURRENT_USER_KEY)
            .and_then(|raw| match serde_json::from_str::<User>(&raw) {
                Ok(user) => Some(user),
                Err(err) => {
                    warn!("event=session_restore module=session status=error error={err}");
                    None
                }
            });
        let logged_in = storage.get(LOGGED_IN_KEY).as_deref() == Some("true");

        Self {
            storage,
            user,
            logged_in,
        }
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn user_id(&self) -> Option<RecordId> {
        self.user.as_ref().map(|user| user.id)
    }

    /// Whether a user record is present. Task writes require this.
    pub fn is_active(&self) -> bool {
        self.user.is_some()
    }

    /// The persisted logged-in marker. Plan selection checks this one.
    pub fn is_logged_in(&self) -> bool {
        self.logged_in
    }

    pub fn display_name(&self) -> &str {
        self.user
            .as_ref()
            .map(|user| user.first_name.as_str())
            .filter(|name| !name.is_empty())
            .unwrap_or("User")
    }

    pub fn sign_in(&mut self, user: User) {
        match serde_json::to_string(&user) {
            Ok(raw) => {
                self.storage.set(CURRENT_USER_KEY, &raw);
                self.storage.set(LOGGED_IN_KEY, "true");
            }
            Err(err) => warn!("event=session_persist module=session status=error error={err}"),
        }
        self.user = Some(user);
        self.logged_in = true;
    }

    pub fn sign_out(&mut self) {
        self.storage.remove(CURRENT_USER_KEY);
        self.storage.remove(LOGGED_IN_KEY);
        self.user = None;
        self.logged_in = false;
        info!("event=logout module=session status=ok");
    }

    /// Logs in through the gateway and persists the session on success.
    pub async fn login<S: RecordStore>(
        &mut self,
        api: &ApiGateway<S>,
        email: &str,
        password: &str,
    ) -> TrackerResult<User> {
        let user = api.login(email, password).await?;
        self.sign_in(user.clone());
        Ok(user)
    }

    /// Creates the account and signs it in.
    pub async fn signup<S: RecordStore>(
        &mut self,
        api: &ApiGateway<S>,
        new_user: &NewUser,
    ) -> TrackerResult<User> {
        let user = api.create_user(new_user).await?;
        self.sign_in(user.clone());
        Ok(user)
    }
}
