//! Domain calls over the record store.
//!
//! # Responsibility
//! - Translate login, signup and task CRUD into record store requests.
//! - Apply the failure policy: reads degrade to an empty list, writes
//!   propagate their error to the caller.
//!
//! # Invariants
//! - Users leave this module without a password.
//! - No call is retried.

use log::{info, warn};

use crate::error::{TrackerError, TrackerResult};
use crate::model::{Feature, NewUser, RecordId, Task, TaskDraft, TeamMember, User, UserRecord};
use crate::store::{Collection, Filter, RecordStore};

#[derive(Debug, Clone)]
pub struct ApiGateway<S> {
    store: S,
}

impl<S: RecordStore> ApiGateway<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Looks up the user whose email and password both match exactly.
    ///
    /// The password travels as a plaintext query filter, as the demo store
    /// expects. Do not point this at a store holding real credentials.
    ///
    /// # Errors
    /// - `TrackerError::NotFound` when nothing matches.
    /// - Transport errors propagate unchanged.
    pub async fn login(&self, email: &str, password: &str) -> TrackerResult<User> {
        let filters = [("email", email.to_string()), ("password", password.to_string())];
        let matches: Vec<UserRecord> = self.store.query(Collection::Users, &filters).await?;
        match matches.into_iter().next() {
            Some(record) => {
                info!("event=login module=api status=ok");
                Ok(record.into_public())
            }
            None => {
                info!("event=login module=api status=no_match");
                Err(TrackerError::NotFound { entity: "user" })
            }
        }
    }

    /// Creates a user unless one with the same email exists.
    ///
    /// # Errors
    /// - `TrackerError::Conflict` on a duplicate email.
    /// - Transport errors propagate unchanged.
    pub async fn create_user(&self, new_user: &NewUser) -> TrackerResult<User> {
        let filters = [("email", new_user.email.clone())];
        let existing: Vec<UserRecord> = self.store.query(Collection::Users, &filters).await?;
        if !existing.is_empty() {
            warn!("event=signup module=api status=conflict");
            return Err(TrackerError::Conflict {
                email: new_user.email.clone(),
            });
        }

        let created: UserRecord = self.store.insert(Collection::Users, new_user).await?;
        info!("event=signup module=api status=ok");
        Ok(created.into_public())
    }

    /// Tasks owned by `user_id`, or every task when `None`.
    ///
    /// Failures are logged and read as an empty collection, so callers see
    /// no difference between "no tasks" and "fetch failed".
    pub async fn list_tasks(&self, user_id: Option<RecordId>) -> Vec<Task> {
        let filters: Vec<Filter<'_>> = user_id
            .map(|id| ("userId", id.to_string()))
            .into_iter()
            .collect();
        self.soft_read(Collection::Tasks, &filters).await
    }

    pub async fn create_task(&self, draft: &TaskDraft) -> TrackerResult<Task> {
        self.store
            .insert(Collection::Tasks, draft)
            .await
            .inspect_err(|err| warn!("event=task_create module=api status=error error={err}"))
    }

    /// Replaces every field of task `id` with `draft`.
    pub async fn update_task(&self, id: RecordId, draft: &TaskDraft) -> TrackerResult<Task> {
        self.store
            .replace(Collection::Tasks, id, draft)
            .await
            .inspect_err(|err| warn!("event=task_update module=api status=error id={id} error={err}"))
    }

    /// Returns `true` once the store confirms the delete.
    pub async fn delete_task(&self, id: RecordId) -> TrackerResult<bool> {
        self.store
            .remove(Collection::Tasks, id)
            .await
            .inspect_err(|err| warn!("event=task_delete module=api status=error id={id} error={err}"))?;
        Ok(true)
    }

    pub async fn list_features(&self) -> Vec<Feature> {
        self.soft_read(Collection::Features, &[]).await
    }

    pub async fn list_team(&self) -> Vec<TeamMember> {
        self.soft_read(Collection::Team, &[]).await
    }

    /// Decodes each record on its own; unreadable records are logged and skipped.
    async fn soft_read<T: serde::de::DeserializeOwned>(
        &self,
        collection: Collection,
        filters: &[Filter<'_>],
    ) -> Vec<T> {
        let records: Vec<serde_json::Value> = match self.store.query(collection, filters).await {
            Ok(records) => records,
            Err(err) => {
                warn!("event=fetch module=api status=degraded collection={collection} error={err}");
                return Vec::new();
            }
        };
        records
            .into_iter()
            .filter_map(|record| {
                serde_json::from_value(record)
                    .inspect_err(|err| {
                        warn!("event=fetch module=api status=skipped collection={collection} error={err}")
                    })
                    .ok()
            })
            .collect()
    }
}
