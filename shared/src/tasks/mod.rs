//! Task list engine.
//!
//! # Responsibility
//! - Own the signed-in user's tasks and the current edit target.
//! - Turn user intents (submit, toggle, remove, edit) into store writes and
//!   fold the store's answers back into the list.
//! - Project the list for rendering (`view`) and summarize it (`progress`).
//!
//! # Invariants
//! - The in-memory list only ever takes records returned by the store.
//! - A failed write leaves the list and the edit target untouched.
//! - Writes are split into plan / execute / apply so a UI can run the
//!   network call without holding the list borrowed.
//!
//! Overlapping writes to the same task are not coordinated: whichever
//! response is applied last wins.

mod progress;
mod view;

pub use progress::Progress;
pub use view::{deadline_then_priority, TaskFilter, TaskView};

use chrono::{DateTime, Days, NaiveDate, Utc};
use log::{debug, info, warn};

use crate::api::ApiGateway;
use crate::error::{TrackerError, TrackerResult, ValidationError};
use crate::model::{Category, Priority, RecordId, Task, TaskDraft};
use crate::session::Session;
use crate::storage::KeyValueStorage;
use crate::store::RecordStore;

pub const DELETE_PROMPT: &str = "Are you sure you want to delete this task?";

/// Asks the user to confirm a destructive action.
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// Values of the add/edit task form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskForm {
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub deadline: Option<NaiveDate>,
    pub category: Category,
}

impl TaskForm {
    pub fn from_task(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone().unwrap_or_default(),
            priority: task.priority,
            deadline: task.deadline,
            category: task.category,
        }
    }

    /// Trims the text fields and builds a fresh, not-yet-completed draft.
    pub fn into_draft(
        self,
        user_id: Option<RecordId>,
        now: DateTime<Utc>,
    ) -> Result<TaskDraft, ValidationError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        let description = self.description.trim();

        Ok(TaskDraft {
            user_id,
            title: title.to_string(),
            description: (!description.is_empty()).then(|| description.to_string()),
            priority: self.priority,
            deadline: self.deadline,
            category: self.category,
            completed: false,
            created_at: now,
        })
    }
}

/// A store write waiting to be executed.
#[derive(Debug, Clone, PartialEq)]
pub enum TaskWrite {
    Create(TaskDraft),
    Update {
        id: RecordId,
        draft: TaskDraft,
        /// Set when the update comes from the edit form, so applying it
        /// clears the edit target.
        from_edit: bool,
    },
    Delete(RecordId),
}

impl TaskWrite {
    pub async fn execute<S: RecordStore>(self, api: &ApiGateway<S>) -> TrackerResult<TaskWriteOutcome> {
        match self {
            TaskWrite::Create(draft) => api.create_task(&draft).await.map(TaskWriteOutcome::Created),
            TaskWrite::Update {
                id,
                draft,
                from_edit,
            } => {
                let task = api.update_task(id, &draft).await?;
                Ok(TaskWriteOutcome::Updated { task, from_edit })
            }
            TaskWrite::Delete(id) => {
                api.delete_task(id).await?;
                Ok(TaskWriteOutcome::Deleted(id))
            }
        }
    }
}

/// A write the store has confirmed.
#[derive(Debug, Clone, PartialEq)]
pub enum TaskWriteOutcome {
    Created(Task),
    Updated { task: Task, from_edit: bool },
    Deleted(RecordId),
}

#[derive(Debug, Clone, Default)]
pub struct TaskList {
    tasks: Vec<Task>,
    editing: Option<RecordId>,
}

impl TaskList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        Self {
            tasks,
            editing: None,
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: RecordId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    /// Id of the task loaded into the edit form, if any.
    pub fn editing(&self) -> Option<RecordId> {
        self.editing
    }

    /// Loads the session user's tasks (every task when signed out),
    /// seeding samples when the store has none.
    pub async fn load<S: RecordStore, K: KeyValueStorage>(
        &mut self,
        api: &ApiGateway<S>,
        session: &Session<K>,
    ) {
        let tasks = Self::fetch_or_seed(api, session.user_id(), Utc::now()).await;
        self.replace_all(tasks);
    }

    /// Fetches tasks for `user_id`; an empty result is replaced by sample
    /// tasks created through the store.
    pub async fn fetch_or_seed<S: RecordStore>(
        api: &ApiGateway<S>,
        user_id: Option<RecordId>,
        now: DateTime<Utc>,
    ) -> Vec<Task> {
        let tasks = api.list_tasks(user_id).await;
        if !tasks.is_empty() {
            return tasks;
        }

        let mut created = Vec::new();
        for draft in sample_drafts(now) {
            match api.create_task(&draft).await {
                Ok(task) => created.push(task),
                Err(err) => warn!("event=sample_seed module=tasks status=error error={err}"),
            }
        }
        info!("event=sample_seed module=tasks status=ok count={}", created.len());
        created
    }

    pub fn replace_all(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks;
        self.editing = None;
    }

    /// Logged-out view: no tasks, nothing being edited.
    pub fn clear(&mut self) {
        self.replace_all(Vec::new());
    }

    /// Validates the form against the session and decides between create
    /// and update.
    ///
    /// # Errors
    /// - `TrackerError::AuthRequired` without a signed-in user.
    /// - `TrackerError::Validation(EmptyTitle)` for a blank title.
    pub fn plan_submit<K: KeyValueStorage>(
        &self,
        session: &Session<K>,
        form: TaskForm,
    ) -> TrackerResult<TaskWrite> {
        let user_id = session.user_id().ok_or(TrackerError::AuthRequired)?;
        let draft = form.into_draft(Some(user_id), Utc::now())?;
        Ok(match self.editing {
            Some(id) => TaskWrite::Update {
                id,
                draft,
                from_edit: true,
            },
            None => TaskWrite::Create(draft),
        })
    }

    /// Full-replace update flipping `completed`; `None` for unknown ids.
    pub fn plan_toggle(&self, id: RecordId) -> Option<TaskWrite> {
        let task = self.get(id)?;
        let mut draft = task.to_draft();
        draft.completed = !draft.completed;
        Some(TaskWrite::Update {
            id,
            draft,
            from_edit: false,
        })
    }

    /// Asks `confirm` first; `None` when the user declines.
    pub fn plan_remove(&self, id: RecordId, confirm: &impl Confirm) -> Option<TaskWrite> {
        if !confirm.confirm(DELETE_PROMPT) {
            debug!("event=task_delete module=tasks status=declined id={id}");
            return None;
        }
        Some(TaskWrite::Delete(id))
    }

    /// Folds a confirmed write into the list and returns the affected task.
    pub fn apply(&mut self, outcome: TaskWriteOutcome) -> Option<&Task> {
        match outcome {
            TaskWriteOutcome::Created(task) => {
                self.tasks.push(task);
                self.tasks.last()
            }
            TaskWriteOutcome::Updated { task, from_edit } => {
                if from_edit && self.editing == Some(task.id) {
                    self.editing = None;
                }
                let slot = self.tasks.iter_mut().find(|existing| existing.id == task.id)?;
                *slot = task;
                Some(&*slot)
            }
            TaskWriteOutcome::Deleted(id) => {
                self.tasks.retain(|task| task.id != id);
                if self.editing == Some(id) {
                    self.editing = None;
                }
                None
            }
        }
    }

    /// Creates a task, or updates the edit target, from the form.
    pub async fn submit<S: RecordStore, K: KeyValueStorage>(
        &mut self,
        api: &ApiGateway<S>,
        session: &Session<K>,
        form: TaskForm,
    ) -> TrackerResult<Task> {
        let write = self.plan_submit(session, form)?;
        let outcome = write.execute(api).await?;
        let saved = match &outcome {
            TaskWriteOutcome::Created(task) | TaskWriteOutcome::Updated { task, .. } => {
                Some(task.clone())
            }
            TaskWriteOutcome::Deleted(_) => None,
        };
        self.apply(outcome);
        saved.ok_or(TrackerError::NotFound { entity: "task" })
    }

    /// Flips completion; returns the store's version, `None` for unknown ids.
    pub async fn toggle_complete<S: RecordStore>(
        &mut self,
        api: &ApiGateway<S>,
        id: RecordId,
    ) -> TrackerResult<Option<Task>> {
        let Some(write) = self.plan_toggle(id) else {
            return Ok(None);
        };
        let outcome = write.execute(api).await?;
        Ok(self.apply(outcome).cloned())
    }

    /// Deletes after confirmation. `Ok(false)` when the user declined.
    pub async fn remove<S: RecordStore>(
        &mut self,
        api: &ApiGateway<S>,
        id: RecordId,
        confirm: &impl Confirm,
    ) -> TrackerResult<bool> {
        let Some(write) = self.plan_remove(id, confirm) else {
            return Ok(false);
        };
        let outcome = write.execute(api).await?;
        self.apply(outcome);
        Ok(true)
    }

    /// Marks `id` as the edit target and returns its values for the form.
    pub fn edit(&mut self, id: RecordId) -> Option<TaskForm> {
        let form = TaskForm::from_task(self.get(id)?);
        self.editing = Some(id);
        Some(form)
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    pub fn view(&self, filter: TaskFilter, search: &str) -> TaskView<'_> {
        TaskView::project(&self.tasks, filter, search)
    }

    pub fn progress(&self) -> Progress {
        Progress::from_tasks(&self.tasks)
    }
}

/// First-run tasks. They carry no owner so every visitor sees them.
pub fn sample_drafts(now: DateTime<Utc>) -> [TaskDraft; 3] {
    let today = now.date_naive();
    let sample = |title: &str, description: &str, priority, days, completed| TaskDraft {
        user_id: None,
        title: title.to_string(),
        description: Some(description.to_string()),
        priority,
        deadline: today.checked_add_days(Days::new(days)),
        category: Category::Academic,
        completed,
        created_at: now,
    };

    [
        sample(
            "Complete Math Assignment",
            "Finish calculus problems 1-20 from chapter 5",
            Priority::High,
            1,
            true,
        ),
        sample(
            "Study for Physics Exam",
            "Review chapters 1-3 on thermodynamics",
            Priority::High,
            3,
            false,
        ),
        sample(
            "Submit Research Paper",
            "Finalize and submit literature review paper",
            Priority::Medium,
            7,
            false,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_trims_and_drops_blank_description() {
        let form = TaskForm {
            title: "  Lab report ".to_string(),
            description: "   ".to_string(),
            ..TaskForm::default()
        };
        let draft = form.into_draft(None, Utc::now()).unwrap();
        assert_eq!(draft.title, "Lab report");
        assert_eq!(draft.description, None);
        assert!(!draft.completed);
        assert_eq!(draft.priority, Priority::Medium);
        assert_eq!(draft.category, Category::Academic);
    }

    #[test]
    fn whitespace_title_is_rejected() {
        let form = TaskForm {
            title: " \t ".to_string(),
            ..TaskForm::default()
        };
        assert_eq!(
            form.into_draft(None, Utc::now()),
            Err(ValidationError::EmptyTitle)
        );
    }

    #[test]
    fn samples_are_anonymous_and_dated_from_today() {
        let now = DateTime::parse_from_rfc3339("2024-06-01T09:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let [math, physics, paper] = sample_drafts(now);

        assert!(math.completed);
        assert_eq!(math.deadline, NaiveDate::from_ymd_opt(2024, 6, 2));
        assert_eq!(physics.deadline, NaiveDate::from_ymd_opt(2024, 6, 4));
        assert_eq!(paper.deadline, NaiveDate::from_ymd_opt(2024, 6, 8));
        assert_eq!(paper.priority, Priority::Medium);
        assert!([math, physics, paper].iter().all(|draft| draft.user_id.is_none()));
    }
}
