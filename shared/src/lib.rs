//! Domain core of the student task tracker.
//!
//! Shared by the WebAssembly frontend and the record store server: the
//! records both sides exchange, the gateway over the store, session state,
//! the task list engine and the state of the site's widgets.

pub mod api;
pub mod config;
pub mod context;
pub mod error;
pub mod model;
pub mod session;
pub mod storage;
pub mod store;
pub mod tasks;
pub mod validation;
pub mod widgets;

pub use api::ApiGateway;
pub use config::ClientConfig;
pub use context::ClientContext;
pub use error::{TrackerError, TrackerResult, ValidationError};
pub use model::{
    Category, Feature, NewUser, Priority, RecordId, Task, TaskDraft, TeamMember, User, UserRecord,
};
pub use session::Session;
pub use storage::{KeyValueStorage, MemoryStorage};
pub use store::{matches_filters, Collection, MemoryStore, RecordStore};
pub use tasks::{
    Confirm, Progress, TaskFilter, TaskForm, TaskList, TaskView, TaskWrite, TaskWriteOutcome,
};
