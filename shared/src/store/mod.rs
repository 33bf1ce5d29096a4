//! Record store transport.
//!
//! # Responsibility
//! - Describe the REST surface of the record store as a trait so the
//!   gateway can run over `fetch` in the browser or memory in tests.
//! - Own the query-by-field matching rule shared by every store flavour.
//!
//! # Invariants
//! - Identifiers are minted by the store on insert, never by callers.
//! - A query filter matches only when the field exists and its JSON text
//!   equals the filter value exactly.

mod memory;

pub use memory::MemoryStore;

use std::fmt;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::TrackerResult;
use crate::model::RecordId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Users,
    Tasks,
    Features,
    Team,
}

impl Collection {
    pub const ALL: [Collection; 4] = [
        Collection::Users,
        Collection::Tasks,
        Collection::Features,
        Collection::Team,
    ];

    /// Path segment under the store root.
    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Users => "users",
            Collection::Tasks => "tasks",
            Collection::Features => "features",
            Collection::Team => "team",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Collection::ALL
            .into_iter()
            .find(|collection| collection.as_str() == name)
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `field=value` pairs of a collection query.
pub type Filter<'a> = (&'a str, String);

/// REST operations against a keyed collection store.
///
/// Every method maps a non-success response to an error; interpreting
/// those errors (soft reads, loud writes) is the gateway's job.
#[allow(async_fn_in_trait)]
pub trait RecordStore {
    /// `GET /{collection}?field=value&...`
    async fn query<T: DeserializeOwned>(
        &self,
        collection: Collection,
        filters: &[Filter<'_>],
    ) -> TrackerResult<Vec<T>>;

    /// `POST /{collection}`
    async fn insert<B: Serialize, T: DeserializeOwned>(
        &self,
        collection: Collection,
        body: &B,
    ) -> TrackerResult<T>;

    /// `PUT /{collection}/{id}`, replacing the whole record.
    async fn replace<B: Serialize, T: DeserializeOwned>(
        &self,
        collection: Collection,
        id: RecordId,
        body: &B,
    ) -> TrackerResult<T>;

    /// `DELETE /{collection}/{id}`
    async fn remove(&self, collection: Collection, id: RecordId) -> TrackerResult<()>;
}

/// Returns whether `record` satisfies every `field=value` pair.
pub fn matches_filters<'a, I>(record: &Value, filters: I) -> bool
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    filters.into_iter().all(|(field, expected)| {
        record
            .get(field)
            .is_some_and(|actual| field_text(actual) == expected)
    })
}

fn field_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
