use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use super::{matches_filters, Collection, Filter, RecordStore};
use crate::error::{TrackerError, TrackerResult};
use crate::model::RecordId;

/// In-process record store.
///
/// Clones share the same records, so a test can hand one clone to the
/// gateway and keep another to inspect what was written.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Rc<RefCell<Inner>>,
}

#[derive(Debug, Default)]
struct Inner {
    records: HashMap<Collection, Vec<Value>>,
    offline: bool,
    read_calls: usize,
    write_calls: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a record directly, assigning an id when it has none.
    pub fn seed<T: Serialize>(&self, collection: Collection, record: &T) -> TrackerResult<RecordId> {
        let mut value = serde_json::to_value(record)?;
        let id = match value.get("id").and_then(Value::as_str) {
            Some(raw) => Uuid::parse_str(raw).map_err(|err| TrackerError::Decode(err.to_string()))?,
            None => assign_id(&mut value)?,
        };
        self.inner
            .borrow_mut()
            .records
            .entry(collection)
            .or_default()
            .push(value);
        Ok(id)
    }

    /// Makes every subsequent call fail with a network error.
    pub fn set_offline(&self, offline: bool) {
        self.inner.borrow_mut().offline = offline;
    }

    pub fn records(&self, collection: Collection) -> Vec<Value> {
        self.inner
            .borrow()
            .records
            .get(&collection)
            .cloned()
            .unwrap_or_default()
    }

    pub fn len(&self, collection: Collection) -> usize {
        self.inner
            .borrow()
            .records
            .get(&collection)
            .map_or(0, Vec::len)
    }

    pub fn is_empty(&self, collection: Collection) -> bool {
        self.len(collection) == 0
    }

    /// Number of query calls attempted, including failed ones.
    pub fn read_calls(&self) -> usize {
        self.inner.borrow().read_calls
    }

    /// Number of insert/replace/remove calls attempted, including failed ones.
    pub fn write_calls(&self) -> usize {
        self.inner.borrow().write_calls
    }

    fn begin(&self, write: bool) -> TrackerResult<()> {
        let mut inner = self.inner.borrow_mut();
        if write {
            inner.write_calls += 1;
        } else {
            inner.read_calls += 1;
        }
        if inner.offline {
            return Err(TrackerError::Network("record store unreachable".to_string()));
        }
        Ok(())
    }
}

impl RecordStore for MemoryStore {
    async fn query<T: DeserializeOwned>(
        &self,
        collection: Collection,
        filters: &[Filter<'_>],
    ) -> TrackerResult<Vec<T>> {
        self.begin(false)?;
        let inner = self.inner.borrow();
        let Some(records) = inner.records.get(&collection) else {
            return Ok(Vec::new());
        };
        records
            .iter()
            .filter(|record| {
                matches_filters(
                    record,
                    filters.iter().map(|(field, value)| (*field, value.as_str())),
                )
            })
            .map(|record| serde_json::from_value(record.clone()).map_err(TrackerError::from))
            .collect()
    }

    async fn insert<B: Serialize, T: DeserializeOwned>(
        &self,
        collection: Collection,
        body: &B,
    ) -> TrackerResult<T> {
        self.begin(true)?;
        let mut value = serde_json::to_value(body)?;
        assign_id(&mut value)?;
        self.inner
            .borrow_mut()
            .records
            .entry(collection)
            .or_default()
            .push(value.clone());
        Ok(serde_json::from_value(value)?)
    }

    async fn replace<B: Serialize, T: DeserializeOwned>(
        &self,
        collection: Collection,
        id: RecordId,
        body: &B,
    ) -> TrackerResult<T> {
        self.begin(true)?;
        let mut value = serde_json::to_value(body)?;
        set_id(&mut value, id)?;
        let mut inner = self.inner.borrow_mut();
        let slot = inner
            .records
            .get_mut(&collection)
            .and_then(|records| records.iter_mut().find(|record| has_id(record, id)))
            .ok_or(TrackerError::Server { status: 404 })?;
        *slot = value.clone();
        Ok(serde_json::from_value(value)?)
    }

    async fn remove(&self, collection: Collection, id: RecordId) -> TrackerResult<()> {
        self.begin(true)?;
        let mut inner = self.inner.borrow_mut();
        let records = inner
            .records
            .get_mut(&collection)
            .ok_or(TrackerError::Server { status: 404 })?;
        let before = records.len();
        records.retain(|record| !has_id(record, id));
        if records.len() == before {
            return Err(TrackerError::Server { status: 404 });
        }
        Ok(())
    }
}

fn assign_id(value: &mut Value) -> TrackerResult<RecordId> {
    let id = Uuid::new_v4();
    set_id(value, id)?;
    Ok(id)
}

fn set_id(value: &mut Value, id: RecordId) -> TrackerResult<()> {
    let object = value
        .as_object_mut()
        .ok_or_else(|| TrackerError::Decode("record body must be a JSON object".to_string()))?;
    object.insert("id".to_string(), Value::String(id.to_string()));
    Ok(())
}

fn has_id(record: &Value, id: RecordId) -> bool {
    record
        .get("id")
        .and_then(Value::as_str)
        .is_some_and(|raw| raw == id.to_string())
}
