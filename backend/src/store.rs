//! Record persistence behind the REST routes.
//!
//! Records are opaque JSON objects keyed by a UUID `id`. Listing returns
//! records in insertion order.

use std::collections::HashMap;
use std::sync::Arc;

use redis::{AsyncCommands, Client};
use serde_json::Value;
use tokio::sync::RwLock;
use tracker_shared::Collection;
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};

#[derive(Clone)]
pub enum Storage {
    Redis(Arc<Client>),
    Memory(Arc<RwLock<HashMap<Collection, Vec<Value>>>>),
}

impl Storage {
    pub fn redis(url: &str) -> StoreResult<Self> {
        Ok(Storage::Redis(Arc::new(Client::open(url)?)))
    }

    pub fn memory() -> Self {
        Storage::Memory(Arc::default())
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Storage::Redis(_) => "redis",
            Storage::Memory(_) => "memory",
        }
    }

    pub async fn list(&self, collection: Collection) -> StoreResult<Vec<Value>> {
        match self {
            Storage::Redis(client) => {
                let mut conn = client.get_async_connection().await?;
                let ids: Vec<String> = conn.lrange(index_key(collection), 0, -1).await?;
                let mut records = Vec::with_capacity(ids.len());
                for id in ids {
                    let raw: Option<String> = conn.get(format!("{collection}:{id}")).await?;
                    if let Some(raw) = raw {
                        records.push(serde_json::from_str(&raw)?);
                    }
                }
                Ok(records)
            }
            Storage::Memory(records) => Ok(records
                .read()
                .await
                .get(&collection)
                .cloned()
                .unwrap_or_default()),
        }
    }

    pub async fn get(&self, collection: Collection, id: Uuid) -> StoreResult<Value> {
        let found = match self {
            Storage::Redis(client) => {
                let mut conn = client.get_async_connection().await?;
                let raw: Option<String> = conn.get(record_key(collection, id)).await?;
                raw.map(|raw| serde_json::from_str(&raw)).transpose()?
            }
            Storage::Memory(records) => records
                .read()
                .await
                .get(&collection)
                .and_then(|records| records.iter().find(|record| has_id(record, id)).cloned()),
        };
        found.ok_or(StoreError::NotFound { collection, id })
    }

    /// Stores `body` under a freshly minted id.
    pub async fn insert(&self, collection: Collection, body: Value) -> StoreResult<Value> {
        self.put_new(collection, Uuid::new_v4(), body).await
    }

    /// Stores `body` keeping its own `id` when that is a UUID, as seed
    /// files reference records across collections.
    pub async fn restore(&self, collection: Collection, body: Value) -> StoreResult<Value> {
        let id = body
            .get("id")
            .and_then(Value::as_str)
            .and_then(|raw| Uuid::parse_str(raw).ok())
            .unwrap_or_else(Uuid::new_v4);
        self.put_new(collection, id, body).await
    }

    /// Replaces record `id` wholesale.
    pub async fn replace(&self, collection: Collection, id: Uuid, body: Value) -> StoreResult<Value> {
        let record = with_id(body, id)?;
        match self {
            Storage::Redis(client) => {
                let mut conn = client.get_async_connection().await?;
                let key = record_key(collection, id);
                let exists: bool = conn.exists(&key).await?;
                if !exists {
                    return Err(StoreError::NotFound { collection, id });
                }
                conn.set::<_, _, ()>(&key, serde_json::to_string(&record)?).await?;
            }
            Storage::Memory(records) => {
                let mut records = records.write().await;
                let slot = records
                    .get_mut(&collection)
                    .and_then(|records| records.iter_mut().find(|existing| has_id(existing, id)))
                    .ok_or(StoreError::NotFound { collection, id })?;
                *slot = record.clone();
            }
        }
        Ok(record)
    }

    pub async fn remove(&self, collection: Collection, id: Uuid) -> StoreResult<()> {
        match self {
            Storage::Redis(client) => {
                let mut conn = client.get_async_connection().await?;
                let deleted: usize = conn.del(record_key(collection, id)).await?;
                if deleted == 0 {
                    return Err(StoreError::NotFound { collection, id });
                }
                conn.lrem::<_, _, ()>(index_key(collection), 0, id.to_string()).await?;
            }
            Storage::Memory(records) => {
                let mut records = records.write().await;
                let records = records
                    .get_mut(&collection)
                    .ok_or(StoreError::NotFound { collection, id })?;
                let before = records.len();
                records.retain(|record| !has_id(record, id));
                if records.len() == before {
                    return Err(StoreError::NotFound { collection, id });
                }
            }
        }
        Ok(())
    }

    async fn put_new(&self, collection: Collection, id: Uuid, body: Value) -> StoreResult<Value> {
        let record = with_id(body, id)?;
        match self {
            Storage::Redis(client) => {
                let mut conn = client.get_async_connection().await?;
                conn.set::<_, _, ()>(record_key(collection, id), serde_json::to_string(&record)?)
                    .await?;
                conn.rpush::<_, _, ()>(index_key(collection), id.to_string())
                    .await?;
            }
            Storage::Memory(records) => {
                records
                    .write()
                    .await
                    .entry(collection)
                    .or_default()
                    .push(record.clone());
            }
        }
        Ok(record)
    }
}

fn record_key(collection: Collection, id: Uuid) -> String {
    format!("{collection}:{id}")
}

fn index_key(collection: Collection) -> String {
    format!("{collection}:ids")
}

fn with_id(body: Value, id: Uuid) -> StoreResult<Value> {
    let Value::Object(mut object) = body else {
        return Err(StoreError::MalformedPayload(
            "record body must be a JSON object".to_string(),
        ));
    };
    object.insert("id".to_string(), Value::String(id.to_string()));
    Ok(Value::Object(object))
}

fn has_id(record: &Value, id: Uuid) -> bool {
    record
        .get("id")
        .and_then(Value::as_str)
        .is_some_and(|raw| raw == id.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn memory_store_keeps_insertion_order() {
        let storage = Storage::memory();
        for title in ["first", "second", "third"] {
            storage
                .insert(Collection::Tasks, json!({ "title": title }))
                .await
                .unwrap();
        }

        let titles: Vec<_> = storage
            .list(Collection::Tasks)
            .await
            .unwrap()
            .into_iter()
            .map(|record| record["title"].clone())
            .collect();
        assert_eq!(titles, [json!("first"), json!("second"), json!("third")]);
    }

    #[tokio::test]
    async fn restore_keeps_uuid_ids_and_replaces_others() {
        let storage = Storage::memory();
        let id = Uuid::new_v4();
        let kept = storage
            .restore(Collection::Users, json!({ "id": id.to_string() }))
            .await
            .unwrap();
        assert_eq!(kept["id"], id.to_string());

        let minted = storage
            .restore(Collection::Users, json!({ "id": 7 }))
            .await
            .unwrap();
        assert_ne!(minted["id"], json!(7));
    }

    #[tokio::test]
    async fn non_object_bodies_are_rejected() {
        let storage = Storage::memory();
        let err = storage
            .insert(Collection::Tasks, json!(["not", "an", "object"]))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::MalformedPayload(_)));
    }
}
