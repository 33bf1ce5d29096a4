//! First-run population of the record store from a JSON file shaped like
//! `{ "users": [...], "tasks": [...], "features": [...], "team": [...] }`.

use std::{io::ErrorKind, path::Path};

use serde::Deserialize;
use serde_json::Value;
use tracing::{info, warn};
use tracker_shared::Collection;

use crate::{error::StoreResult, store::Storage};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SeedFile {
    pub users: Vec<Value>,
    pub tasks: Vec<Value>,
    pub features: Vec<Value>,
    pub team: Vec<Value>,
}

impl SeedFile {
    pub fn load(path: &Path) -> StoreResult<Option<Self>> {
        match std::fs::read_to_string(path) {
            Ok(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                warn!("Seed file {} not found, starting empty", path.display());
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn records(self) -> [(Collection, Vec<Value>); 4] {
        [
            (Collection::Users, self.users),
            (Collection::Tasks, self.tasks),
            (Collection::Features, self.features),
            (Collection::Team, self.team),
        ]
    }
}

/// Copies seed records into every collection that is still empty, so a
/// restart never duplicates or overwrites live data.
pub async fn seed(storage: &Storage, file: SeedFile) -> StoreResult<()> {
    for (collection, records) in file.records() {
        if records.is_empty() {
            continue;
        }
        if !storage.list(collection).await?.is_empty() {
            info!("Collection {collection} already populated, skipping seed");
            continue;
        }
        let count = records.len();
        for record in records {
            storage.restore(collection, record).await?;
        }
        info!("Seeded {count} {collection} records");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn seeds_only_empty_collections() {
        let storage = Storage::memory();
        storage
            .insert(Collection::Team, json!({ "name": "Existing" }))
            .await
            .unwrap();

        let file: SeedFile = serde_json::from_value(json!({
            "features": [{ "title": "Smart Task Management" }],
            "team": [{ "name": "Seeded" }]
        }))
        .unwrap();
        seed(&storage, file).await.unwrap();

        assert_eq!(storage.list(Collection::Features).await.unwrap().len(), 1);
        let team = storage.list(Collection::Team).await.unwrap();
        assert_eq!(team.len(), 1);
        assert_eq!(team[0]["name"], "Existing");
        assert!(storage.list(Collection::Users).await.unwrap().is_empty());
    }

    #[test]
    fn missing_seed_file_is_not_an_error() {
        let loaded = SeedFile::load(Path::new("definitely/not/here.json")).unwrap();
        assert!(loaded.is_none());
    }
}
