use std::collections::HashMap;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Extension, Router,
};
use serde_json::{json, Value};
use tracing::info;
use tracker_shared::{matches_filters, Collection};
use uuid::Uuid;

use crate::{error::StoreResult, store::Storage};

/// REST routes for one collection, to be nested under `/{collection}`.
pub fn collection_router(collection: Collection) -> Router<Storage> {
    Router::new()
        .route("/", get(list_records).post(create_record))
        .route(
            "/:id",
            get(get_record).put(replace_record).delete(delete_record),
        )
        .layer(Extension(collection))
}

async fn list_records(
    Extension(collection): Extension<Collection>,
    Query(filters): Query<HashMap<String, String>>,
    State(storage): State<Storage>,
) -> StoreResult<Json<Vec<Value>>> {
    let records = storage
        .list(collection)
        .await?
        .into_iter()
        .filter(|record| {
            matches_filters(
                record,
                filters.iter().map(|(field, value)| (field.as_str(), value.as_str())),
            )
        })
        .collect();
    Ok(Json(records))
}

async fn get_record(
    Extension(collection): Extension<Collection>,
    Path(id): Path<Uuid>,
    State(storage): State<Storage>,
) -> StoreResult<Json<Value>> {
    Ok(Json(storage.get(collection, id).await?))
}

async fn create_record(
    Extension(collection): Extension<Collection>,
    State(storage): State<Storage>,
    Json(body): Json<Value>,
) -> StoreResult<impl IntoResponse> {
    let record = storage.insert(collection, body).await?;
    info!(%collection, id = %record["id"], "record created");
    Ok((StatusCode::CREATED, Json(record)))
}

async fn replace_record(
    Extension(collection): Extension<Collection>,
    Path(id): Path<Uuid>,
    State(storage): State<Storage>,
    Json(body): Json<Value>,
) -> StoreResult<Json<Value>> {
    Ok(Json(storage.replace(collection, id, body).await?))
}

async fn delete_record(
    Extension(collection): Extension<Collection>,
    Path(id): Path<Uuid>,
    State(storage): State<Storage>,
) -> StoreResult<Json<Value>> {
    storage.remove(collection, id).await?;
    info!(%collection, %id, "record deleted");
    Ok(Json(json!({})))
}
