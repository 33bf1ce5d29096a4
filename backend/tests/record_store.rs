use axum::{
    body::{to_bytes, Body},
    http::{header::CONTENT_TYPE, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;
use tracker_backend::{app, seed::SeedFile, store::Storage};
use tracker_shared::Collection;

fn router(storage: &Storage) -> Router {
    app(storage.clone(), None)
}

async fn send(storage: &Storage, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => request
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => request.body(Body::empty()),
    }
    .unwrap();

    let response = router(storage).oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

#[tokio::test]
async fn post_assigns_id_and_returns_created() {
    let storage = Storage::memory();
    let (status, record) = send(
        &storage,
        Method::POST,
        "/tasks",
        Some(json!({ "title": "Lab report", "completed": false })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    let id = record["id"].as_str().unwrap();
    assert!(uuid::Uuid::parse_str(id).is_ok());

    let (status, fetched) = send(&storage, Method::GET, &format!("/tasks/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, record);
}

#[tokio::test]
async fn query_filters_match_every_field() {
    let storage = Storage::memory();
    for (email, password) in [("ada@uni.edu", "secret1"), ("bob@uni.edu", "secret1")] {
        send(
            &storage,
            Method::POST,
            "/users",
            Some(json!({ "email": email, "password": password })),
        )
        .await;
    }

    let (_, found) = send(
        &storage,
        Method::GET,
        "/users?email=ada%40uni.edu&password=secret1",
        None,
    )
    .await;
    assert_eq!(found.as_array().unwrap().len(), 1);
    assert_eq!(found[0]["email"], "ada@uni.edu");

    let (_, none) = send(
        &storage,
        Method::GET,
        "/users?email=ada%40uni.edu&password=wrong",
        None,
    )
    .await;
    assert_eq!(none, json!([]));
}

#[tokio::test]
async fn put_replaces_the_whole_record() {
    let storage = Storage::memory();
    let (_, created) = send(
        &storage,
        Method::POST,
        "/tasks",
        Some(json!({ "title": "Essay", "description": "draft" })),
    )
    .await;
    let id = created["id"].as_str().unwrap();

    let (status, replaced) = send(
        &storage,
        Method::PUT,
        &format!("/tasks/{id}"),
        Some(json!({ "title": "Essay v2", "id": "ignored" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(replaced, json!({ "id": id, "title": "Essay v2" }));
}

#[tokio::test]
async fn missing_records_are_not_found() {
    let storage = Storage::memory();
    let id = uuid::Uuid::new_v4();

    let (status, body) = send(&storage, Method::DELETE, &format!("/tasks/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("tasks"));

    let (status, _) = send(
        &storage,
        Method::PUT,
        &format!("/team/{id}"),
        Some(json!({ "name": "Nobody" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_returns_empty_object_and_removes() {
    let storage = Storage::memory();
    let (_, created) = send(&storage, Method::POST, "/features", Some(json!({ "title": "Sync" }))).await;
    let id = created["id"].as_str().unwrap();

    let (status, body) = send(&storage, Method::DELETE, &format!("/features/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({}));
    assert!(storage.list(Collection::Features).await.unwrap().is_empty());
}

#[tokio::test]
async fn non_object_body_is_bad_request() {
    let storage = Storage::memory();
    let (status, _) = send(&storage, Method::POST, "/tasks", Some(json!("just a string"))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn bundled_seed_file_populates_features_and_team() {
    let file: SeedFile = serde_json::from_str(include_str!("../seed/db.json")).unwrap();
    let storage = Storage::memory();
    tracker_backend::seed::seed(&storage, file).await.unwrap();

    let (_, features) = send(&storage, Method::GET, "/features", None).await;
    let features: Vec<tracker_shared::Feature> = serde_json::from_value(features).unwrap();
    assert_eq!(features.len(), 4);
    assert_eq!(features[0].title, "Smart Task Management");

    let (_, team) = send(&storage, Method::GET, "/team", None).await;
    let team: Vec<tracker_shared::TeamMember> = serde_json::from_value(team).unwrap();
    assert_eq!(team.len(), 3);
}
