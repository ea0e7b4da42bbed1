//! Task store integration tests
//!
//! Exercises the in-memory task cache against a `wiremock` server:
//! fetch/create/update/toggle/delete flows and the reconciliation rules
//! that keep the cache a faithful mirror of server state.

use std::sync::Arc;

use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use taskdeck::client::ApiClient;
use taskdeck::storage::FileStore;
use taskdeck::todos::TodoStore;
use taskdeck::types::{TodoDraft, TodoPatch};

fn make_store(base_url: &str) -> (TempDir, TodoStore) {
    let dir = TempDir::new().expect("tempdir");
    let profile =
        Arc::new(FileStore::new_with_path(dir.path().join("profile.json")).expect("store"));
    let client = ApiClient::new(base_url, 5, profile).expect("client");
    (dir, TodoStore::new(client))
}

fn ok_envelope(data: serde_json::Value) -> serde_json::Value {
    json!({"success": true, "data": data, "error": null})
}

fn todo_json(id: i64, title: &str, completed: bool) -> serde_json::Value {
    json!({
        "id": id,
        "user_id": 1,
        "title": title,
        "description": null,
        "completed": completed,
        "priority": "medium",
        "tags": null,
        "created_at": "2025-06-01T08:00:00Z",
        "updated_at": "2025-06-01T09:00:00Z"
    })
}

/// fetch_all replaces the cache wholesale, preserving server order.
#[tokio::test]
async fn test_fetch_all_replaces_cache_in_server_order() {
    let server = MockServer::start().await;
    let (_dir, mut store) = make_store(&server.uri());

    Mock::given(method("GET"))
        .and(path("/api/todos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_envelope(json!([
            todo_json(3, "Newest", false),
            todo_json(1, "Oldest", true),
        ]))))
        .mount(&server)
        .await;

    store.fetch_all().await.expect("fetch");

    let ids: Vec<i64> = store.todos().iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![3, 1]);
    assert!(!store.is_loading());
    assert!(store.last_error().is_none());
}

/// create prepends the server-confirmed record to the cache.
#[tokio::test]
async fn test_create_prepends_confirmed_record() {
    let server = MockServer::start().await;
    let (_dir, mut store) = make_store(&server.uri());

    Mock::given(method("GET"))
        .and(path("/api/todos"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(ok_envelope(json!([todo_json(1, "Existing", false)]))),
        )
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/todos"))
        .and(body_json(json!({"title": "Buy milk", "priority": "high"})))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(ok_envelope(todo_json(2, "Buy milk", false))),
        )
        .expect(1)
        .mount(&server)
        .await;

    store.fetch_all().await.expect("fetch");

    let mut draft = TodoDraft::new("Buy milk");
    draft.priority = "high".parse().unwrap();
    let created = store.create(&draft).await.expect("create");

    assert_eq!(created.id, 2);
    let ids: Vec<i64> = store.todos().iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![2, 1], "new record goes to the front");
}

/// create followed by a fresh fetch leaves exactly one copy of the record
/// in the cache.
#[tokio::test]
async fn test_create_then_fetch_holds_record_exactly_once() {
    let server = MockServer::start().await;
    let (_dir, mut store) = make_store(&server.uri());

    Mock::given(method("POST"))
        .and(path("/api/todos"))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(ok_envelope(todo_json(5, "Once only", false))),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/todos"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(ok_envelope(json!([todo_json(5, "Once only", false)]))),
        )
        .mount(&server)
        .await;

    store
        .create(&TodoDraft::new("Once only"))
        .await
        .expect("create");
    store.fetch_all().await.expect("fetch");

    let count = store.todos().iter().filter(|t| t.id == 5).count();
    assert_eq!(count, 1);
}

/// update replaces the matching cached record in place without disturbing
/// its neighbors.
#[tokio::test]
async fn test_update_replaces_record_in_place() {
    let server = MockServer::start().await;
    let (_dir, mut store) = make_store(&server.uri());

    Mock::given(method("GET"))
        .and(path("/api/todos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_envelope(json!([
            todo_json(1, "First", false),
            todo_json(2, "Second", false),
            todo_json(3, "Third", false),
        ]))))
        .mount(&server)
        .await;

    Mock::given(method("PATCH"))
        .and(path("/api/todos/2"))
        .and(body_json(json!({"title": "Renamed"})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(ok_envelope(todo_json(2, "Renamed", false))),
        )
        .mount(&server)
        .await;

    store.fetch_all().await.expect("fetch");

    let patch = TodoPatch {
        title: Some("Renamed".to_string()),
        ..Default::default()
    };
    store.update(2, &patch).await.expect("update");

    let titles: Vec<&str> = store.todos().iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["First", "Renamed", "Third"]);
}

/// Toggling twice returns the record to its original completion state.
/// Each toggle re-fetches the record and inverts the server's current
/// value, so the second toggle sends the opposite patch of the first.
#[tokio::test]
async fn test_double_toggle_restores_original_state() {
    let server = MockServer::start().await;
    let (_dir, mut store) = make_store(&server.uri());

    // First toggle sees completed=false on the server.
    Mock::given(method("GET"))
        .and(path("/api/todos/4"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(ok_envelope(todo_json(4, "Flip me", false))),
        )
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("PATCH"))
        .and(path("/api/todos/4"))
        .and(body_json(json!({"completed": true})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(ok_envelope(todo_json(4, "Flip me", true))),
        )
        .expect(1)
        .mount(&server)
        .await;

    // Second toggle sees completed=true.
    Mock::given(method("GET"))
        .and(path("/api/todos/4"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(ok_envelope(todo_json(4, "Flip me", true))),
        )
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("PATCH"))
        .and(path("/api/todos/4"))
        .and(body_json(json!({"completed": false})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(ok_envelope(todo_json(4, "Flip me", false))),
        )
        .expect(1)
        .mount(&server)
        .await;

    let first = store.toggle_complete(4).await.expect("first toggle");
    assert!(first.completed);

    let second = store.toggle_complete(4).await.expect("second toggle");
    assert!(!second.completed);
}

/// A successful get clears the error left by a previous failure instead
/// of letting it keep reporting.
#[tokio::test]
async fn test_successful_get_clears_stale_error() {
    let server = MockServer::start().await;
    let (_dir, mut store) = make_store(&server.uri());

    Mock::given(method("GET"))
        .and(path("/api/todos/8"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "success": false,
            "data": null,
            "error": {
                "code": "TODO_NOT_FOUND",
                "message": "Todo 8 does not exist",
                "details": {}
            }
        })))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/todos/8"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(ok_envelope(todo_json(8, "Found now", false))),
        )
        .mount(&server)
        .await;

    assert!(store.get(8).await.is_err());
    assert!(store.last_error().is_some());

    store.get(8).await.expect("second get succeeds");
    assert!(store.last_error().is_none());
}

/// Deleting a missing record surfaces the server error and leaves the
/// cache unchanged.
#[tokio::test]
async fn test_delete_missing_record_leaves_cache_unchanged() {
    let server = MockServer::start().await;
    let (_dir, mut store) = make_store(&server.uri());

    Mock::given(method("GET"))
        .and(path("/api/todos"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(ok_envelope(json!([todo_json(1, "Keep me", false)]))),
        )
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/api/todos/99"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "success": false,
            "data": null,
            "error": {
                "code": "TODO_NOT_FOUND",
                "message": "Todo 99 does not exist",
                "details": {}
            }
        })))
        .mount(&server)
        .await;

    store.fetch_all().await.expect("fetch");

    let err = store.delete(99).await.unwrap_err();
    assert!(err.to_string().contains("TODO_NOT_FOUND"));
    assert_eq!(store.todos().len(), 1);
    assert!(store.last_error().unwrap().contains("TODO_NOT_FOUND"));
    assert!(!store.is_loading());
}

/// A confirmed delete removes the record from the cache.
#[tokio::test]
async fn test_delete_removes_confirmed_record() {
    let server = MockServer::start().await;
    let (_dir, mut store) = make_store(&server.uri());

    Mock::given(method("GET"))
        .and(path("/api/todos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_envelope(json!([
            todo_json(1, "Doomed", false),
            todo_json(2, "Survivor", false),
        ]))))
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/api/todos/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_envelope(json!(null))))
        .mount(&server)
        .await;

    store.fetch_all().await.expect("fetch");
    store.delete(1).await.expect("delete");

    let ids: Vec<i64> = store.todos().iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![2]);
}

/// The cache always reflects the latest completed fetch, even when the
/// collection shrank server-side in between.
#[tokio::test]
async fn test_cache_reflects_latest_completed_fetch() {
    let server = MockServer::start().await;
    let (_dir, mut store) = make_store(&server.uri());

    Mock::given(method("GET"))
        .and(path("/api/todos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_envelope(json!([
            todo_json(1, "A", false),
            todo_json(2, "B", false),
        ]))))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/todos"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(ok_envelope(json!([todo_json(2, "B", true)]))),
        )
        .mount(&server)
        .await;

    store.fetch_all().await.expect("first fetch");
    assert_eq!(store.todos().len(), 2);

    store.fetch_all().await.expect("second fetch");
    assert_eq!(store.todos().len(), 1);
    assert_eq!(store.todos()[0].id, 2);
    assert!(store.todos()[0].completed);
}

/// A failed fetch leaves the previous cache contents in place.
#[tokio::test]
async fn test_failed_fetch_keeps_previous_cache() {
    let server = MockServer::start().await;
    let (_dir, mut store) = make_store(&server.uri());

    Mock::given(method("GET"))
        .and(path("/api/todos"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(ok_envelope(json!([todo_json(1, "Cached", false)]))),
        )
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/todos"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "success": false,
            "data": null,
            "error": null
        })))
        .mount(&server)
        .await;

    store.fetch_all().await.expect("first fetch");
    let result = store.fetch_all().await;
    assert!(result.is_err());

    assert_eq!(store.todos().len(), 1);
    assert!(store.last_error().is_some());
}
