mod api_support;

use api_support::{get, post, put, spawn_app};
use serde_json::json;
use tempfile::tempdir;

#[tokio::test]
async fn data_survives_restart() {
    let tmp = tempdir().expect("tempdir");

    let first = spawn_app(tmp.path()).await;
    let list = post(first, "/api/lists", r#"{"name":"Work"}"#).await.json();
    let list_id = list["id"].as_str().expect("id").to_string();
    let body = json!({"title": "ship", "listId": list_id, "tags": ["release"]}).to_string();
    let task = post(first, "/api/tasks", &body).await.json();
    let task_id = task["id"].as_str().expect("id").to_string();
    let resp = put(first, &format!("/api/tasks/{task_id}"), r#"{"status":"doing"}"#).await;
    assert_eq!(resp.status, 200);

    let lists_before = get(first, "/api/lists").await.json();
    let tasks_before = get(first, "/api/tasks").await.json();

    let second = spawn_app(tmp.path()).await;
    assert_eq!(get(second, "/api/lists").await.json(), lists_before);
    assert_eq!(get(second, "/api/tasks").await.json(), tasks_before);
    assert_eq!(tasks_before[0]["status"], "doing");

    let fresh = post(second, "/api/lists", r#"{"name":"Next"}"#).await.json();
    assert_ne!(fresh["id"], list["id"]);
}

#[tokio::test]
async fn files_on_disk_are_json_arrays() {
    let tmp = tempdir().expect("tempdir");
    let addr = spawn_app(tmp.path()).await;
    post(addr, "/api/tasks", r#"{"title":"a"}"#).await;

    let lists: serde_json::Value = serde_json::from_str(
        &std::fs::read_to_string(tmp.path().join("lists.json")).expect("lists.json"),
    )
    .expect("lists json");
    let tasks: serde_json::Value = serde_json::from_str(
        &std::fs::read_to_string(tmp.path().join("tasks.json")).expect("tasks.json"),
    )
    .expect("tasks json");
    assert_eq!(lists[0]["id"], "inbox");
    assert_eq!(tasks[0]["title"], "a");
    assert_eq!(tasks[0]["listId"], "inbox");
}
