use lambda_http::http::header::{ACCESS_CONTROL_ALLOW_METHODS, ALLOW};
use lambda_http::http::StatusCode;
use lambda_http::{Body, Request, Response};
use serde_json::Value;
use taskr::common::store::MemoryTaskStore;
use taskr::handlers::route;

fn request(method: &str, uri: &str, body: &str) -> Request {
    let body = if body.is_empty() {
        Body::Empty
    } else {
        Body::from(body)
    };

    lambda_http::http::Request::builder()
        .method(method)
        .uri(uri)
        .body(body)
        .unwrap()
}

async fn call(store: &MemoryTaskStore, method: &str, uri: &str, body: &str) -> Response<Body> {
    route(store, request(method, uri, body)).await.unwrap()
}

fn json_body(response: &Response<Body>) -> Value {
    serde_json::from_slice(response.body().as_ref()).unwrap()
}

#[tokio::test]
async fn full_task_lifecycle() {
    let store = MemoryTaskStore::new();

    let created = call(&store, "POST", "/task", r#"{"username":"alice","task":"buy milk"}"#).await;
    assert_eq!(created.status(), StatusCode::CREATED);

    let listed = call(&store, "GET", "/task", "").await;
    assert_eq!(listed.status(), StatusCode::OK);
    let rows = json_body(&listed);
    assert_eq!(rows.as_array().map(Vec::len), Some(1));
    assert_eq!(rows[0]["Finished"], false);
    let id = rows[0]["task_id"].as_str().unwrap().to_string();

    let updated = call(&store, "PATCH", &format!("/task/{id}"), r#"{"Finished":true}"#).await;
    assert_eq!(updated.status(), StatusCode::OK);
    assert_eq!(json_body(&updated)["updatedAttributes"]["Finished"], true);

    let deleted = call(&store, "DELETE", &format!("/task/{id}"), "").await;
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

    let listed = call(&store, "GET", "/task", "").await;
    assert_eq!(json_body(&listed), serde_json::json!([]));
}

#[tokio::test]
async fn stage_prefix_is_ignored() {
    let store = MemoryTaskStore::new();

    let created = call(&store, "POST", "/prod/task", r#"{"username":"a","task":"b"}"#).await;
    assert_eq!(created.status(), StatusCode::CREATED);

    let id = json_body(&created)["task_id"].as_str().unwrap().to_string();
    let updated = call(&store, "PUT", &format!("/prod/task/{id}"), r#"{"Finished":true}"#).await;
    assert_eq!(updated.status(), StatusCode::OK);
}

#[tokio::test]
async fn preflight_lists_allowed_methods() {
    let store = MemoryTaskStore::new();

    let collection = call(&store, "OPTIONS", "/task", "").await;
    assert_eq!(collection.status(), StatusCode::NO_CONTENT);
    assert_eq!(collection.headers()[ACCESS_CONTROL_ALLOW_METHODS], "GET,POST,OPTIONS");

    let item = call(&store, "OPTIONS", "/task/abc", "").await;
    assert_eq!(item.status(), StatusCode::NO_CONTENT);
    assert_eq!(item.headers()[ACCESS_CONTROL_ALLOW_METHODS], "PUT,PATCH,DELETE,OPTIONS");
}

#[tokio::test]
async fn unsupported_method_is_405() {
    let store = MemoryTaskStore::new();

    let response = call(&store, "DELETE", "/task", "").await;
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(response.headers()[ALLOW], "GET,POST,OPTIONS");

    let response = call(&store, "GET", "/task/abc", "").await;
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(json_body(&response)["description"], "Method GET not allowed");
}

#[tokio::test]
async fn unknown_path_is_404() {
    let store = MemoryTaskStore::new();

    let response = call(&store, "GET", "/users", "").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(json_body(&response)["description"], "Not found");
}
