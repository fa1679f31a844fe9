//! Handler tests for the Users domain
//!
//! These tests drive the domain router end to end over the in-memory
//! repository:
//! - request deserialization (JSON → DTOs)
//! - response serialization (DTOs → JSON, wire field names)
//! - HTTP status codes
//! - error responses

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use domain_users::{InMemoryUserRepository, UserResponse, UserService, handlers};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt; // For oneshot()

fn app() -> Router {
    let repository = InMemoryUserRepository::new();
    let service = UserService::new(repository);
    handlers::router(service)
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

// Helper to parse JSON response body
async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_create_user_returns_201_with_generated_id() {
    let app = app();

    let response = app
        .oneshot(json_request(
            "POST",
            "/",
            json!({
                "firstname": "John",
                "lastname": "Doe",
                "email": "john@example.com"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let user: UserResponse = json_body(response.into_body()).await;
    assert!(!user.user_id.is_nil());
    assert_eq!(user.first_name, "John");
    assert_eq!(user.last_name, "Doe");
    assert_eq!(user.email, "john@example.com");
    assert_eq!(user.status.as_deref(), Some("active"));
}

#[tokio::test]
async fn test_create_user_validates_input() {
    let app = app();

    // Name below the 2-character minimum
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/",
            json!({
                "firstname": "J",
                "lastname": "Doe",
                "email": "john@example.com"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Malformed email
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/",
            json!({
                "firstname": "John",
                "lastname": "Doe",
                "email": "not-an-email"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Body that is not JSON at all
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/")
                .header("content-type", "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_user_with_malformed_id_returns_400() {
    let app = app();

    let response = app
        .oneshot(empty_request("GET", "/not-a-uuid"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"]["type"], "invalid_id");
}

#[tokio::test]
async fn test_get_missing_user_returns_404() {
    let app = app();

    let response = app
        .oneshot(empty_request(
            "GET",
            "/4bb43f07-cf4c-4f41-a1b2-96e8f4a9c7d1",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"]["type"], "not_found");
}

#[tokio::test]
async fn test_list_users_empty_store_returns_empty_array() {
    let app = app();

    let response = app.oneshot(empty_request("GET", "/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let users: Vec<UserResponse> = json_body(response.into_body()).await;
    assert!(users.is_empty());
}

#[tokio::test]
async fn test_patch_with_bad_status_returns_400() {
    let app = app();

    let response = app
        .oneshot(json_request(
            "PATCH",
            "/4bb43f07-cf4c-4f41-a1b2-96e8f4a9c7d1",
            json!({ "status": "suspended" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_missing_user_returns_200_deleted() {
    let app = app();

    let response = app
        .oneshot(empty_request(
            "DELETE",
            "/4bb43f07-cf4c-4f41-a1b2-96e8f4a9c7d1",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..], b"deleted");
}

#[tokio::test]
async fn test_full_user_lifecycle() {
    let app = app();

    // Create
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/",
            json!({
                "firstname": "John",
                "lastname": "Doe",
                "email": "john@example.com",
                "phone": "+14155552671"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created: UserResponse = json_body(response.into_body()).await;
    let uri = format!("/{}", created.user_id);

    // Read it back
    let response = app
        .clone()
        .oneshot(empty_request("GET", &uri))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let fetched: UserResponse = json_body(response.into_body()).await;
    assert_eq!(fetched.user_id, created.user_id);
    assert_eq!(fetched.email, "john@example.com");
    assert_eq!(fetched.phone.as_deref(), Some("+14155552671"));

    // Partial update touches only the supplied field
    let response = app
        .clone()
        .oneshot(json_request("PATCH", &uri, json!({ "age": 27 })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let updated: UserResponse = json_body(response.into_body()).await;
    assert_eq!(updated.age, Some(27));
    assert_eq!(updated.first_name, "John");
    assert_eq!(updated.phone.as_deref(), Some("+14155552671"));

    // List contains the user, as a DTO
    let response = app.clone().oneshot(empty_request("GET", "/")).await.unwrap();
    let users: Vec<UserResponse> = json_body(response.into_body()).await;
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].user_id, created.user_id);

    // Delete responds with the literal body "deleted"
    let response = app
        .clone()
        .oneshot(empty_request("DELETE", &uri))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..], b"deleted");

    // Gone now
    let response = app.oneshot(empty_request("GET", &uri)).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_status_can_be_updated_through_patch() {
    let app = app();

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/",
            json!({
                "firstname": "Jane",
                "lastname": "Doe",
                "email": "jane@example.com"
            }),
        ))
        .await
        .unwrap();
    let created: UserResponse = json_body(response.into_body()).await;

    let response = app
        .clone()
        .oneshot(json_request(
            "PATCH",
            &format!("/{}", created.user_id),
            json!({ "status": "inactive" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let updated: UserResponse = json_body(response.into_body()).await;
    assert_eq!(updated.status.as_deref(), Some("inactive"));
    assert_eq!(updated.first_name, "Jane");
}
