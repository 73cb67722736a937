//! Integration tests for the JSON API over in-memory repositories.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use learning_tracker::adapters::events::InMemoryEventBus;
use learning_tracker::adapters::http::{api_router, AppState};
use learning_tracker::config::ServerConfig;

// =============================================================================
// Test Infrastructure
// =============================================================================

struct TestApi {
    router: Router,
    bus: Arc<InMemoryEventBus>,
}

impl TestApi {
    fn new() -> Self {
        let bus = Arc::new(InMemoryEventBus::new());
        let state = AppState::in_memory(bus.clone());
        Self {
            router: api_router(&state, &ServerConfig::default()),
            bus,
        }
    }

    async fn send(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, json)
    }

    async fn create_school(&self, name: &str, creator: &str) -> Value {
        let (status, body) = self
            .send(
                "POST",
                "/api/schools",
                Some(json!({"name": name, "created_by": creator})),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body
    }

    async fn create_path(&self, school_id: &str, creator: &str) -> Value {
        let (status, body) = self
            .send(
                "POST",
                "/api/learning-paths",
                Some(json!({
                    "school_id": school_id,
                    "title": "Intro to X",
                    "created_by": creator,
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body
    }
}

fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

// =============================================================================
// Schools
// =============================================================================

#[tokio::test]
async fn school_status_changes_follow_the_lifecycle() {
    let api = TestApi::new();
    let school = api.create_school("Acme Academy", &new_id()).await;
    let uri = format!("/api/schools/{}/status", school["id"].as_str().unwrap());

    for (target, expected) in [("ACTIVE", "ACTIVE"), ("SUSPENDED", "SUSPENDED"), ("ACTIVE", "ACTIVE")] {
        let (status, body) = api.send("PUT", &uri, Some(json!({"status": target}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], expected);
    }

    let (status, body) = api.send("PUT", &uri, Some(json!({"status": "ARCHIVED"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["accepts_enrollments"], false);

    let (status, body) = api.send("PUT", &uri, Some(json!({"status": "ARCHIVED"}))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "INVALID_STATE_TRANSITION");

    let (status, _) = api.send("PUT", &uri, Some(json!({"status": "DRAFT"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = api.send("PUT", &uri, Some(json!({"status": "CLOSED"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    assert_eq!(api.bus.events_of_type("school.status_changed.v1").len(), 4);
}

#[tokio::test]
async fn duplicate_school_names_conflict() {
    let api = TestApi::new();
    let creator = new_id();
    api.create_school("Riverside", &creator).await;

    let (status, body) = api
        .send(
            "POST",
            "/api/schools",
            Some(json!({"name": " Riverside ", "created_by": creator})),
        )
        .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "DUPLICATE_SCHOOL_NAME");
}

#[tokio::test]
async fn schools_can_be_found_and_listed() {
    let api = TestApi::new();
    let alice = new_id();
    let bob = new_id();
    let acme = api.create_school("Acme", &alice).await;
    api.create_school("Beacon", &bob).await;

    let (status, body) = api.send("GET", "/api/schools/by-name?name=Acme", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], acme["id"]);

    let (status, body) = api.send("GET", "/api/schools/by-name?name=Nope", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "SCHOOL_NOT_FOUND");

    let (_, body) = api.send("GET", "/api/schools", None).await;
    assert_eq!(body.as_array().unwrap().len(), 2);

    let (_, body) = api
        .send("GET", &format!("/api/schools?created_by={}", alice), None)
        .await;
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (_, body) = api.send("GET", "/api/schools/active", None).await;
    assert!(body.as_array().unwrap().is_empty());

    let (status, _) = api.send("GET", "/api/schools?status=bogus", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn creator_falls_back_to_user_header() {
    let api = TestApi::new();
    let actor = new_id();

    let request = Request::builder()
        .method("POST")
        .uri("/api/schools")
        .header("content-type", "application/json")
        .header("x-user-id", &actor)
        .header("x-request-id", "req-42")
        .body(Body::from(json!({"name": "Header School"}).to_string()))
        .unwrap();
    let response = api.router.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(response.headers()["x-request-id"], "req-42");

    let events = api.bus.events_of_type("school.created.v1");
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].metadata.correlation_id.as_deref(), Some("req-42"));
    assert_eq!(events[0].metadata.user_id.as_deref(), Some(actor.as_str()));
}

// =============================================================================
// Learning paths
// =============================================================================

#[tokio::test]
async fn path_is_built_reviewed_and_published() {
    let api = TestApi::new();
    let creator = new_id();
    let school = api.create_school("Acme", &creator).await;
    let path = api
        .create_path(school["id"].as_str().unwrap(), &creator)
        .await;
    let path_uri = format!("/api/learning-paths/{}", path["id"].as_str().unwrap());

    let (status, body) = api.send("POST", &format!("{path_uri}/publish"), None).await;
    assert_eq!(status, StatusCode::CONFLICT, "{body}");

    let (status, body) = api
        .send(
            "POST",
            &format!("{path_uri}/activities"),
            Some(json!({
                "title": "First steps",
                "activity_type": "VIDEO",
                "estimated_minutes": 45,
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let activity_id = body["activities"][0]["id"].as_str().unwrap().to_string();

    let (status, body) = api
        .send(
            "POST",
            &format!("{path_uri}/activities/{activity_id}/resources"),
            Some(json!({
                "title": "Slides",
                "resource_type": "PDF",
                "url": "https://example.com/slides.pdf",
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["activities"][0]["resources"][0]["resource_type"], "PDF");

    let (status, body) = api.send("POST", &format!("{path_uri}/submit"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "REVIEW");

    let (status, body) = api.send("POST", &format!("{path_uri}/publish"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "PUBLISHED");
    assert_eq!(body["total_estimated_minutes"], 45);
    assert!(body["published_at"].is_string());

    let (status, body) = api
        .send("PUT", &path_uri, Some(json!({"title": "Renamed"})))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "INVALID_STATE_TRANSITION");

    let school_paths = format!(
        "/api/learning-paths/schools/{}?published=true",
        school["id"].as_str().unwrap()
    );
    let (_, body) = api.send("GET", &school_paths, None).await;
    assert_eq!(body.as_array().unwrap().len(), 1);

    let published_alias = format!(
        "/api/learning-paths/schools/{}/published",
        school["id"].as_str().unwrap()
    );
    let (status, body) = api.send("GET", &published_alias, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (_, body) = api
        .send("GET", &format!("/api/learning-paths/created-by/{creator}"), None)
        .await;
    assert_eq!(body.as_array().unwrap().len(), 1);

    assert_eq!(api.bus.events_of_type("learning_path.published.v1").len(), 1);
}

#[tokio::test]
async fn unknown_children_are_not_found() {
    let api = TestApi::new();
    let creator = new_id();
    let school = api.create_school("Acme", &creator).await;
    let path = api
        .create_path(school["id"].as_str().unwrap(), &creator)
        .await;
    let path_uri = format!("/api/learning-paths/{}", path["id"].as_str().unwrap());

    let (status, body) = api
        .send("DELETE", &format!("{path_uri}/activities/{}", new_id()), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "ACTIVITY_NOT_FOUND");

    let (status, _) = api
        .send("GET", &format!("/api/learning-paths/{}", new_id()), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = api
        .send(
            "POST",
            &format!("{path_uri}/activities"),
            Some(json!({"title": "Bad", "activity_type": "PODCAST"})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn paths_need_an_existing_school() {
    let api = TestApi::new();

    let (status, body) = api
        .send(
            "POST",
            "/api/learning-paths",
            Some(json!({"school_id": new_id(), "title": "Orphan", "created_by": new_id()})),
        )
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "SCHOOL_NOT_FOUND");
}

// =============================================================================
// Users
// =============================================================================

#[tokio::test]
async fn users_register_and_receive_roles() {
    let api = TestApi::new();
    let school = api.create_school("Acme", &new_id()).await;
    let school_id = school["id"].as_str().unwrap();

    let (status, user) = api
        .send(
            "POST",
            "/api/users",
            Some(json!({"email": "Ada@Example.com", "first_name": "Ada", "last_name": "Lovelace"})),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let user_id = user["id"].as_str().unwrap();

    let (status, body) = api
        .send(
            "POST",
            "/api/users",
            Some(json!({"email": "ada@example.com", "first_name": "A", "last_name": "L"})),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "DUPLICATE_EMAIL");

    let role_uri = format!("/api/users/{user_id}/schools/{school_id}/role");
    let (status, body) = api
        .send("PUT", &role_uri, Some(json!({"role": "TUTOR"})))
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["school_roles"][school_id], "TUTOR");

    let (_, body) = api
        .send("GET", &format!("/api/users/schools/{school_id}"), None)
        .await;
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (status, body) = api
        .send(
            "PUT",
            &format!("/api/users/{user_id}/system-role"),
            Some(json!({"role": "ADMIN"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["system_role"], "ADMIN");

    let (status, body) = api.send("DELETE", &role_uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["school_roles"].as_object().unwrap().is_empty());

    let (status, body) = api
        .send("GET", "/api/users/by-email?email=ada@example.com", None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], user["id"]);

    assert_eq!(api.bus.events_of_type("user.role_changed.v1").len(), 3);
}

#[tokio::test]
async fn school_role_requires_known_school() {
    let api = TestApi::new();
    let (_, user) = api
        .send(
            "POST",
            "/api/users",
            Some(json!({"email": "grace@example.com", "first_name": "Grace", "last_name": "Hopper"})),
        )
        .await;

    let uri = format!(
        "/api/users/{}/schools/{}/role",
        user["id"].as_str().unwrap(),
        new_id()
    );
    let (status, body) = api.send("PUT", &uri, Some(json!({"role": "STUDENT"}))).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "SCHOOL_NOT_FOUND");
}
