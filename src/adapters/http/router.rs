//! Top-level API router.
//!
//! Builds every use-case handler from one set of repositories and one event
//! publisher, then mounts the per-module routers under `/api`.

use std::sync::Arc;

use axum::{
    http::{HeaderValue, Method},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde_json::json;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use super::learning_path::{learning_path_routes, LearningPathHandlers};
use super::school::{school_routes, SchoolHandlers};
use super::user::{user_routes, UserHandlers};
use crate::adapters::memory::{
    InMemoryLearningPathRepository, InMemorySchoolRepository, InMemoryUserRepository,
};
use crate::application::handlers::learning_path::{
    CreatePathHandler, GetPathHandler, ListPathsHandler, ManageActivitiesHandler,
    ManageResourcesHandler, TransitionPathHandler, UpdatePathInfoHandler,
};
use crate::application::handlers::school::{
    ChangeSchoolStatusHandler, CreateSchoolHandler, GetSchoolHandler, ListSchoolsHandler,
    UpdateSchoolInfoHandler,
};
use crate::application::handlers::user::{
    GetUserHandler, ListUsersHandler, ManageRolesHandler, RegisterUserHandler,
};
use crate::config::ServerConfig;
use crate::ports::{EventPublisher, LearningPathRepository, SchoolRepository, UserRepository};

/// Ports shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub schools: Arc<dyn SchoolRepository>,
    pub paths: Arc<dyn LearningPathRepository>,
    pub users: Arc<dyn UserRepository>,
    pub events: Arc<dyn EventPublisher>,
}

impl AppState {
    pub fn new(
        schools: Arc<dyn SchoolRepository>,
        paths: Arc<dyn LearningPathRepository>,
        users: Arc<dyn UserRepository>,
        events: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            schools,
            paths,
            users,
            events,
        }
    }

    /// State backed by the in-memory repositories.
    pub fn in_memory(events: Arc<dyn EventPublisher>) -> Self {
        Self::new(
            Arc::new(InMemorySchoolRepository::new()),
            Arc::new(InMemoryLearningPathRepository::new()),
            Arc::new(InMemoryUserRepository::new()),
            events,
        )
    }

    pub fn school_handlers(&self) -> SchoolHandlers {
        SchoolHandlers::new(
            Arc::new(CreateSchoolHandler::new(self.schools.clone(), self.events.clone())),
            Arc::new(UpdateSchoolInfoHandler::new(self.schools.clone(), self.events.clone())),
            Arc::new(ChangeSchoolStatusHandler::new(self.schools.clone(), self.events.clone())),
            Arc::new(GetSchoolHandler::new(self.schools.clone())),
            Arc::new(ListSchoolsHandler::new(self.schools.clone())),
        )
    }

    pub fn learning_path_handlers(&self) -> LearningPathHandlers {
        LearningPathHandlers::new(
            Arc::new(CreatePathHandler::new(
                self.paths.clone(),
                self.schools.clone(),
                self.events.clone(),
            )),
            Arc::new(UpdatePathInfoHandler::new(self.paths.clone(), self.events.clone())),
            Arc::new(ManageActivitiesHandler::new(self.paths.clone(), self.events.clone())),
            Arc::new(ManageResourcesHandler::new(self.paths.clone(), self.events.clone())),
            Arc::new(TransitionPathHandler::new(self.paths.clone(), self.events.clone())),
            Arc::new(GetPathHandler::new(self.paths.clone())),
            Arc::new(ListPathsHandler::new(self.paths.clone())),
        )
    }

    pub fn user_handlers(&self) -> UserHandlers {
        UserHandlers::new(
            Arc::new(RegisterUserHandler::new(self.users.clone(), self.events.clone())),
            Arc::new(ManageRolesHandler::new(
                self.users.clone(),
                self.schools.clone(),
                self.events.clone(),
            )),
            Arc::new(GetUserHandler::new(self.users.clone())),
            Arc::new(ListUsersHandler::new(self.users.clone())),
        )
    }
}

/// Creates the complete API router with its middleware stack.
///
/// # Routes
/// - `GET /health`
/// - `/api/schools/...`
/// - `/api/learning-paths/...`
/// - `/api/users/...`
pub fn api_router(state: &AppState, server: &ServerConfig) -> Router {
    let middleware = ServiceBuilder::new()
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(server.request_timeout()))
        .layer(cors_layer(server))
        .layer(PropagateRequestIdLayer::x_request_id());

    Router::new()
        .route("/health", get(health))
        .nest("/api/schools", school_routes(state.school_handlers()))
        .nest(
            "/api/learning-paths",
            learning_path_routes(state.learning_path_handlers()),
        )
        .nest("/api/users", user_routes(state.user_handlers()))
        .layer(middleware)
}

async fn health() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any);

    if server.cors_origins_list().is_empty() {
        layer.allow_origin(Any)
    } else {
        layer.allow_origin(AllowOrigin::list(allowed_origins(server)))
    }
}

/// Configured origins that are valid header values.
fn allowed_origins(server: &ServerConfig) -> Vec<HeaderValue> {
    server
        .cors_origins_list()
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect()
}
