//! HTTP routes for school endpoints.

use axum::{
    routing::{get, put},
    Router,
};

use super::handlers::{
    change_school_status, create_school, get_school, get_school_by_name, list_active_schools,
    list_schools, update_school, SchoolHandlers,
};

/// Routes mounted under `/api/schools`.
pub fn school_routes(handlers: SchoolHandlers) -> Router {
    Router::new()
        .route("/", get(list_schools).post(create_school))
        .route("/active", get(list_active_schools))
        .route("/by-name", get(get_school_by_name))
        .route("/:id", get(get_school).put(update_school))
        .route("/:id/status", put(change_school_status))
        .with_state(handlers)
}
