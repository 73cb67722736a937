//! HTTP routes for user endpoints.

use axum::{
    routing::{get, post, put},
    Router,
};

use super::handlers::{
    assign_school_role, assign_system_role, get_user, get_user_by_email, list_active_users,
    list_school_users, register_user, remove_school_role, UserHandlers,
};

/// Routes mounted under `/api/users`.
pub fn user_routes(handlers: UserHandlers) -> Router {
    Router::new()
        .route("/", post(register_user))
        .route("/active", get(list_active_users))
        .route("/by-email", get(get_user_by_email))
        .route("/schools/:school_id", get(list_school_users))
        .route("/:id", get(get_user))
        .route("/:id/system-role", put(assign_system_role))
        .route(
            "/:id/schools/:school_id/role",
            put(assign_school_role).delete(remove_school_role),
        )
        .with_state(handlers)
}
