//! HTTP routes for learning path endpoints.

use axum::{
    routing::{get, post, put},
    Router,
};

use super::handlers::{
    add_activity, add_resource, archive_path, create_path, get_path, list_paths_created_by,
    list_published_school_paths, list_school_paths, publish_path, remove_activity,
    remove_resource, return_path_to_draft, submit_path, update_activity, update_path,
    update_resource, LearningPathHandlers,
};

/// Routes mounted under `/api/learning-paths`.
pub fn learning_path_routes(handlers: LearningPathHandlers) -> Router {
    Router::new()
        .route("/", post(create_path))
        .route("/schools/:school_id", get(list_school_paths))
        .route("/schools/:school_id/published", get(list_published_school_paths))
        .route("/created-by/:user_id", get(list_paths_created_by))
        .route("/:id", get(get_path).put(update_path))
        .route("/:id/submit", post(submit_path))
        .route("/:id/publish", post(publish_path))
        .route("/:id/archive", post(archive_path))
        .route("/:id/return-to-draft", post(return_path_to_draft))
        .route("/:id/activities", post(add_activity))
        .route(
            "/:id/activities/:activity_id",
            put(update_activity).delete(remove_activity),
        )
        .route("/:id/activities/:activity_id/resources", post(add_resource))
        .route(
            "/:id/activities/:activity_id/resources/:resource_id",
            put(update_resource).delete(remove_resource),
        )
        .with_state(handlers)
}
