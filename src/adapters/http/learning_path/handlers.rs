//! HTTP handlers for learning path endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::context::RequestContext;
use crate::adapters::http::error::{error_response, parse_param};
use crate::application::handlers::learning_path::{
    AddActivityCommand, AddResourceCommand, CreatePathCommand, CreatePathHandler,
    GetPathHandler, ListPathsHandler, ListPathsQuery, ManageActivitiesHandler,
    ManageResourcesHandler, PathTransition, RemoveActivityCommand, RemoveResourceCommand,
    TransitionPathCommand, TransitionPathHandler, UpdateActivityCommand, UpdatePathInfoCommand,
    UpdatePathInfoHandler, UpdateResourceCommand,
};
use crate::domain::foundation::{ActivityId, PathId, ResourceId, SchoolId, UserId};
use crate::domain::learning_path::{
    ActivityType, LearningPath, LearningPathError, PathStatus, ResourceType,
};

use super::dto::{
    AddActivityRequest, AddResourceRequest, CreatePathRequest, LearningPathResponse,
    PathsBySchoolParams, UpdateActivityRequest, UpdatePathRequest, UpdateResourceRequest,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct LearningPathHandlers {
    create_handler: Arc<CreatePathHandler>,
    update_handler: Arc<UpdatePathInfoHandler>,
    activities_handler: Arc<ManageActivitiesHandler>,
    resources_handler: Arc<ManageResourcesHandler>,
    transition_handler: Arc<TransitionPathHandler>,
    get_handler: Arc<GetPathHandler>,
    list_handler: Arc<ListPathsHandler>,
}

impl LearningPathHandlers {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        create_handler: Arc<CreatePathHandler>,
        update_handler: Arc<UpdatePathInfoHandler>,
        activities_handler: Arc<ManageActivitiesHandler>,
        resources_handler: Arc<ManageResourcesHandler>,
        transition_handler: Arc<TransitionPathHandler>,
        get_handler: Arc<GetPathHandler>,
        list_handler: Arc<ListPathsHandler>,
    ) -> Self {
        Self {
            create_handler,
            update_handler,
            activities_handler,
            resources_handler,
            transition_handler,
            get_handler,
            list_handler,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Path info
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/learning-paths - Create a draft path in a school
pub async fn create_path(
    State(handlers): State<LearningPathHandlers>,
    ctx: RequestContext,
    Json(req): Json<CreatePathRequest>,
) -> Response {
    let school_id = match parse_param::<SchoolId>(&req.school_id, "school id") {
        Ok(id) => id,
        Err(response) => return response,
    };
    let created_by = match ctx.resolve_user(req.created_by.as_deref(), "created_by") {
        Ok(id) => id,
        Err(response) => return response,
    };

    let cmd = CreatePathCommand {
        school_id,
        title: req.title,
        description: req.description,
        created_by,
    };

    match handlers.create_handler.handle(cmd, ctx.metadata()).await {
        Ok(result) => (
            StatusCode::CREATED,
            Json(LearningPathResponse::from(&result.path)),
        )
            .into_response(),
        Err(e) => handle_path_error(e),
    }
}

/// GET /api/learning-paths/:id
pub async fn get_path(
    State(handlers): State<LearningPathHandlers>,
    Path(path_id): Path<String>,
) -> Response {
    let path_id = match parse_param::<PathId>(&path_id, "path id") {
        Ok(id) => id,
        Err(response) => return response,
    };

    respond_with_path(handlers.get_handler.handle(path_id).await)
}

/// PUT /api/learning-paths/:id - Update title and description
pub async fn update_path(
    State(handlers): State<LearningPathHandlers>,
    ctx: RequestContext,
    Path(path_id): Path<String>,
    Json(req): Json<UpdatePathRequest>,
) -> Response {
    let path_id = match parse_param::<PathId>(&path_id, "path id") {
        Ok(id) => id,
        Err(response) => return response,
    };

    let cmd = UpdatePathInfoCommand {
        path_id,
        title: req.title,
        description: req.description,
    };

    respond_with_path(
        handlers
            .update_handler
            .handle(cmd, ctx.metadata())
            .await
            .map(|result| result.path),
    )
}

/// GET /api/learning-paths/schools/:school_id[?published=true|status=]
pub async fn list_school_paths(
    State(handlers): State<LearningPathHandlers>,
    Path(school_id): Path<String>,
    Query(params): Query<PathsBySchoolParams>,
) -> Response {
    let school_id = match parse_param::<SchoolId>(&school_id, "school id") {
        Ok(id) => id,
        Err(response) => return response,
    };

    let query = if params.published {
        ListPathsQuery::PublishedBySchool(school_id)
    } else if let Some(raw) = params.status.as_deref() {
        match parse_param::<PathStatus>(raw, "path status") {
            Ok(status) => ListPathsQuery::BySchoolAndStatus(school_id, status),
            Err(response) => return response,
        }
    } else {
        ListPathsQuery::BySchool(school_id)
    };

    respond_with_list(handlers.list_handler.handle(query).await)
}

/// GET /api/learning-paths/schools/:school_id/published
///
/// Same as `?published=true` on the school listing.
pub async fn list_published_school_paths(
    State(handlers): State<LearningPathHandlers>,
    Path(school_id): Path<String>,
) -> Response {
    let school_id = match parse_param::<SchoolId>(&school_id, "school id") {
        Ok(id) => id,
        Err(response) => return response,
    };

    let query = ListPathsQuery::PublishedBySchool(school_id);
    respond_with_list(handlers.list_handler.handle(query).await)
}

/// GET /api/learning-paths/created-by/:user_id
pub async fn list_paths_created_by(
    State(handlers): State<LearningPathHandlers>,
    Path(user_id): Path<String>,
) -> Response {
    let user_id = match parse_param::<UserId>(&user_id, "user id") {
        Ok(id) => id,
        Err(response) => return response,
    };

    respond_with_list(
        handlers
            .list_handler
            .handle(ListPathsQuery::CreatedBy(user_id))
            .await,
    )
}

// ════════════════════════════════════════════════════════════════════════════
// Lifecycle
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/learning-paths/:id/submit
pub async fn submit_path(
    state: State<LearningPathHandlers>,
    ctx: RequestContext,
    path_id: Path<String>,
) -> Response {
    transition(state, ctx, path_id, PathTransition::SubmitForReview).await
}

/// POST /api/learning-paths/:id/publish
pub async fn publish_path(
    state: State<LearningPathHandlers>,
    ctx: RequestContext,
    path_id: Path<String>,
) -> Response {
    transition(state, ctx, path_id, PathTransition::Publish).await
}

/// POST /api/learning-paths/:id/archive
pub async fn archive_path(
    state: State<LearningPathHandlers>,
    ctx: RequestContext,
    path_id: Path<String>,
) -> Response {
    transition(state, ctx, path_id, PathTransition::Archive).await
}

/// POST /api/learning-paths/:id/return-to-draft
pub async fn return_path_to_draft(
    state: State<LearningPathHandlers>,
    ctx: RequestContext,
    path_id: Path<String>,
) -> Response {
    transition(state, ctx, path_id, PathTransition::ReturnToDraft).await
}

async fn transition(
    State(handlers): State<LearningPathHandlers>,
    ctx: RequestContext,
    Path(path_id): Path<String>,
    transition: PathTransition,
) -> Response {
    let path_id = match parse_param::<PathId>(&path_id, "path id") {
        Ok(id) => id,
        Err(response) => return response,
    };

    let cmd = TransitionPathCommand {
        path_id,
        transition,
    };

    respond_with_path(
        handlers
            .transition_handler
            .handle(cmd, ctx.metadata())
            .await
            .map(|result| result.path),
    )
}

// ════════════════════════════════════════════════════════════════════════════
// Activities
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/learning-paths/:id/activities
pub async fn add_activity(
    State(handlers): State<LearningPathHandlers>,
    ctx: RequestContext,
    Path(path_id): Path<String>,
    Json(req): Json<AddActivityRequest>,
) -> Response {
    let path_id = match parse_param::<PathId>(&path_id, "path id") {
        Ok(id) => id,
        Err(response) => return response,
    };
    let activity_type = match parse_param::<ActivityType>(&req.activity_type, "activity type") {
        Ok(kind) => kind,
        Err(response) => return response,
    };

    let cmd = AddActivityCommand {
        path_id,
        title: req.title,
        description: req.description,
        activity_type,
        display_order: req.display_order,
        estimated_minutes: req.estimated_minutes,
    };

    match handlers.activities_handler.add(cmd, ctx.metadata()).await {
        Ok(result) => (
            StatusCode::CREATED,
            Json(LearningPathResponse::from(&result.path)),
        )
            .into_response(),
        Err(e) => handle_path_error(e),
    }
}

/// PUT /api/learning-paths/:id/activities/:activity_id
pub async fn update_activity(
    State(handlers): State<LearningPathHandlers>,
    ctx: RequestContext,
    Path((path_id, activity_id)): Path<(String, String)>,
    Json(req): Json<UpdateActivityRequest>,
) -> Response {
    let (path_id, activity_id) = match activity_params(&path_id, &activity_id) {
        Ok(ids) => ids,
        Err(response) => return response,
    };

    let cmd = UpdateActivityCommand {
        path_id,
        activity_id,
        title: req.title,
        description: req.description,
        display_order: req.display_order,
        estimated_minutes: req.estimated_minutes,
    };

    respond_with_path(
        handlers
            .activities_handler
            .update(cmd, ctx.metadata())
            .await
            .map(|result| result.path),
    )
}

/// DELETE /api/learning-paths/:id/activities/:activity_id
pub async fn remove_activity(
    State(handlers): State<LearningPathHandlers>,
    ctx: RequestContext,
    Path((path_id, activity_id)): Path<(String, String)>,
) -> Response {
    let (path_id, activity_id) = match activity_params(&path_id, &activity_id) {
        Ok(ids) => ids,
        Err(response) => return response,
    };

    let cmd = RemoveActivityCommand {
        path_id,
        activity_id,
    };

    respond_with_path(
        handlers
            .activities_handler
            .remove(cmd, ctx.metadata())
            .await
            .map(|result| result.path),
    )
}

// ════════════════════════════════════════════════════════════════════════════
// Resources
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/learning-paths/:id/activities/:activity_id/resources
pub async fn add_resource(
    State(handlers): State<LearningPathHandlers>,
    ctx: RequestContext,
    Path((path_id, activity_id)): Path<(String, String)>,
    Json(req): Json<AddResourceRequest>,
) -> Response {
    let (path_id, activity_id) = match activity_params(&path_id, &activity_id) {
        Ok(ids) => ids,
        Err(response) => return response,
    };
    let resource_type = match parse_param::<ResourceType>(&req.resource_type, "resource type") {
        Ok(kind) => kind,
        Err(response) => return response,
    };

    let cmd = AddResourceCommand {
        path_id,
        activity_id,
        title: req.title,
        description: req.description,
        resource_type,
        url: req.url,
        display_order: req.display_order,
    };

    match handlers.resources_handler.add(cmd, ctx.metadata()).await {
        Ok(result) => (
            StatusCode::CREATED,
            Json(LearningPathResponse::from(&result.path)),
        )
            .into_response(),
        Err(e) => handle_path_error(e),
    }
}

/// PUT /api/learning-paths/:id/activities/:activity_id/resources/:resource_id
pub async fn update_resource(
    State(handlers): State<LearningPathHandlers>,
    ctx: RequestContext,
    Path((path_id, activity_id, resource_id)): Path<(String, String, String)>,
    Json(req): Json<UpdateResourceRequest>,
) -> Response {
    let (path_id, activity_id, resource_id) =
        match resource_params(&path_id, &activity_id, &resource_id) {
            Ok(ids) => ids,
            Err(response) => return response,
        };

    let cmd = UpdateResourceCommand {
        path_id,
        activity_id,
        resource_id,
        title: req.title,
        description: req.description,
        url: req.url,
        display_order: req.display_order,
    };

    respond_with_path(
        handlers
            .resources_handler
            .update(cmd, ctx.metadata())
            .await
            .map(|result| result.path),
    )
}

/// DELETE /api/learning-paths/:id/activities/:activity_id/resources/:resource_id
pub async fn remove_resource(
    State(handlers): State<LearningPathHandlers>,
    ctx: RequestContext,
    Path((path_id, activity_id, resource_id)): Path<(String, String, String)>,
) -> Response {
    let (path_id, activity_id, resource_id) =
        match resource_params(&path_id, &activity_id, &resource_id) {
            Ok(ids) => ids,
            Err(response) => return response,
        };

    let cmd = RemoveResourceCommand {
        path_id,
        activity_id,
        resource_id,
    };

    respond_with_path(
        handlers
            .resources_handler
            .remove(cmd, ctx.metadata())
            .await
            .map(|result| result.path),
    )
}

// ════════════════════════════════════════════════════════════════════════════
// Helpers
// ════════════════════════════════════════════════════════════════════════════

fn activity_params(path_id: &str, activity_id: &str) -> Result<(PathId, ActivityId), Response> {
    Ok((
        parse_param(path_id, "path id")?,
        parse_param(activity_id, "activity id")?,
    ))
}

fn resource_params(
    path_id: &str,
    activity_id: &str,
    resource_id: &str,
) -> Result<(PathId, ActivityId, ResourceId), Response> {
    let (path_id, activity_id) = activity_params(path_id, activity_id)?;
    Ok((path_id, activity_id, parse_param(resource_id, "resource id")?))
}

fn respond_with_path(result: Result<LearningPath, LearningPathError>) -> Response {
    match result {
        Ok(path) => (StatusCode::OK, Json(LearningPathResponse::from(&path))).into_response(),
        Err(e) => handle_path_error(e),
    }
}

fn respond_with_list(result: Result<Vec<LearningPath>, LearningPathError>) -> Response {
    match result {
        Ok(paths) => {
            let body: Vec<LearningPathResponse> =
                paths.iter().map(LearningPathResponse::from).collect();
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => handle_path_error(e),
    }
}

fn handle_path_error(error: LearningPathError) -> Response {
    error_response(error.code(), error.message())
}
