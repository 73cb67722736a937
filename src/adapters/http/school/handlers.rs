//! HTTP handlers for school endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::context::RequestContext;
use crate::adapters::http::error::{error_response, parse_param};
use crate::application::handlers::school::{
    ChangeSchoolStatusCommand, ChangeSchoolStatusHandler, CreateSchoolCommand,
    CreateSchoolHandler, GetSchoolHandler, GetSchoolQuery, ListSchoolsHandler, ListSchoolsQuery,
    UpdateSchoolInfoCommand, UpdateSchoolInfoHandler,
};
use crate::domain::foundation::SchoolId;
use crate::domain::school::{School, SchoolError, SchoolStatus};

use super::dto::{
    ChangeSchoolStatusRequest, CreateSchoolRequest, ListSchoolsParams, SchoolByNameParams,
    SchoolResponse, UpdateSchoolRequest,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct SchoolHandlers {
    create_handler: Arc<CreateSchoolHandler>,
    update_handler: Arc<UpdateSchoolInfoHandler>,
    status_handler: Arc<ChangeSchoolStatusHandler>,
    get_handler: Arc<GetSchoolHandler>,
    list_handler: Arc<ListSchoolsHandler>,
}

impl SchoolHandlers {
    pub fn new(
        create_handler: Arc<CreateSchoolHandler>,
        update_handler: Arc<UpdateSchoolInfoHandler>,
        status_handler: Arc<ChangeSchoolStatusHandler>,
        get_handler: Arc<GetSchoolHandler>,
        list_handler: Arc<ListSchoolsHandler>,
    ) -> Self {
        Self {
            create_handler,
            update_handler,
            status_handler,
            get_handler,
            list_handler,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/schools - Create a school in DRAFT
pub async fn create_school(
    State(handlers): State<SchoolHandlers>,
    ctx: RequestContext,
    Json(req): Json<CreateSchoolRequest>,
) -> Response {
    let created_by = match ctx.resolve_user(req.created_by.as_deref(), "created_by") {
        Ok(id) => id,
        Err(response) => return response,
    };

    let cmd = CreateSchoolCommand {
        name: req.name,
        description: req.description,
        created_by,
    };

    match handlers.create_handler.handle(cmd, ctx.metadata()).await {
        Ok(result) => (
            StatusCode::CREATED,
            Json(SchoolResponse::from(&result.school)),
        )
            .into_response(),
        Err(e) => handle_school_error(e),
    }
}

/// GET /api/schools/:id
pub async fn get_school(
    State(handlers): State<SchoolHandlers>,
    Path(school_id): Path<String>,
) -> Response {
    let school_id = match parse_param::<SchoolId>(&school_id, "school id") {
        Ok(id) => id,
        Err(response) => return response,
    };

    respond_with_school(handlers.get_handler.handle(GetSchoolQuery::ById(school_id)).await)
}

/// GET /api/schools/by-name?name=
pub async fn get_school_by_name(
    State(handlers): State<SchoolHandlers>,
    Query(params): Query<SchoolByNameParams>,
) -> Response {
    respond_with_school(
        handlers
            .get_handler
            .handle(GetSchoolQuery::ByName(params.name))
            .await,
    )
}

/// GET /api/schools?status=&created_by=
///
/// `status` wins when both filters are present.
pub async fn list_schools(
    State(handlers): State<SchoolHandlers>,
    Query(params): Query<ListSchoolsParams>,
) -> Response {
    let query = if let Some(raw) = params.status.as_deref() {
        match parse_param::<SchoolStatus>(raw, "school status") {
            Ok(status) => ListSchoolsQuery::ByStatus(status),
            Err(response) => return response,
        }
    } else if let Some(raw) = params.created_by.as_deref() {
        match parse_param(raw, "user id") {
            Ok(user_id) => ListSchoolsQuery::CreatedBy(user_id),
            Err(response) => return response,
        }
    } else {
        ListSchoolsQuery::All
    };

    respond_with_list(handlers.list_handler.handle(query).await)
}

/// GET /api/schools/active
pub async fn list_active_schools(State(handlers): State<SchoolHandlers>) -> Response {
    respond_with_list(handlers.list_handler.handle(ListSchoolsQuery::Active).await)
}

/// PUT /api/schools/:id - Update name and description
pub async fn update_school(
    State(handlers): State<SchoolHandlers>,
    ctx: RequestContext,
    Path(school_id): Path<String>,
    Json(req): Json<UpdateSchoolRequest>,
) -> Response {
    let school_id = match parse_param::<SchoolId>(&school_id, "school id") {
        Ok(id) => id,
        Err(response) => return response,
    };

    let cmd = UpdateSchoolInfoCommand {
        school_id,
        name: req.name,
        description: req.description,
    };

    respond_with_school(
        handlers
            .update_handler
            .handle(cmd, ctx.metadata())
            .await
            .map(|result| result.school),
    )
}

/// PUT /api/schools/:id/status - Move the school through its lifecycle
pub async fn change_school_status(
    State(handlers): State<SchoolHandlers>,
    ctx: RequestContext,
    Path(school_id): Path<String>,
    Json(req): Json<ChangeSchoolStatusRequest>,
) -> Response {
    let school_id = match parse_param::<SchoolId>(&school_id, "school id") {
        Ok(id) => id,
        Err(response) => return response,
    };
    let target = match parse_param::<SchoolStatus>(&req.status, "school status") {
        Ok(status) => status,
        Err(response) => return response,
    };

    let cmd = ChangeSchoolStatusCommand { school_id, target };

    respond_with_school(
        handlers
            .status_handler
            .handle(cmd, ctx.metadata())
            .await
            .map(|result| result.school),
    )
}

// ════════════════════════════════════════════════════════════════════════════
// Helpers
// ════════════════════════════════════════════════════════════════════════════

fn respond_with_school(result: Result<School, SchoolError>) -> Response {
    match result {
        Ok(school) => (StatusCode::OK, Json(SchoolResponse::from(&school))).into_response(),
        Err(e) => handle_school_error(e),
    }
}

fn respond_with_list(result: Result<Vec<School>, SchoolError>) -> Response {
    match result {
        Ok(schools) => {
            let body: Vec<SchoolResponse> = schools.iter().map(SchoolResponse::from).collect();
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => handle_school_error(e),
    }
}

fn handle_school_error(error: SchoolError) -> Response {
    error_response(error.code(), error.message())
}
