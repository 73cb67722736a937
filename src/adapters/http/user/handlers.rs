//! HTTP handlers for user endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::context::RequestContext;
use crate::adapters::http::error::{error_response, parse_param};
use crate::application::handlers::user::{
    AssignSchoolRoleCommand, AssignSystemRoleCommand, GetUserHandler, GetUserQuery,
    ListUsersHandler, ListUsersQuery, ManageRolesHandler, RegisterUserCommand,
    RegisterUserHandler, RemoveSchoolRoleCommand,
};
use crate::domain::foundation::{SchoolId, UserId};
use crate::domain::user::{SchoolRole, SystemRole, User, UserError};

use super::dto::{
    AssignSchoolRoleRequest, AssignSystemRoleRequest, RegisterUserRequest, UserByEmailParams,
    UserResponse, UsersBySchoolParams,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct UserHandlers {
    register_handler: Arc<RegisterUserHandler>,
    roles_handler: Arc<ManageRolesHandler>,
    get_handler: Arc<GetUserHandler>,
    list_handler: Arc<ListUsersHandler>,
}

impl UserHandlers {
    pub fn new(
        register_handler: Arc<RegisterUserHandler>,
        roles_handler: Arc<ManageRolesHandler>,
        get_handler: Arc<GetUserHandler>,
        list_handler: Arc<ListUsersHandler>,
    ) -> Self {
        Self {
            register_handler,
            roles_handler,
            get_handler,
            list_handler,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/users - Register a user
pub async fn register_user(
    State(handlers): State<UserHandlers>,
    ctx: RequestContext,
    Json(req): Json<RegisterUserRequest>,
) -> Response {
    let cmd = RegisterUserCommand {
        email: req.email,
        first_name: req.first_name,
        last_name: req.last_name,
    };

    match handlers.register_handler.handle(cmd, ctx.metadata()).await {
        Ok(result) => {
            (StatusCode::CREATED, Json(UserResponse::from(&result.user))).into_response()
        }
        Err(e) => handle_user_error(e),
    }
}

/// GET /api/users/:id
pub async fn get_user(
    State(handlers): State<UserHandlers>,
    Path(user_id): Path<String>,
) -> Response {
    let user_id = match parse_param::<UserId>(&user_id, "user id") {
        Ok(id) => id,
        Err(response) => return response,
    };

    respond_with_user(handlers.get_handler.handle(GetUserQuery::ById(user_id)).await)
}

/// GET /api/users/by-email?email=
pub async fn get_user_by_email(
    State(handlers): State<UserHandlers>,
    Query(params): Query<UserByEmailParams>,
) -> Response {
    respond_with_user(
        handlers
            .get_handler
            .handle(GetUserQuery::ByEmail(params.email))
            .await,
    )
}

/// GET /api/users/active
pub async fn list_active_users(State(handlers): State<UserHandlers>) -> Response {
    respond_with_list(handlers.list_handler.handle(ListUsersQuery::Active).await)
}

/// GET /api/users/schools/:school_id[?role=]
pub async fn list_school_users(
    State(handlers): State<UserHandlers>,
    Path(school_id): Path<String>,
    Query(params): Query<UsersBySchoolParams>,
) -> Response {
    let school_id = match parse_param::<SchoolId>(&school_id, "school id") {
        Ok(id) => id,
        Err(response) => return response,
    };

    let query = match params.role.as_deref() {
        Some(raw) => match parse_param::<SchoolRole>(raw, "school role") {
            Ok(role) => ListUsersQuery::BySchoolRole(school_id, role),
            Err(response) => return response,
        },
        None => ListUsersQuery::BySchool(school_id),
    };

    respond_with_list(handlers.list_handler.handle(query).await)
}

/// PUT /api/users/:id/system-role
pub async fn assign_system_role(
    State(handlers): State<UserHandlers>,
    ctx: RequestContext,
    Path(user_id): Path<String>,
    Json(req): Json<AssignSystemRoleRequest>,
) -> Response {
    let user_id = match parse_param::<UserId>(&user_id, "user id") {
        Ok(id) => id,
        Err(response) => return response,
    };
    let role = match parse_param::<SystemRole>(&req.role, "system role") {
        Ok(role) => role,
        Err(response) => return response,
    };

    let cmd = AssignSystemRoleCommand { user_id, role };

    respond_with_user(
        handlers
            .roles_handler
            .assign_system_role(cmd, ctx.metadata())
            .await
            .map(|result| result.user),
    )
}

/// PUT /api/users/:id/schools/:school_id/role
pub async fn assign_school_role(
    State(handlers): State<UserHandlers>,
    ctx: RequestContext,
    Path((user_id, school_id)): Path<(String, String)>,
    Json(req): Json<AssignSchoolRoleRequest>,
) -> Response {
    let (user_id, school_id) = match membership_params(&user_id, &school_id) {
        Ok(ids) => ids,
        Err(response) => return response,
    };
    let role = match parse_param::<SchoolRole>(&req.role, "school role") {
        Ok(role) => role,
        Err(response) => return response,
    };

    let cmd = AssignSchoolRoleCommand {
        user_id,
        school_id,
        role,
    };

    respond_with_user(
        handlers
            .roles_handler
            .assign_school_role(cmd, ctx.metadata())
            .await
            .map(|result| result.user),
    )
}

/// DELETE /api/users/:id/schools/:school_id/role
pub async fn remove_school_role(
    State(handlers): State<UserHandlers>,
    ctx: RequestContext,
    Path((user_id, school_id)): Path<(String, String)>,
) -> Response {
    let (user_id, school_id) = match membership_params(&user_id, &school_id) {
        Ok(ids) => ids,
        Err(response) => return response,
    };

    let cmd = RemoveSchoolRoleCommand { user_id, school_id };

    respond_with_user(
        handlers
            .roles_handler
            .remove_school_role(cmd, ctx.metadata())
            .await
            .map(|result| result.user),
    )
}

// ════════════════════════════════════════════════════════════════════════════
// Helpers
// ════════════════════════════════════════════════════════════════════════════

fn membership_params(user_id: &str, school_id: &str) -> Result<(UserId, SchoolId), Response> {
    Ok((
        parse_param(user_id, "user id")?,
        parse_param(school_id, "school id")?,
    ))
}

fn respond_with_user(result: Result<User, UserError>) -> Response {
    match result {
        Ok(user) => (StatusCode::OK, Json(UserResponse::from(&user))).into_response(),
        Err(e) => handle_user_error(e),
    }
}

fn respond_with_list(result: Result<Vec<User>, UserError>) -> Response {
    match result {
        Ok(users) => {
            let body: Vec<UserResponse> = users.iter().map(UserResponse::from).collect();
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => handle_user_error(e),
    }
}

fn handle_user_error(error: UserError) -> Response {
    error_response(error.code(), error.message())
}
