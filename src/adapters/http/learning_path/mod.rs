//! HTTP adapter for learning path endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    ActivityResponse, AddActivityRequest, AddResourceRequest, CreatePathRequest,
    LearningPathResponse, PathsBySchoolParams, ResourceResponse, UpdateActivityRequest,
    UpdatePathRequest, UpdateResourceRequest,
};
pub use handlers::LearningPathHandlers;
pub use routes::learning_path_routes;
