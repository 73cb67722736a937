//! HTTP adapter for school endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    ChangeSchoolStatusRequest, CreateSchoolRequest, ListSchoolsParams, SchoolByNameParams,
    SchoolResponse, UpdateSchoolRequest,
};
pub use handlers::SchoolHandlers;
pub use routes::school_routes;
