//! HTTP adapter - JSON REST API over the application handlers.
//!
//! Each domain module has its own dto/handlers/routes triple; `router`
//! assembles them under `/api` with the shared middleware stack.

pub mod context;
pub mod error;
pub mod learning_path;
mod router;
pub mod school;
pub mod user;

pub use context::RequestContext;
pub use error::{status_for, ErrorResponse};
pub use router::{api_router, AppState};
