//! School command and query handlers.

mod change_school_status;
mod create_school;
mod get_school;
mod update_school_info;

pub use change_school_status::{
    ChangeSchoolStatusCommand, ChangeSchoolStatusHandler, ChangeSchoolStatusResult,
};
pub use create_school::{CreateSchoolCommand, CreateSchoolHandler, CreateSchoolResult};
pub use get_school::{GetSchoolHandler, GetSchoolQuery, ListSchoolsHandler, ListSchoolsQuery};
pub use update_school_info::{
    UpdateSchoolInfoCommand, UpdateSchoolInfoHandler, UpdateSchoolInfoResult,
};
