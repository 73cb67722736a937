//! User command and query handlers.

mod assign_role;
mod get_user;
mod register_user;

pub use assign_role::{
    AssignSchoolRoleCommand, AssignSystemRoleCommand, ManageRolesHandler, RemoveSchoolRoleCommand,
    RoleChangeResult,
};
pub use get_user::{GetUserHandler, GetUserQuery, ListUsersHandler, ListUsersQuery};
pub use register_user::{RegisterUserCommand, RegisterUserHandler, RegisterUserResult};
