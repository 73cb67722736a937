//! ManageRolesHandler - Grants and revokes system and school roles.

use std::sync::Arc;

use crate::application::handlers::envelope_for;
use crate::domain::foundation::{CommandMetadata, SchoolId, UserId};
use crate::domain::user::{RoleChange, SchoolRole, SystemRole, User, UserError, UserRoleChanged};
use crate::ports::{EventPublisher, SchoolRepository, UserRepository};

#[derive(Debug, Clone)]
pub struct AssignSystemRoleCommand {
    pub user_id: UserId,
    pub role: SystemRole,
}

#[derive(Debug, Clone)]
pub struct AssignSchoolRoleCommand {
    pub user_id: UserId,
    pub school_id: SchoolId,
    pub role: SchoolRole,
}

#[derive(Debug, Clone)]
pub struct RemoveSchoolRoleCommand {
    pub user_id: UserId,
    pub school_id: SchoolId,
}

/// `event` is `None` when nothing changed (removing a role the user never had).
#[derive(Debug, Clone)]
pub struct RoleChangeResult {
    pub user: User,
    pub event: Option<UserRoleChanged>,
}

pub struct ManageRolesHandler {
    user_repository: Arc<dyn UserRepository>,
    school_repository: Arc<dyn SchoolRepository>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl ManageRolesHandler {
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        school_repository: Arc<dyn SchoolRepository>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            user_repository,
            school_repository,
            event_publisher,
        }
    }

    pub async fn assign_system_role(
        &self,
        cmd: AssignSystemRoleCommand,
        metadata: CommandMetadata,
    ) -> Result<RoleChangeResult, UserError> {
        let mut user = self.load_user(cmd.user_id).await?;
        let previous = user.assign_system_role(cmd.role);
        self.finish(
            user,
            Some(RoleChange::SystemRoleChanged {
                previous,
                current: cmd.role,
            }),
            &metadata,
        )
        .await
    }

    /// Grants (or replaces) the user's role in a school. The school must exist.
    pub async fn assign_school_role(
        &self,
        cmd: AssignSchoolRoleCommand,
        metadata: CommandMetadata,
    ) -> Result<RoleChangeResult, UserError> {
        let mut user = self.load_user(cmd.user_id).await?;
        if self
            .school_repository
            .find_by_id(&cmd.school_id)
            .await?
            .is_none()
        {
            return Err(UserError::school_not_found(cmd.school_id));
        }

        let previous = user.assign_school_role(cmd.school_id, cmd.role);
        self.finish(
            user,
            Some(RoleChange::SchoolRoleAssigned {
                school_id: cmd.school_id,
                previous,
                current: cmd.role,
            }),
            &metadata,
        )
        .await
    }

    pub async fn remove_school_role(
        &self,
        cmd: RemoveSchoolRoleCommand,
        metadata: CommandMetadata,
    ) -> Result<RoleChangeResult, UserError> {
        let mut user = self.load_user(cmd.user_id).await?;
        let change = user
            .remove_school_role(&cmd.school_id)
            .map(|removed| RoleChange::SchoolRoleRemoved {
                school_id: cmd.school_id,
                removed,
            });
        self.finish(user, change, &metadata).await
    }

    async fn load_user(&self, user_id: UserId) -> Result<User, UserError> {
        self.user_repository
            .find_by_id(&user_id)
            .await?
            .ok_or_else(|| UserError::not_found(user_id))
    }

    async fn finish(
        &self,
        mut user: User,
        change: Option<RoleChange>,
        metadata: &CommandMetadata,
    ) -> Result<RoleChangeResult, UserError> {
        let Some(change) = change else {
            return Ok(RoleChangeResult { user, event: None });
        };

        self.user_repository.update(&user).await?;
        user.mark_saved();

        let event = UserRoleChanged::new(&user, change);
        self.event_publisher
            .publish(envelope_for(&event, metadata))
            .await?;

        tracing::info!(user_id = %user.id(), change = ?event.change, "user role changed");
        Ok(RoleChangeResult {
            user,
            event: Some(event),
        })
    }
}
