//! RegisterUserHandler - Command handler for new user accounts.

use std::sync::Arc;

use crate::application::handlers::envelope_for;
use crate::domain::foundation::CommandMetadata;
use crate::domain::user::{User, UserError, UserRegistered};
use crate::ports::{EventPublisher, UserRepository};

#[derive(Debug, Clone)]
pub struct RegisterUserCommand {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Clone)]
pub struct RegisterUserResult {
    pub user: User,
    pub event: UserRegistered,
}

/// Handler for registering users. Emails are unique after normalization.
pub struct RegisterUserHandler {
    repository: Arc<dyn UserRepository>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl RegisterUserHandler {
    pub fn new(
        repository: Arc<dyn UserRepository>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            repository,
            event_publisher,
        }
    }

    pub async fn handle(
        &self,
        cmd: RegisterUserCommand,
        metadata: CommandMetadata,
    ) -> Result<RegisterUserResult, UserError> {
        let user = User::create(&cmd.email, &cmd.first_name, &cmd.last_name)?;

        if self.repository.exists_by_email(user.email()).await? {
            tracing::warn!(email = %user.email(), "email already registered");
            return Err(UserError::duplicate_email(user.email().as_str()));
        }

        self.repository.save(&user).await?;

        let event = UserRegistered::from_user(&user);
        self.event_publisher
            .publish(envelope_for(&event, &metadata))
            .await?;

        tracing::info!(user_id = %user.id(), "user registered");
        Ok(RegisterUserResult { user, event })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryUserRepository;
    use crate::application::handlers::test_support::{bus, test_metadata};
    use crate::domain::user::SystemRole;

    fn command(email: &str) -> RegisterUserCommand {
        RegisterUserCommand {
            email: email.to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
        }
    }

    #[tokio::test]
    async fn registers_active_user_with_default_role() {
        let repo = Arc::new(InMemoryUserRepository::new());
        let publisher = bus();
        let handler = RegisterUserHandler::new(repo.clone(), publisher.clone());

        let result = handler
            .handle(command(" Ada@Example.com "), test_metadata())
            .await
            .unwrap();

        assert_eq!(result.user.email().as_str(), "ada@example.com");
        assert_eq!(result.user.system_role(), SystemRole::User);
        assert!(result.user.is_active());
        assert!(repo.find_by_id(result.user.id()).await.unwrap().is_some());
        assert!(publisher.has_event("user.registered.v1"));
    }

    #[tokio::test]
    async fn duplicate_email_differing_in_case_is_rejected() {
        let repo = Arc::new(InMemoryUserRepository::new());
        let publisher = bus();
        let handler = RegisterUserHandler::new(repo, publisher.clone());

        handler.handle(command("ada@example.com"), test_metadata()).await.unwrap();
        let err = handler
            .handle(command("ADA@example.com"), test_metadata())
            .await
            .unwrap_err();

        assert_eq!(err, UserError::duplicate_email("ada@example.com"));
        assert_eq!(publisher.event_count(), 1);
    }

    #[tokio::test]
    async fn invalid_email_is_a_validation_error() {
        let handler = RegisterUserHandler::new(Arc::new(InMemoryUserRepository::new()), bus());

        let err = handler
            .handle(command("not-an-email"), test_metadata())
            .await
            .unwrap_err();

        assert!(matches!(err, UserError::ValidationFailed { ref field, .. } if field == "email"));
    }
}
