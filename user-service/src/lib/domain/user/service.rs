use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::user::models::PublicUser;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for user management.
///
/// Concrete implementation of UserServicePort with dependency injection.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    pub fn new(repository: Arc<UR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn me(&self, user_id: &UserId) -> Result<PublicUser, UserError> {
        self.get_by_id(user_id).await
    }

    async fn list(&self) -> Result<Vec<PublicUser>, UserError> {
        let users = self.repository.list_all().await?;
        Ok(users.into_iter().map(PublicUser::from).collect())
    }

    async fn get_by_id(&self, id: &UserId) -> Result<PublicUser, UserError> {
        self.repository
            .find_by_id(id)
            .await?
            .map(PublicUser::from)
            .ok_or(UserError::NotFound(id.to_string()))
    }

    async fn update_by_id(
        &self,
        id: &UserId,
        command: UpdateUserCommand,
    ) -> Result<PublicUser, UserError> {
        // Store failures are reported as NotFound, same as a missing id.
        match self.repository.update(id, &command).await {
            Ok(Some(user)) => {
                tracing::info!(
                    user_id = %id,
                    name_changed = command.name.is_some(),
                    role = ?command.role,
                    "User updated"
                );
                Ok(user.into())
            }
            Ok(None) => Err(UserError::NotFound(id.to_string())),
            Err(e) => {
                tracing::warn!(user_id = %id, error = %e, "User update failed");
                Err(UserError::NotFound(id.to_string()))
            }
        }
    }

    async fn delete_by_id(&self, id: &UserId) -> Result<(), UserError> {
        match self.repository.delete(id).await {
            Ok(true) => {
                tracing::info!(user_id = %id, "User deleted");
                Ok(())
            }
            Ok(false) => Err(UserError::NotFound(id.to_string())),
            Err(e) => {
                tracing::warn!(user_id = %id, error = %e, "User deletion failed");
                Err(UserError::NotFound(id.to_string()))
            }
        }
    }
}
