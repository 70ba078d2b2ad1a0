use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::UserError;

/// Process-local user store. Contents are lost on restart.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<Vec<User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.write().await;

        if users.iter().any(|u| u.email == user.email) {
            return Err(UserError::EmailAlreadyExists(user.email.to_string()));
        }

        users.push(user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.id == *id).cloned())
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.email == *email).cloned())
    }

    async fn list_all(&self) -> Result<Vec<User>, UserError> {
        let mut users = self.users.read().await.clone();
        // Stable sort keeps insertion order for equal timestamps
        users.sort_by_key(|u| u.created_at);
        Ok(users)
    }

    async fn count(&self) -> Result<u64, UserError> {
        Ok(self.users.read().await.len() as u64)
    }

    async fn update(
        &self,
        id: &UserId,
        changes: &UpdateUserCommand,
    ) -> Result<Option<User>, UserError> {
        let mut users = self.users.write().await;

        Ok(users.iter_mut().find(|u| u.id == *id).map(|user| {
            changes.apply_to(user);
            user.clone()
        }))
    }

    async fn delete(&self, id: &UserId) -> Result<bool, UserError> {
        let mut users = self.users.write().await;
        let before = users.len();
        users.retain(|u| u.id != *id);
        Ok(users.len() < before)
    }
}
