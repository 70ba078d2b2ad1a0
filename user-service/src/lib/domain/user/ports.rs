use async_trait::async_trait;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::PublicUser;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;

/// Port for authenticated user management operations.
///
/// Every operation returns the public projection; password hashes never
/// cross this boundary.
#[async_trait]
pub trait UserServicePort: Send + Sync + 'static {
    /// Retrieve the profile of the calling user.
    ///
    /// # Arguments
    /// * `user_id` - Subject of the caller's identity context
    ///
    /// # Errors
    /// * `NotFound` - User no longer exists
    /// * `DatabaseError` - Database operation failed
    async fn me(&self, user_id: &UserId) -> Result<PublicUser, UserError>;

    /// List every user, oldest first.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list(&self) -> Result<Vec<PublicUser>, UserError>;

    /// Retrieve user by unique identifier.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn get_by_id(&self, id: &UserId) -> Result<PublicUser, UserError>;

    /// Update name and/or role of an existing user.
    ///
    /// # Arguments
    /// * `id` - User ID to update
    /// * `command` - Fields to change; at least one is set
    ///
    /// # Errors
    /// * `NotFound` - User does not exist, or the store failed to apply the change
    async fn update_by_id(
        &self,
        id: &UserId,
        command: UpdateUserCommand,
    ) -> Result<PublicUser, UserError>;

    /// Delete existing user.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist, or the store failed to delete it
    async fn delete_by_id(&self, id: &UserId) -> Result<(), UserError>;
}

/// Persistence operations for user aggregate.
///
/// Implementations are the only point of mutual exclusion: they must enforce
/// email uniqueness on `create` and apply `update`/`delete` atomically per id.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist new user to storage.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, user: User) -> Result<User, UserError>;

    /// Retrieve user by identifier.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;

    /// Retrieve user by exact (case-sensitive) email address.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError>;

    /// Retrieve all users ordered by creation time ascending.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_all(&self) -> Result<Vec<User>, UserError>;

    /// Number of users currently stored.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn count(&self) -> Result<u64, UserError>;

    /// Apply `changes` to the user with `id`.
    ///
    /// # Returns
    /// Updated user entity, or None if no user has this id
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn update(&self, id: &UserId, changes: &UpdateUserCommand)
        -> Result<Option<User>, UserError>;

    /// Remove user from storage.
    ///
    /// # Returns
    /// True if a user was removed
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn delete(&self, id: &UserId) -> Result<bool, UserError>;
}
