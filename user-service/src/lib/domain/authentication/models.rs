use std::fmt;

use crate::authentication::errors::PasswordPolicyError;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::PublicUser;
use crate::domain::user::models::Role;
use crate::domain::user::models::UserId;
use crate::domain::user::models::UserName;

/// Identity context derived from a verified access token.
///
/// Lives for the duration of one request; never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    pub user_id: UserId,
    pub role: Role,
}

/// Plaintext password supplied by a caller.
///
/// Its `Debug` output is redacted so it cannot end up in logs.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    const MIN_LENGTH: usize = 8;
    const MAX_LENGTH: usize = 200;

    /// Accept a password chosen at registration (8-200 characters).
    ///
    /// # Errors
    /// * `TooShort` / `TooLong` - Length outside the accepted range
    pub fn new(password: String) -> Result<Self, PasswordPolicyError> {
        Self::with_length(password, Self::MIN_LENGTH)
    }

    /// Accept a password presented at login (1-200 characters).
    ///
    /// The registration minimum is not applied here so that a short password
    /// fails as bad credentials rather than as malformed input.
    ///
    /// # Errors
    /// * `TooShort` / `TooLong` - Length outside the accepted range
    pub fn for_login(password: String) -> Result<Self, PasswordPolicyError> {
        Self::with_length(password, 1)
    }

    fn with_length(password: String, min: usize) -> Result<Self, PasswordPolicyError> {
        let length = password.chars().count();
        if length < min {
            Err(PasswordPolicyError::TooShort {
                min,
                actual: length,
            })
        } else if length > Self::MAX_LENGTH {
            Err(PasswordPolicyError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(password))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(<redacted>)")
    }
}

/// Command to register a new account with validated fields.
#[derive(Debug)]
pub struct RegisterCommand {
    pub email: EmailAddress,
    pub name: UserName,
    pub password: Password,
}

impl RegisterCommand {
    pub fn new(email: EmailAddress, name: UserName, password: Password) -> Self {
        Self {
            email,
            name,
            password,
        }
    }
}

/// Command to exchange credentials for an access token.
#[derive(Debug)]
pub struct LoginCommand {
    pub email: EmailAddress,
    pub password: Password,
}

impl LoginCommand {
    pub fn new(email: EmailAddress, password: Password) -> Self {
        Self { email, password }
    }
}

/// Result of a successful registration or login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSession {
    /// Signed bearer token for `user`
    pub token: String,
    pub user: PublicUser,
}
