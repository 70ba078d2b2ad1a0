use thiserror::Error;

use crate::user::errors::UserError;

/// Error for password policy violations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordPolicyError {
    #[error("Password too short: minimum {min} characters, got {actual}")]
    TooShort { min: usize, actual: usize },

    #[error("Password too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Top-level error for registration, login and token handling
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    #[error("Email already registered")]
    EmailAlreadyRegistered(String),

    /// Unknown email and wrong password both map here, with one message.
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Token generation failed: {0}")]
    TokenGenerationFailed(String),

    #[error(transparent)]
    User(#[from] UserError),
}
