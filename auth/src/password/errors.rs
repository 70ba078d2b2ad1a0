use thiserror::Error;

/// Error type for password operations.
#[derive(Debug, Clone, Error)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Hash cost out of range: expected {min}-{max}, got {actual}")]
    InvalidCost { min: u32, max: u32, actual: u32 },
}
