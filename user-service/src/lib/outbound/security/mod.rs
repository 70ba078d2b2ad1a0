pub mod password;
pub mod token;

pub use password::Argon2CredentialHasher;
pub use token::JwtTokenService;
