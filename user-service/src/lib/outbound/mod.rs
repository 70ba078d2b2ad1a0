pub mod repositories;
pub mod security;
