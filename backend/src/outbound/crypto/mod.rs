//! Cryptographic adapters.

mod argon2_password_service;

pub use argon2_password_service::Argon2PasswordService;
