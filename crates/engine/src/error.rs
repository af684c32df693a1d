//! The module contains the error the engine can throw.
//!
//! The errors are:
//!
//! - [`InvalidInput`] thrown when a required field is missing or malformed.
//! - [`InvalidReport`] thrown when a report entry cannot be applied to a data
//!   set slot.
//! - [`KeyNotFound`] thrown when an item is not found or an update matched
//!   nothing.
//! - [`ExistingKey`] thrown when a unique key is already taken.
//! - [`Unauthorized`] thrown when credentials do not match.
//!
//!  [`InvalidInput`]: EngineError::InvalidInput
//!  [`InvalidReport`]: EngineError::InvalidReport
//!  [`KeyNotFound`]: EngineError::KeyNotFound
//!  [`ExistingKey`]: EngineError::ExistingKey
//!  [`Unauthorized`]: EngineError::Unauthorized
use sea_orm::DbErr;
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Invalid report: {0}")]
    InvalidReport(String),
    #[error("\"{0}\" key not found!")]
    KeyNotFound(String),
    #[error("\"{0}\" already present!")]
    ExistingKey(String),
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    #[error("Password hashing failed: {0}")]
    PasswordHash(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::InvalidInput(a), Self::InvalidInput(b)) => a == b,
            (Self::InvalidReport(a), Self::InvalidReport(b)) => a == b,
            (Self::KeyNotFound(a), Self::KeyNotFound(b)) => a == b,
            (Self::ExistingKey(a), Self::ExistingKey(b)) => a == b,
            (Self::Unauthorized(a), Self::Unauthorized(b)) => a == b,
            (Self::PasswordHash(a), Self::PasswordHash(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
