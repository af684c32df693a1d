//! Password hashing with Argon2.
//!
//! Every hash gets a fresh random salt, so hashing the same password twice
//! yields two different PHC strings that both verify.

use argon2::{
    Argon2,
    password_hash::{
        PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng,
    },
};

use crate::{EngineError, ResultEngine};

/// Hash a password into a PHC string.
pub(crate) fn hash(password: &str) -> ResultEngine<String> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| EngineError::PasswordHash(err.to_string()))
}

/// Verify a password against a stored PHC string.
///
/// A stored value that is not a valid PHC string never verifies.
pub(crate) fn verify(password: &str, hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(hash) else {
        return false;
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}
