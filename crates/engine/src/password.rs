//! Password hashing with argon2 (PHC string format).

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use crate::{EngineError, ResultEngine};

pub(crate) fn hash_password(password: &str) -> ResultEngine<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| EngineError::PasswordHash(err.to_string()))
}

/// Returns `false` on a mismatch; a stored hash that cannot be parsed is an
/// error.
pub(crate) fn verify_password(password: &str, hash: &str) -> ResultEngine<bool> {
    let parsed = PasswordHash::new(hash).map_err(|err| {
        tracing::error!("failed to parse stored password hash: {err}");
        EngineError::PasswordHash(err.to_string())
    })?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}
