use argon2::password_hash::SaltString;
use argon2::password_hash::rand_core::OsRng;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use color_eyre::eyre::eyre;

/// Verify a password against a PHC hash string.
///
/// # Errors
///
/// * The stored hash string cannot be parsed.
pub fn verify_password(password: &[u8], hash: &str) -> color_eyre::Result<bool> {
    let parsed_hash = PasswordHash::new(hash).map_err(|e| eyre!("Invalid password hash: {e}"))?;
    let verified = Argon2::default()
        .verify_password(password, &parsed_hash)
        .is_ok();
    Ok(verified)
}

/// Hash a password with Argon2 and a fresh random salt.
///
/// # Errors
///
/// * `Argon2::hash_password` fails.
pub fn hash_password(password: &[u8]) -> color_eyre::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(password, &salt)
        .map_err(|e| eyre!("Could not hash password: {e}"))?
        .to_string();
    Ok(password_hash)
}
