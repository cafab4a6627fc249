use crate::api::auth::error::AuthError;
use crate::api::auth::hashing::{hash_password, verify_password};
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::{RngCore, rng};

const SELECTOR_LEN: usize = 16;
const TOKEN_LEN: usize = 32;

/// A refresh token as handed to the client, plus what gets stored for it.
pub struct RefreshTokenParts {
    pub raw_token: String,
    pub selector: String,
    pub verifier_hash: String,
}

/// Generates a new refresh token. The first half of the random bytes is the
/// lookup selector, the second half is the secret verifier.
///
/// # Errors
///
/// * `AuthError::Internal` if hashing the verifier fails.
pub fn generate_refresh_token_parts() -> Result<RefreshTokenParts, AuthError> {
    let mut raw_bytes = [0u8; TOKEN_LEN];
    rng().fill_bytes(&mut raw_bytes);

    let (selector_bytes, verifier_bytes) = raw_bytes.split_at(SELECTOR_LEN);

    Ok(RefreshTokenParts {
        raw_token: URL_SAFE_NO_PAD.encode(raw_bytes),
        selector: URL_SAFE_NO_PAD.encode(selector_bytes),
        verifier_hash: hash_password(verifier_bytes)?,
    })
}

/// Splits a raw refresh token into its selector and verifier bytes.
///
/// # Errors
///
/// * `AuthError::InvalidToken` if the token is not base64 or has the wrong length.
pub fn split_refresh_token(token: &str) -> Result<(String, Vec<u8>), AuthError> {
    let bytes = URL_SAFE_NO_PAD
        .decode(token)
        .map_err(|_| AuthError::InvalidToken)?;

    if bytes.len() != TOKEN_LEN {
        return Err(AuthError::InvalidToken);
    }

    let (selector_bytes, verifier_bytes) = bytes.split_at(SELECTOR_LEN);
    Ok((URL_SAFE_NO_PAD.encode(selector_bytes), verifier_bytes.to_vec()))
}

/// Checks verifier bytes against the stored hash.
///
/// # Errors
///
/// * `AuthError::Internal` if the stored hash is malformed.
pub fn verify_token(verifier_bytes: &[u8], verifier_hash: &str) -> Result<bool, AuthError> {
    Ok(verify_password(verifier_bytes, verifier_hash)?)
}
