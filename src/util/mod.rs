//! Shared utilities

use rand::RngCore;
use rand::rngs::OsRng;

const PASSWORD_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Generate a random alphanumeric password of the given length from OS
/// entropy. Fails only if the entropy source does.
pub fn generate_password(length: usize) -> Result<String, rand::Error> {
    let mut bytes = vec![0u8; length];
    OsRng.try_fill_bytes(&mut bytes)?;
    Ok(bytes
        .iter()
        .map(|b| PASSWORD_CHARSET[*b as usize % PASSWORD_CHARSET.len()] as char)
        .collect())
}
