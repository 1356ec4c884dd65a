//! Salted password hashing.
//!
//! Argon2id (default parameters) over the UTF-8 password bytes and a 16-byte
//! random salt, producing a 32-byte raw hash. Salt and hash are stored as
//! separate BLOB columns.

use argon2::Argon2;
use subtle::ConstantTimeEq;

use crate::error::{Result, UserError};

pub const SALT_LEN: usize = 16;
pub const HASH_LEN: usize = 32;

/// Fresh random salt for a new account.
pub fn generate_salt() -> [u8; SALT_LEN] {
    rand::random()
}

pub fn hash_password(password: &str, salt: &[u8]) -> Result<Vec<u8>> {
    let mut out = vec![0u8; HASH_LEN];
    Argon2::default()
        .hash_password_into(password.as_bytes(), salt, &mut out)
        .map_err(|e| UserError::Hashing(e.to_string()))?;
    Ok(out)
}

/// Recompute the hash and compare it to `expected` in constant time.
pub fn verify_password(password: &str, salt: &[u8], expected: &[u8]) -> Result<bool> {
    let actual = hash_password(password, salt)?;
    Ok(actual.ct_eq(expected).into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_password_and_salt_hash_identically() {
        let salt = generate_salt();
        let a = hash_password("hunter2", &salt).unwrap();
        let b = hash_password("hunter2", &salt).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), HASH_LEN);
    }

    #[test]
    fn different_salts_give_different_hashes() {
        let a = hash_password("hunter2", &generate_salt()).unwrap();
        let b = hash_password("hunter2", &generate_salt()).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn verify_accepts_right_password_only() {
        let salt = generate_salt();
        let hash = hash_password("correct horse", &salt).unwrap();
        assert!(verify_password("correct horse", &salt, &hash).unwrap());
        assert!(!verify_password("Correct horse", &salt, &hash).unwrap());
        assert!(!verify_password("", &salt, &hash).unwrap());
    }

    #[test]
    fn truncated_stored_hash_never_matches() {
        let salt = generate_salt();
        let hash = hash_password("pw", &salt).unwrap();
        assert!(!verify_password("pw", &salt, &hash[..HASH_LEN - 1]).unwrap());
        assert!(!verify_password("pw", &salt, &[]).unwrap());
    }

    #[test]
    fn short_salt_is_rejected() {
        assert!(matches!(
            hash_password("pw", b"abc"),
            Err(UserError::Hashing(_))
        ));
    }
}
