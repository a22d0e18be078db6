//! Password hashing behind a trait seam
//!
//! The service layer only ever sees the one-way `hash` operation; plaintext
//! never reaches the repository or leaves the process.

use argon2::{Argon2, PasswordHasher, password_hash::SaltString};

use crate::error::{ApiError, ApiResult};

/// One-way password hashing collaborator
pub trait PasswordHashing: Send + Sync {
    /// Hash a plaintext password into an opaque, self-describing string.
    fn hash(&self, plaintext: &str) -> ApiResult<String>;
}

/// Argon2id-backed hasher used in production
#[derive(Debug, Clone, Default)]
pub struct ArgonPasswordHasher;

impl PasswordHashing for ArgonPasswordHasher {
    fn hash(&self, plaintext: &str) -> ApiResult<String> {
        let salt = SaltString::generate(&mut rand::thread_rng());
        let hash = Argon2::default()
            .hash_password(plaintext.as_bytes(), &salt)
            .map_err(|e| ApiError::Internal(format!("Failed to hash password: {}", e)))?;
        Ok(hash.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use argon2::{PasswordHash, PasswordVerifier};

    #[test]
    fn hash_is_opaque_and_verifiable() {
        let hasher = ArgonPasswordHasher;
        let hash = hasher.hash("hunter2abc").unwrap();

        assert_ne!(hash, "hunter2abc");
        assert!(hash.starts_with("$argon2"));

        let parsed = PasswordHash::new(&hash).unwrap();
        assert!(
            Argon2::default()
                .verify_password(b"hunter2abc", &parsed)
                .is_ok()
        );
    }

    #[test]
    fn same_plaintext_hashes_differently_per_salt() {
        let hasher = ArgonPasswordHasher;
        let a = hasher.hash("hunter2abc").unwrap();
        let b = hasher.hash("hunter2abc").unwrap();
        assert_ne!(a, b);
    }
}
