use crate::domain::error::{AppError, Result};

/// Default bcrypt cost factor; matches the system-wide account default.
pub const DEFAULT_COST: u32 = 10;

/// One-way credential hashing for imported accounts.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn hash(&self, plaintext: &str) -> Result<String> {
        bcrypt::hash(plaintext, self.cost)
            .map_err(|e| AppError::HashError(format!("Failed to hash password: {}", e)))
    }

    pub fn verify(&self, plaintext: &str, hash: &str) -> Result<bool> {
        bcrypt::verify(plaintext, hash)
            .map_err(|e| AppError::HashError(format!("Failed to verify password: {}", e)))
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new(DEFAULT_COST)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // bcrypt's minimum cost keeps the tests fast
    fn hasher() -> PasswordHasher {
        PasswordHasher::new(4)
    }

    #[test]
    fn test_hash_and_verify_round_trip() {
        let h = hasher();
        let hash = h.hash("CS-101@123").unwrap();
        assert_ne!(hash, "CS-101@123");
        assert!(h.verify("CS-101@123", &hash).unwrap());
        assert!(!h.verify("wrong", &hash).unwrap());
    }

    #[test]
    fn test_hashes_are_salted() {
        let h = hasher();
        let a = h.hash("secret").unwrap();
        let b = h.hash("secret").unwrap();
        assert_ne!(a, b);
    }
}
