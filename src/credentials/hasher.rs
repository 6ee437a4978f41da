//! Argon2id credential hasher
//!
//! ## Invariants
//! - Stored credentials are only ever Argon2id PHC strings
//! - Verification compares in constant time (inside the argon2 crate)

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};

use super::errors::{HashingError, HashingResult};

/// 64 MiB
pub const DEFAULT_MEMORY_COST_KIB: u32 = 65536;
pub const DEFAULT_TIME_COST: u32 = 4;
pub const DEFAULT_PARALLELISM: u32 = 3;

/// Argon2id hasher with cost parameters fixed at construction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CredentialHasher {
    memory_cost_kib: u32,
    time_cost: u32,
    parallelism: u32,
}

impl Default for CredentialHasher {
    fn default() -> Self {
        Self {
            memory_cost_kib: DEFAULT_MEMORY_COST_KIB,
            time_cost: DEFAULT_TIME_COST,
            parallelism: DEFAULT_PARALLELISM,
        }
    }
}

impl CredentialHasher {
    /// Hasher with the default production costs
    pub fn new() -> Self {
        Self::default()
    }

    /// Hasher with explicit costs. Fails if Argon2 rejects the combination
    /// (for example memory below `8 * parallelism` KiB).
    pub fn with_params(
        memory_cost_kib: u32,
        time_cost: u32,
        parallelism: u32,
    ) -> HashingResult<Self> {
        let hasher = Self {
            memory_cost_kib,
            time_cost,
            parallelism,
        };
        hasher.params()?;
        Ok(hasher)
    }

    pub fn memory_cost_kib(&self) -> u32 {
        self.memory_cost_kib
    }

    pub fn time_cost(&self) -> u32 {
        self.time_cost
    }

    pub fn parallelism(&self) -> u32 {
        self.parallelism
    }

    fn params(&self) -> HashingResult<Params> {
        Params::new(self.memory_cost_kib, self.time_cost, self.parallelism, None)
            .map_err(|e| HashingError::InvalidParams(e.to_string()))
    }

    fn argon2(&self) -> HashingResult<Argon2<'static>> {
        Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params()?))
    }

    /// Hash a password with a fresh random salt.
    pub fn hash(&self, password: &str) -> HashingResult<String> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2()?
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| HashingError::Failed(e.to_string()))
    }

    /// Verify a password against a stored hash.
    ///
    /// A malformed hash never matches.
    pub fn verify(&self, password: &str, hash: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(hash) else {
            return false;
        };

        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }

    /// Whether a stored hash was produced by a different algorithm or
    /// version, or with any cost below this hasher's.
    ///
    /// Unparseable hashes always need rehashing.
    pub fn needs_rehash(&self, hash: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(hash) else {
            return true;
        };

        if parsed.algorithm != Algorithm::Argon2id.ident() {
            return true;
        }

        if parsed.version != Some(Version::V0x13 as u32) {
            return true;
        }

        match Params::try_from(&parsed) {
            Ok(params) => {
                params.m_cost() < self.memory_cost_kib
                    || params.t_cost() < self.time_cost
                    || params.p_cost() < self.parallelism
            }
            Err(_) => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cheap() -> CredentialHasher {
        CredentialHasher::with_params(64, 1, 1).unwrap()
    }

    #[test]
    fn test_hash_and_verify() {
        let hasher = cheap();
        let hash = hasher.hash("SecurePass123").unwrap();

        assert_ne!(hash, "SecurePass123");
        assert!(hash.starts_with("$argon2id$v=19$"));
        assert!(hasher.verify("SecurePass123", &hash));
        assert!(!hasher.verify("SecurePass124", &hash));
    }

    #[test]
    fn test_hashes_are_salted() {
        let hasher = cheap();
        let hash1 = hasher.hash("SecurePass123").unwrap();
        let hash2 = hasher.hash("SecurePass123").unwrap();

        assert_ne!(hash1, hash2);
        assert!(hasher.verify("SecurePass123", &hash1));
        assert!(hasher.verify("SecurePass123", &hash2));
    }

    #[test]
    fn test_default_params_encoded_in_hash() {
        let hash = CredentialHasher::new().hash("SecurePass123").unwrap();
        assert!(hash.contains("m=65536,t=4,p=3"));
    }

    #[test]
    fn test_verify_malformed_hash_is_false() {
        assert!(!cheap().verify("SecurePass123", "not-a-hash"));
        assert!(!cheap().verify("SecurePass123", ""));
    }

    #[test]
    fn test_verify_uses_params_from_hash() {
        let weak = cheap();
        let strong = CredentialHasher::with_params(128, 2, 1).unwrap();
        let hash = weak.hash("SecurePass123").unwrap();
        assert!(strong.verify("SecurePass123", &hash));
    }

    #[test]
    fn test_needs_rehash() {
        let weak = cheap();
        let strong = CredentialHasher::with_params(128, 2, 1).unwrap();
        let hash = weak.hash("SecurePass123").unwrap();

        assert!(!weak.needs_rehash(&hash));
        assert!(strong.needs_rehash(&hash));
        assert!(!weak.needs_rehash(&strong.hash("SecurePass123").unwrap()));
        assert!(weak.needs_rehash("garbage"));
    }

    #[test]
    fn test_needs_rehash_other_algorithm() {
        let params = Params::new(64, 1, 1, None).unwrap();
        let argon2i = Argon2::new(Algorithm::Argon2i, Version::V0x13, params);
        let salt = SaltString::generate(&mut OsRng);
        let hash = argon2i
            .hash_password(b"SecurePass123", &salt)
            .unwrap()
            .to_string();

        assert!(cheap().needs_rehash(&hash));
    }

    #[test]
    fn test_invalid_params_rejected() {
        assert!(matches!(
            CredentialHasher::with_params(1, 1, 1),
            Err(HashingError::InvalidParams(_))
        ));
        assert!(matches!(
            CredentialHasher::with_params(64, 0, 1),
            Err(HashingError::InvalidParams(_))
        ));
    }
}
