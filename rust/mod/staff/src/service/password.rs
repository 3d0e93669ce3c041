//! Password hashing with argon2id.
//!
//! Each hash carries its own random salt and cost parameters (PHC string
//! format), so verification never depends on the currently configured cost.

use argon2::{Algorithm, Argon2, Params, Version};
use password_hash::rand_core::OsRng;
use password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use serde::Deserialize;

use crate::service::StaffError;

/// Argon2 work factor. Raising any value makes every new hash more expensive.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PasswordConfig {
    /// Memory cost in KiB.
    pub memory_kib: u32,
    /// Number of passes.
    pub iterations: u32,
    /// Degree of parallelism (lanes).
    pub parallelism: u32,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            memory_kib: Params::DEFAULT_M_COST,
            iterations: Params::DEFAULT_T_COST,
            parallelism: Params::DEFAULT_P_COST,
        }
    }
}

impl PasswordConfig {
    /// Validate the parameters against argon2's limits.
    pub fn params(&self) -> Result<Params, StaffError> {
        Params::new(self.memory_kib, self.iterations, self.parallelism, None)
            .map_err(|e| StaffError::Hashing(format!("invalid argon2 parameters: {}", e)))
    }
}

/// Hashes and verifies passwords. Cheap to clone; holds only parameters.
#[derive(Debug, Clone)]
pub struct Credentials {
    params: Params,
}

impl Credentials {
    pub fn new(config: &PasswordConfig) -> Result<Self, StaffError> {
        Ok(Self {
            params: config.params()?,
        })
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    /// Derive a salted hash. Two calls with the same plaintext never agree.
    pub fn hash(&self, plaintext: &str) -> Result<String, StaffError> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon2()
            .hash_password(plaintext.as_bytes(), &salt)
            .map(|h| h.to_string())
            .map_err(|e| StaffError::Hashing(e.to_string()))
    }

    /// Check a plaintext against a stored hash.
    ///
    /// The output comparison is constant-time. A stored value that is not a
    /// valid PHC string is an error, not a mismatch.
    pub fn verify(&self, plaintext: &str, hash: &str) -> Result<bool, StaffError> {
        let parsed = PasswordHash::new(hash)
            .map_err(|e| StaffError::Hashing(format!("stored hash is unreadable: {}", e)))?;
        match self.argon2().verify_password(plaintext.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(e) => Err(StaffError::Hashing(e.to_string())),
        }
    }
}
