pub mod date;
pub mod password;
pub mod rotation;
mod staff;

use std::sync::Arc;

use thiserror::Error;

use crate::store::{StaffStore, StoreError};

pub use date::normalize_date;
pub use password::{Credentials, PasswordConfig};
pub use rotation::{Rejection, RotationState};

/// Staff service error type.
#[derive(Debug, Error)]
pub enum StaffError {
    #[error("malformed date {0}")]
    MalformedDate(String),

    #[error("staff {0} not found")]
    NotFound(i64),

    #[error("old password is incorrect")]
    CredentialMismatch,

    #[error("password hashing: {0}")]
    Hashing(String),

    #[error("storage: {0}")]
    Backend(String),

    #[error("internal: {0}")]
    Internal(String),
}

impl From<StoreError> for StaffError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(id) => StaffError::NotFound(id),
            StoreError::Backend(m) => StaffError::Backend(m),
        }
    }
}

impl From<StaffError> for roster_core::ServiceError {
    fn from(e: StaffError) -> Self {
        use roster_core::ServiceError;

        let message = e.to_string();
        match e {
            StaffError::MalformedDate(_) => ServiceError::Validation(message),
            StaffError::NotFound(_) => ServiceError::NotFound(message),
            StaffError::CredentialMismatch => ServiceError::CredentialMismatch(message),
            StaffError::Backend(_) => ServiceError::Storage(message),
            StaffError::Hashing(_) | StaffError::Internal(_) => ServiceError::Internal(message),
        }
    }
}

/// The staff service. Holds the injected store and the password hasher.
pub struct StaffService {
    pub(crate) store: Arc<dyn StaffStore>,
    pub(crate) credentials: Credentials,
}

impl StaffService {
    pub fn new(store: Arc<dyn StaffStore>, config: PasswordConfig) -> Result<Arc<Self>, StaffError> {
        let credentials = Credentials::new(&config)?;
        Ok(Arc::new(Self { store, credentials }))
    }

    // ── Argon2 runs on the blocking pool, off the async workers ──

    pub(crate) async fn hash_password(&self, plaintext: String) -> Result<String, StaffError> {
        let credentials = self.credentials.clone();
        tokio::task::spawn_blocking(move || credentials.hash(&plaintext))
            .await
            .map_err(|e| StaffError::Internal(format!("hash task failed: {}", e)))?
    }

    pub(crate) async fn verify_password(
        &self,
        plaintext: String,
        hash: String,
    ) -> Result<bool, StaffError> {
        let credentials = self.credentials.clone();
        tokio::task::spawn_blocking(move || credentials.verify(&plaintext, &hash))
            .await
            .map_err(|e| StaffError::Internal(format!("verify task failed: {}", e)))?
    }
}


#[cfg(test)]
mod tests {
    use roster_core::ServiceError;

    use super::*;

    #[test]
    fn test_error_mapping() {
        let se: ServiceError = StaffError::MalformedDate("'x'".into()).into();
        assert_eq!(se.error_code(), "VALIDATION_FAILED");

        let se: ServiceError = StaffError::NotFound(3).into();
        assert_eq!(se.error_code(), "NOT_FOUND");
        assert_eq!(se.to_string(), "staff 3 not found");

        let se: ServiceError = StaffError::CredentialMismatch.into();
        assert_eq!(se.error_code(), "CREDENTIAL_MISMATCH");

        let se: ServiceError = StaffError::Backend("disk full".into()).into();
        assert_eq!(se.error_code(), "STORAGE_ERROR");

        let se: ServiceError = StaffError::Hashing("bad".into()).into();
        assert_eq!(se.error_code(), "INTERNAL");
    }

    #[test]
    fn test_store_error_conversion() {
        assert!(matches!(
            StaffError::from(StoreError::NotFound(5)),
            StaffError::NotFound(5)
        ));
        assert!(matches!(
            StaffError::from(StoreError::Backend("x".into())),
            StaffError::Backend(_)
        ));
    }

    #[test]
    fn test_new_rejects_bad_params() {
        let store = Arc::new(crate::store::SqliteStaffStore::open_in_memory().unwrap());
        let config = PasswordConfig {
            memory_kib: 0,
            iterations: 0,
            parallelism: 0,
        };
        assert!(matches!(
            StaffService::new(store, config),
            Err(StaffError::Hashing(_))
        ));
    }
}
