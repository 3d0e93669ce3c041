//! Staff module: one REST resource with hashed credentials.
//!
//! # Resources
//!
//! - **Staff**: a staff member with contact details, an optional date of
//!   birth, and an argon2id password hash
//!
//! Writes normalize `dateOfBirth` and hash passwords before they reach the
//! store; `PATCH /staff/{id}/change-password` rotates a password only after
//! the old one verifies.
//!
//! # Usage
//!
//! ```ignore
//! use staff::{StaffModule, service::PasswordConfig, store::SqliteStaffStore};
//!
//! let store = Arc::new(SqliteStaffStore::open(&path)?);
//! let module = StaffModule::new(store, PasswordConfig::default())?;
//! let router = module.routes(); // serves /staff
//! ```

pub mod api;
pub mod model;
pub mod service;
pub mod store;

use std::sync::Arc;

use axum::Router;

use roster_core::{Module, ServiceError};

use crate::service::{PasswordConfig, StaffService};
use crate::store::StaffStore;

/// Staff module implementing the Module trait.
pub struct StaffModule {
    service: Arc<StaffService>,
}

impl StaffModule {
    pub fn new(store: Arc<dyn StaffStore>, config: PasswordConfig) -> Result<Self, ServiceError> {
        let service = StaffService::new(store, config).map_err(ServiceError::from)?;
        Ok(Self { service })
    }

    pub fn service(&self) -> &Arc<StaffService> {
        &self.service
    }
}

impl Module for StaffModule {
    fn name(&self) -> &str {
        "staff"
    }

    fn routes(&self) -> Router {
        api::build_router(self.service.clone())
    }
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use super::*;
    use crate::service::testing::{input, low_cost};
    use crate::store::SqliteStaffStore;

    #[tokio::test]
    async fn module_routes_share_its_service() {
        let store = Arc::new(SqliteStaffStore::open_in_memory().unwrap());
        let module = StaffModule::new(store, low_cost()).unwrap();
        assert_eq!(module.name(), "staff");

        let created = module
            .service()
            .create_staff(input("Grace", "pw"))
            .await
            .unwrap();

        let req = Request::builder()
            .uri(format!("/staff/{}", created.id))
            .body(Body::empty())
            .unwrap();
        let resp = module.routes().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(resp.into_body(), 1024 * 1024)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["name"], "Grace");
    }

    #[test]
    fn module_rejects_invalid_cost() {
        let store = Arc::new(SqliteStaffStore::open_in_memory().unwrap());
        let config = PasswordConfig {
            memory_kib: 1,
            iterations: 0,
            parallelism: 0,
        };
        let err = StaffModule::new(store, config).err().unwrap();
        assert_eq!(err.error_code(), "INTERNAL");
    }
}
