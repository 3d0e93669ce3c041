mod staff;


use std::sync::Arc;

use axum::Router;

use crate::service::StaffService;

/// Shared application state.
pub type AppState = Arc<StaffService>;

/// Build the staff API router, mounted at `/staff`.
pub fn build_router(svc: Arc<StaffService>) -> Router {
    Router::new().merge(staff::routes()).with_state(svc)
}
