use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, patch};
use axum::{Json, Router};

use roster_core::ServiceError;

use crate::api::AppState;
use crate::model::{PasswordChange, Staff, StaffInput, StaffPatch};

/// Body and path extractors whose rejections convert into `ServiceError`.
type Body<T> = Result<Json<T>, JsonRejection>;
type Id = Result<Path<i64>, PathRejection>;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/staff", get(list_staff).post(create_staff))
        .route(
            "/staff/{id}",
            get(get_staff)
                .put(replace_staff)
                .patch(update_staff)
                .delete(delete_staff),
        )
        .route("/staff/{id}/change-password", patch(change_password))
}

async fn list_staff(State(svc): State<AppState>) -> Result<Json<Vec<Staff>>, ServiceError> {
    let staff = svc.list_staff().map_err(ServiceError::from)?;
    Ok(Json(staff))
}

async fn create_staff(
    State(svc): State<AppState>,
    body: Body<StaffInput>,
) -> Result<(StatusCode, Json<Staff>), ServiceError> {
    let Json(input) = body?;
    let staff = svc.create_staff(input).await.map_err(ServiceError::from)?;
    Ok((StatusCode::CREATED, Json(staff)))
}

async fn get_staff(
    State(svc): State<AppState>,
    id: Id,
) -> Result<Json<Staff>, ServiceError> {
    let Path(id) = id?;
    let staff = svc.get_staff(id).map_err(ServiceError::from)?;
    Ok(Json(staff))
}

async fn replace_staff(
    State(svc): State<AppState>,
    id: Id,
    body: Body<StaffInput>,
) -> Result<Json<Staff>, ServiceError> {
    let Path(id) = id?;
    let Json(input) = body?;
    let staff = svc.replace_staff(id, input).await.map_err(ServiceError::from)?;
    Ok(Json(staff))
}

async fn update_staff(
    State(svc): State<AppState>,
    id: Id,
    body: Body<StaffPatch>,
) -> Result<Json<Staff>, ServiceError> {
    let Path(id) = id?;
    let Json(changes) = body?;
    let staff = svc.update_staff(id, changes).await.map_err(ServiceError::from)?;
    Ok(Json(staff))
}

async fn delete_staff(
    State(svc): State<AppState>,
    id: Id,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let Path(id) = id?;
    let staff = svc.delete_staff(id).map_err(ServiceError::from)?;
    Ok(Json(serde_json::json!({
        "message": "Staff deleted successfully",
        "staff": staff,
    })))
}

async fn change_password(
    State(svc): State<AppState>,
    id: Id,
    body: Body<PasswordChange>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let Path(id) = id?;
    let Json(change) = body?;
    svc.change_password(id, change).await.map_err(ServiceError::from)?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Password changed successfully",
    })))
}
