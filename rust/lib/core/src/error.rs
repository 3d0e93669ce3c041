use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Codes carried in the `code` field of every error body.
///
/// Roster clients branch on these; `message` is for people.
pub mod error_code {
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const VALIDATION_FAILED: &str = "VALIDATION_FAILED";
    pub const CREDENTIAL_MISMATCH: &str = "CREDENTIAL_MISMATCH";
    pub const STORAGE_ERROR: &str = "STORAGE_ERROR";
    pub const INTERNAL: &str = "INTERNAL";
}

/// Error type shared by every module at the HTTP boundary.
///
/// Module-level errors convert into this; each variant carries a stable
/// code (see [`error_code`]) and an HTTP status:
///
/// ```json
/// {"code": "NOT_FOUND", "message": "staff 42 not found"}
/// ```
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Resource does not exist. HTTP 404.
    #[error("{0}")]
    NotFound(String),

    /// Input data is invalid. HTTP 400.
    #[error("{0}")]
    Validation(String),

    /// A supplied credential did not match the stored one. HTTP 401.
    #[error("{0}")]
    CredentialMismatch(String),

    /// Storage backend failure. HTTP 500.
    #[error("{0}")]
    Storage(String),

    /// Unexpected internal error. HTTP 500.
    #[error("{0}")]
    Internal(String),
}

impl ServiceError {
    pub fn error_code(&self) -> &'static str {
        match self {
            ServiceError::NotFound(_) => error_code::NOT_FOUND,
            ServiceError::Validation(_) => error_code::VALIDATION_FAILED,
            ServiceError::CredentialMismatch(_) => error_code::CREDENTIAL_MISMATCH,
            ServiceError::Storage(_) => error_code::STORAGE_ERROR,
            ServiceError::Internal(_) => error_code::INTERNAL,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
            ServiceError::CredentialMismatch(_) => StatusCode::UNAUTHORIZED,
            ServiceError::Storage(_) | ServiceError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = serde_json::json!({
            "code": self.error_code(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}

/// Malformed request bodies share the validation envelope instead of
/// axum's plain-text rejection.
impl From<JsonRejection> for ServiceError {
    fn from(e: JsonRejection) -> Self {
        ServiceError::Validation(e.body_text())
    }
}

impl From<PathRejection> for ServiceError {
    fn from(e: PathRejection) -> Self {
        ServiceError::Validation(e.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_of(err: ServiceError) -> (StatusCode, serde_json::Value) {
        let resp = err.into_response();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), 64 * 1024)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn credential_mismatch_is_401_with_envelope() {
        let (status, body) =
            body_of(ServiceError::CredentialMismatch("old password is incorrect".into())).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(
            body,
            serde_json::json!({
                "code": "CREDENTIAL_MISMATCH",
                "message": "old password is incorrect",
            })
        );
    }

    #[tokio::test]
    async fn every_variant_maps_to_its_code_and_status() {
        let cases = [
            (ServiceError::NotFound("staff 7 not found".into()), StatusCode::NOT_FOUND, "NOT_FOUND"),
            (
                ServiceError::Validation("malformed date 2024-02-30".into()),
                StatusCode::BAD_REQUEST,
                "VALIDATION_FAILED",
            ),
            (
                ServiceError::Storage("disk I/O error".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
                "STORAGE_ERROR",
            ),
            (
                ServiceError::Internal("hash task failed".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL",
            ),
        ];
        for (err, status, code) in cases {
            let message = err.to_string();
            let (got_status, body) = body_of(err).await;
            assert_eq!(got_status, status, "{code}");
            assert_eq!(body["code"], code);
            assert_eq!(body["message"], message.as_str());
        }
    }
}
