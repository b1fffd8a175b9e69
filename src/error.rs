use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::{auth::services::AuthError, machines::services::MachineError};

/// Error returned by every handler. Bodies never carry store or crypto details.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("Unauthorized")]
    Unauthorized,
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("Service temporarily unavailable")]
    Unavailable,
    #[error("Internal server error")]
    Internal,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub status_code: u16,
    pub message: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized | ApiError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorBody {
            status_code: status.as_u16(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::InvalidCredentials => ApiError::InvalidCredentials,
            AuthError::DuplicateAccount => {
                ApiError::Conflict("User with this email already exists".into())
            }
            AuthError::Validation(msg) => ApiError::BadRequest(msg),
            AuthError::Token(_) => ApiError::Unauthorized,
            AuthError::TransientFailure => ApiError::Unavailable,
            AuthError::Internal => ApiError::Internal,
        }
    }
}

impl From<MachineError> for ApiError {
    fn from(e: MachineError) -> Self {
        match e {
            MachineError::NotFound(id) => ApiError::NotFound(format!("Machine with ID {id} not found")),
            MachineError::Validation(msg) => ApiError::BadRequest(msg),
            MachineError::TransientFailure => ApiError::Unavailable,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(e: JsonRejection) -> Self {
        ApiError::BadRequest(e.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::jwt::TokenError;

    #[test]
    fn token_failures_collapse_to_unauthorized() {
        for e in [TokenError::Expired, TokenError::InvalidSignature] {
            let api = ApiError::from(AuthError::Token(e));
            assert_eq!(api.status(), StatusCode::UNAUTHORIZED);
            assert_eq!(api.to_string(), "Unauthorized");
        }
    }

    #[test]
    fn auth_errors_map_to_statuses() {
        assert_eq!(ApiError::from(AuthError::InvalidCredentials).status(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::from(AuthError::DuplicateAccount).status(), StatusCode::CONFLICT);
        assert_eq!(
            ApiError::from(AuthError::Validation("bad".into())).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(AuthError::TransientFailure).status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn body_uses_camel_case_envelope() {
        let body = ErrorBody {
            status_code: 409,
            message: "taken".into(),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json, serde_json::json!({"statusCode": 409, "message": "taken"}));
    }
}
