use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::warn;
use uuid::Uuid;

use super::{jwt::TokenIssuer, services::AuthError};
use crate::error::ApiError;

/// Identity attached to a request once its bearer token has been validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthenticatedPrincipal {
    pub id: Uuid,
    pub email: String,
}

/// Guard for protected routers. Rejects with a uniform 401 unless the request
/// carries a valid `Authorization: Bearer <token>`; otherwise stores the
/// principal in the request extensions and runs the handler.
pub async fn require_bearer(
    State(tokens): State<TokenIssuer>,
    mut req: Request,
    next: Next,
) -> Response {
    let Some(token) = bearer_token(req.headers()) else {
        warn!(uri = %req.uri(), "missing or malformed Authorization header");
        return ApiError::Unauthorized.into_response();
    };

    match tokens.validate(token) {
        Ok(principal) => {
            req.extensions_mut().insert(principal);
            next.run(req).await
        }
        Err(e) => {
            warn!(error = %e, uri = %req.uri(), "bearer token rejected");
            ApiError::from(AuthError::from(e)).into_response()
        }
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedPrincipal
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    /// Only succeeds behind [`require_bearer`]; a route that forgot the
    /// guard fails closed.
    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedPrincipal>()
            .cloned()
            .ok_or(ApiError::Unauthorized)
    }
}
