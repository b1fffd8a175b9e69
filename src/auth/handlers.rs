use axum::{
    extract::{rejection::JsonRejection, State},
    routing::{get, post},
    Json, Router,
};
use tracing::instrument;

use crate::{
    auth::{
        dto::{LoginRequest, SignupRequest, TokenResponse},
        extractors::AuthenticatedPrincipal,
    },
    error::ApiError,
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/signup", post(signup))
        .route("/auth/login", post(login))
}

/// Needs the bearer guard layered on by the caller.
pub fn me_routes() -> Router<AppState> {
    Router::new().route("/me", get(get_me))
}

#[instrument(skip(state, payload))]
pub async fn signup(
    State(state): State<AppState>,
    payload: Result<Json<SignupRequest>, JsonRejection>,
) -> Result<Json<TokenResponse>, ApiError> {
    let Json(payload) = payload?;
    let access_token = state.auth.signup(&payload.email, &payload.password).await?;
    Ok(Json(TokenResponse { access_token }))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<TokenResponse>, ApiError> {
    let Json(payload) = payload?;
    let access_token = state.auth.login(&payload.email, &payload.password).await?;
    Ok(Json(TokenResponse { access_token }))
}

#[instrument(skip_all, fields(user_id = %principal.id))]
pub async fn get_me(principal: AuthenticatedPrincipal) -> Json<AuthenticatedPrincipal> {
    Json(principal)
}
