use crate::state::AppState;
use axum::{middleware, Router};

mod claims;
pub mod dto;
pub mod extractors;
pub mod handlers;
pub mod jwt;
#[cfg(test)]
pub(crate) mod memory;
pub mod password;
pub mod repo;
pub mod repo_types;
pub mod services;

pub use extractors::{require_bearer, AuthenticatedPrincipal};

/// Public auth endpoints.
pub fn router() -> Router<AppState> {
    handlers::auth_routes()
}

/// Routes that require a bearer token.
pub fn protected_router(state: &AppState) -> Router<AppState> {
    handlers::me_routes().route_layer(middleware::from_fn_with_state(
        state.tokens.clone(),
        require_bearer,
    ))
}
