mod dto;
pub mod handlers;
#[cfg(test)]
pub(crate) mod memory;
pub mod repo;
pub mod repo_types;
pub mod services;

pub use dto::{DeletedResponse, MachineRequest};

use crate::{auth::require_bearer, state::AppState};
use axum::{middleware, Router};

/// Every machine route sits behind the bearer guard.
pub fn router(state: &AppState) -> Router<AppState> {
    Router::new()
        .merge(handlers::read_routes())
        .merge(handlers::write_routes())
        .route_layer(middleware::from_fn_with_state(
            state.tokens.clone(),
            require_bearer,
        ))
}
