use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::instrument;

use super::{
    dto::{DeletedResponse, MachineRequest},
    repo_types::Machine,
};
use crate::{auth::AuthenticatedPrincipal, error::ApiError, state::AppState};

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/machines", get(list_machines))
        .route("/machines/:id", get(get_machine))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/machines", post(create_machine))
        .route(
            "/machines/:id",
            axum::routing::put(update_machine).delete(delete_machine),
        )
        // form-friendly alias of PUT
        .route("/machines/:id/update", post(update_machine))
}

#[instrument(skip_all, fields(user_id = %principal.id))]
pub async fn list_machines(
    State(state): State<AppState>,
    principal: AuthenticatedPrincipal,
) -> Result<Json<Vec<Machine>>, ApiError> {
    Ok(Json(state.machines.list().await?))
}

#[instrument(skip(state, principal), fields(user_id = %principal.id))]
pub async fn get_machine(
    State(state): State<AppState>,
    principal: AuthenticatedPrincipal,
    Path(id): Path<String>,
) -> Result<Json<Machine>, ApiError> {
    Ok(Json(state.machines.get(&id).await?))
}

#[instrument(skip_all, fields(user_id = %principal.id))]
pub async fn create_machine(
    State(state): State<AppState>,
    principal: AuthenticatedPrincipal,
    body: Result<Json<MachineRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Machine>), ApiError> {
    let Json(body) = body?;
    let machine = state.machines.create(body).await?;
    Ok((StatusCode::CREATED, Json(machine)))
}

#[instrument(skip(state, principal, body), fields(user_id = %principal.id))]
pub async fn update_machine(
    State(state): State<AppState>,
    principal: AuthenticatedPrincipal,
    Path(id): Path<String>,
    body: Result<Json<MachineRequest>, JsonRejection>,
) -> Result<Json<Machine>, ApiError> {
    let Json(body) = body?;
    Ok(Json(state.machines.update(&id, body).await?))
}

#[instrument(skip(state, principal), fields(user_id = %principal.id))]
pub async fn delete_machine(
    State(state): State<AppState>,
    principal: AuthenticatedPrincipal,
    Path(id): Path<String>,
) -> Result<Json<DeletedResponse>, ApiError> {
    state.machines.delete(&id).await?;
    Ok(Json(DeletedResponse {
        message: "Machine deleted successfully".into(),
    }))
}
