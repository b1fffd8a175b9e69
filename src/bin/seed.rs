use anyhow::Context;
use machine_monitor::{
    seed::{self, DEFAULT_ADMIN_EMAIL, DEFAULT_ADMIN_PASSWORD},
    state::AppState,
    telemetry,
};

/// Creates the default admin account and sample machines when absent.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    telemetry::init();

    let state = AppState::init().await.context("initialise state")?;

    let email = std::env::var("SEED_ADMIN_EMAIL").unwrap_or_else(|_| DEFAULT_ADMIN_EMAIL.into());
    let password =
        std::env::var("SEED_ADMIN_PASSWORD").unwrap_or_else(|_| DEFAULT_ADMIN_PASSWORD.into());

    let admin = seed::seed_admin(&state, &email, &password).await?;
    let machines = seed::seed_machines(&state).await?;
    tracing::info!(?admin, ?machines, "seed finished");
    Ok(())
}
