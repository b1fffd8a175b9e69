use machine_monitor::{app, state::AppState, telemetry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    telemetry::init();

    let app_state = AppState::init().await?;
    let config = app_state.config.clone();

    let app = app::build_app(app_state)?;
    app::serve(app, &config).await
}
