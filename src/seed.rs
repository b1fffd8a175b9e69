use tracing::info;

use crate::{
    auth::services::AuthError,
    machines::{repo_types::MachineStatus, MachineRequest},
    state::AppState,
};

pub const DEFAULT_ADMIN_EMAIL: &str = "admin@example.com";
pub const DEFAULT_ADMIN_PASSWORD: &str = "password123";

#[derive(Debug, PartialEq, Eq)]
pub enum Seeded {
    Created(usize),
    AlreadyPresent,
}

/// Create the admin account unless the email is taken.
pub async fn seed_admin(state: &AppState, email: &str, password: &str) -> anyhow::Result<Seeded> {
    match state.auth.signup(email, password).await {
        Ok(_) => {
            info!(email = %email, "admin user created");
            Ok(Seeded::Created(1))
        }
        Err(AuthError::DuplicateAccount) => {
            info!(email = %email, "admin user already exists");
            Ok(Seeded::AlreadyPresent)
        }
        Err(e) => Err(anyhow::anyhow!("seeding admin user: {e}")),
    }
}

/// Insert the sample machines when the table is empty.
pub async fn seed_machines(state: &AppState) -> anyhow::Result<Seeded> {
    let existing = state
        .machines
        .list()
        .await
        .map_err(|e| anyhow::anyhow!("listing machines: {e}"))?;
    if !existing.is_empty() {
        info!(count = existing.len(), "machines already exist, skipping seed");
        return Ok(Seeded::AlreadyPresent);
    }

    let samples = [
        ("Lathe Machine", MachineStatus::Running, 75.0, 1200.0),
        ("CNC Milling Machine", MachineStatus::Idle, 65.0, 800.0),
        ("Injection Molding Machine", MachineStatus::Stopped, 85.0, 1500.0),
    ];
    for (name, status, temperature, energy) in samples {
        state
            .machines
            .create(MachineRequest {
                name: Some(name.into()),
                status: Some(status),
                temperature: Some(temperature),
                energy_consumption: Some(energy),
            })
            .await
            .map_err(|e| anyhow::anyhow!("creating machine {name:?}: {e}"))?;
        info!(machine = name, "machine seeded");
    }
    Ok(Seeded::Created(samples.len()))
}
