use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::repo_types::{Machine, MachinePatch, MachineRow, NewMachine};
use crate::db::RepoError;

#[async_trait]
pub trait MachineRepository: Send + Sync {
    /// All machines, oldest first.
    async fn list(&self) -> Result<Vec<Machine>, RepoError>;
    async fn get(&self, id: Uuid) -> Result<Option<Machine>, RepoError>;
    async fn insert(&self, machine: NewMachine) -> Result<Machine, RepoError>;
    /// Returns `None` when no machine has this id.
    async fn update(&self, id: Uuid, patch: MachinePatch) -> Result<Option<Machine>, RepoError>;
    /// Returns `false` when no machine has this id.
    async fn delete(&self, id: Uuid) -> Result<bool, RepoError>;
}

#[derive(Clone)]
pub struct PgMachineRepository {
    db: PgPool,
}

impl PgMachineRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

fn into_machine(row: MachineRow) -> Result<Machine, RepoError> {
    Machine::try_from(row).map_err(RepoError::Unavailable)
}

#[async_trait]
impl MachineRepository for PgMachineRepository {
    async fn list(&self) -> Result<Vec<Machine>, RepoError> {
        let rows = sqlx::query_as::<_, MachineRow>(
            r#"
            SELECT id, name, status, temperature, energy_consumption, created_at, updated_at
            FROM machines
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .fetch_all(&self.db)
        .await?;
        rows.into_iter().map(into_machine).collect()
    }

    async fn get(&self, id: Uuid) -> Result<Option<Machine>, RepoError> {
        let row = sqlx::query_as::<_, MachineRow>(
            r#"
            SELECT id, name, status, temperature, energy_consumption, created_at, updated_at
            FROM machines
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;
        row.map(into_machine).transpose()
    }

    async fn insert(&self, machine: NewMachine) -> Result<Machine, RepoError> {
        let row = sqlx::query_as::<_, MachineRow>(
            r#"
            INSERT INTO machines (id, name, status, temperature, energy_consumption)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, status, temperature, energy_consumption, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&machine.name)
        .bind(machine.status.as_str())
        .bind(machine.temperature)
        .bind(machine.energy_consumption)
        .fetch_one(&self.db)
        .await?;
        into_machine(row)
    }

    async fn update(&self, id: Uuid, patch: MachinePatch) -> Result<Option<Machine>, RepoError> {
        let row = sqlx::query_as::<_, MachineRow>(
            r#"
            UPDATE machines
               SET name               = COALESCE($2, name),
                   status             = COALESCE($3, status),
                   temperature        = COALESCE($4, temperature),
                   energy_consumption = COALESCE($5, energy_consumption),
                   updated_at         = now()
             WHERE id = $1
            RETURNING id, name, status, temperature, energy_consumption, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(patch.name)
        .bind(patch.status.map(|s| s.as_str()))
        .bind(patch.temperature)
        .bind(patch.energy_consumption)
        .fetch_optional(&self.db)
        .await?;
        row.map(into_machine).transpose()
    }

    async fn delete(&self, id: Uuid) -> Result<bool, RepoError> {
        let res = sqlx::query("DELETE FROM machines WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;
        Ok(res.rows_affected() > 0)
    }
}
