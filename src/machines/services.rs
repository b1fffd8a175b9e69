use std::sync::Arc;

use tracing::{error, info};
use uuid::Uuid;

use super::{
    dto::MachineRequest,
    repo::MachineRepository,
    repo_types::{Machine, MachinePatch, NewMachine},
};
use crate::db::RepoError;

#[derive(Debug, thiserror::Error)]
pub enum MachineError {
    #[error("machine {0} not found")]
    NotFound(String),
    #[error("{0}")]
    Validation(String),
    #[error("store unavailable")]
    TransientFailure,
}

impl From<RepoError> for MachineError {
    fn from(e: RepoError) -> Self {
        error!(error = %e, "machine store failure");
        MachineError::TransientFailure
    }
}

#[derive(Clone)]
pub struct MachineService {
    repo: Arc<dyn MachineRepository>,
}

impl MachineService {
    pub fn new(repo: Arc<dyn MachineRepository>) -> Self {
        Self { repo }
    }

    pub async fn list(&self) -> Result<Vec<Machine>, MachineError> {
        Ok(self.repo.list().await?)
    }

    pub async fn get(&self, id: &str) -> Result<Machine, MachineError> {
        let uuid = parse_id(id)?;
        self.repo
            .get(uuid)
            .await?
            .ok_or_else(|| MachineError::NotFound(id.to_owned()))
    }

    pub async fn create(&self, req: MachineRequest) -> Result<Machine, MachineError> {
        let name = match req.name {
            Some(n) if !n.trim().is_empty() => n,
            _ => return Err(MachineError::Validation("name is required".into())),
        };
        let machine = self
            .repo
            .insert(NewMachine {
                name,
                status: req.status.unwrap_or_default(),
                temperature: req.temperature.unwrap_or(0.0),
                energy_consumption: req.energy_consumption.unwrap_or(0.0),
            })
            .await?;
        info!(machine_id = %machine.id, name = %machine.name, "machine created");
        Ok(machine)
    }

    pub async fn update(&self, id: &str, req: MachineRequest) -> Result<Machine, MachineError> {
        let uuid = parse_id(id)?;
        if matches!(&req.name, Some(n) if n.trim().is_empty()) {
            return Err(MachineError::Validation("name must not be empty".into()));
        }
        let patch = MachinePatch {
            name: req.name,
            status: req.status,
            temperature: req.temperature,
            energy_consumption: req.energy_consumption,
        };
        let machine = self
            .repo
            .update(uuid, patch)
            .await?
            .ok_or_else(|| MachineError::NotFound(id.to_owned()))?;
        info!(machine_id = %machine.id, "machine updated");
        Ok(machine)
    }

    pub async fn delete(&self, id: &str) -> Result<(), MachineError> {
        let uuid = parse_id(id)?;
        if !self.repo.delete(uuid).await? {
            return Err(MachineError::NotFound(id.to_owned()));
        }
        info!(machine_id = %uuid, "machine deleted");
        Ok(())
    }
}

/// An id that is not a UUID cannot name a machine.
fn parse_id(id: &str) -> Result<Uuid, MachineError> {
    Uuid::parse_str(id).map_err(|_| MachineError::NotFound(id.to_owned()))
}
