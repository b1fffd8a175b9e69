use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use time::OffsetDateTime;
use tokio::sync::Mutex;
use uuid::Uuid;

use super::repo::MachineRepository;
use super::repo_types::{Machine, MachinePatch, NewMachine};
use crate::db::RepoError;

/// Insertion-ordered machine store for tests.
#[derive(Default)]
pub struct MemoryMachineRepository {
    machines: Mutex<Vec<Machine>>,
    offline: AtomicBool,
}

impl MemoryMachineRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn check_online(&self) -> Result<(), RepoError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(RepoError::Unavailable(anyhow::anyhow!("pool timed out")));
        }
        Ok(())
    }
}

#[async_trait]
impl MachineRepository for MemoryMachineRepository {
    async fn list(&self) -> Result<Vec<Machine>, RepoError> {
        self.check_online()?;
        Ok(self.machines.lock().await.clone())
    }

    async fn get(&self, id: Uuid) -> Result<Option<Machine>, RepoError> {
        self.check_online()?;
        Ok(self.machines.lock().await.iter().find(|m| m.id == id).cloned())
    }

    async fn insert(&self, machine: NewMachine) -> Result<Machine, RepoError> {
        self.check_online()?;
        let now = OffsetDateTime::now_utc();
        let record = Machine {
            id: Uuid::new_v4(),
            name: machine.name,
            status: machine.status,
            temperature: machine.temperature,
            energy_consumption: machine.energy_consumption,
            created_at: now,
            updated_at: now,
        };
        self.machines.lock().await.push(record.clone());
        Ok(record)
    }

    async fn update(&self, id: Uuid, patch: MachinePatch) -> Result<Option<Machine>, RepoError> {
        self.check_online()?;
        let mut machines = self.machines.lock().await;
        let Some(m) = machines.iter_mut().find(|m| m.id == id) else {
            return Ok(None);
        };
        if let Some(name) = patch.name {
            m.name = name;
        }
        if let Some(status) = patch.status {
            m.status = status;
        }
        if let Some(t) = patch.temperature {
            m.temperature = t;
        }
        if let Some(e) = patch.energy_consumption {
            m.energy_consumption = e;
        }
        m.updated_at = OffsetDateTime::now_utc();
        Ok(Some(m.clone()))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, RepoError> {
        self.check_online()?;
        let mut machines = self.machines.lock().await;
        let before = machines.len();
        machines.retain(|m| m.id != id);
        Ok(machines.len() != before)
    }
}
