use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MachineStatus {
    Running,
    #[default]
    Idle,
    Stopped,
}

impl MachineStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            MachineStatus::Running => "Running",
            MachineStatus::Idle => "Idle",
            MachineStatus::Stopped => "Stopped",
        }
    }
}

impl std::str::FromStr for MachineStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Running" => Ok(MachineStatus::Running),
            "Idle" => Ok(MachineStatus::Idle),
            "Stopped" => Ok(MachineStatus::Stopped),
            other => anyhow::bail!("unknown machine status {other:?}"),
        }
    }
}

/// Row as stored; `status` is TEXT in the table.
#[derive(Debug, FromRow)]
pub struct MachineRow {
    pub id: Uuid,
    pub name: String,
    pub status: String,
    pub temperature: f64,
    pub energy_consumption: f64,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// Machine as served to the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Machine {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
    pub status: MachineStatus,
    pub temperature: f64,
    pub energy_consumption: f64,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl TryFrom<MachineRow> for Machine {
    type Error = anyhow::Error;

    fn try_from(r: MachineRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: r.id,
            name: r.name,
            status: r.status.parse()?,
            temperature: r.temperature,
            energy_consumption: r.energy_consumption,
            created_at: r.created_at,
            updated_at: r.updated_at,
        })
    }
}

/// Fully defaulted insert.
#[derive(Debug, Clone)]
pub struct NewMachine {
    pub name: String,
    pub status: MachineStatus,
    pub temperature: f64,
    pub energy_consumption: f64,
}

/// Partial update; `None` leaves the column as is.
#[derive(Debug, Clone, Default)]
pub struct MachinePatch {
    pub name: Option<String>,
    pub status: Option<MachineStatus>,
    pub temperature: Option<f64>,
    pub energy_consumption: Option<f64>,
}
