use serde::{Deserialize, Serialize};

use super::repo_types::MachineStatus;

/// Body for create and update. Absent fields take defaults on create and are
/// left untouched on update.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MachineRequest {
    pub name: Option<String>,
    pub status: Option<MachineStatus>,
    pub temperature: Option<f64>,
    pub energy_consumption: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeletedResponse {
    pub message: String,
}
