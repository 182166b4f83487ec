use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Handle to a workload the provisioner has accepted for creation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorkloadHandle {
    pub uuid: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum ProvisionRequest {
    CreateWorkload { params: HashMap<String, String> },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum ProvisionResponse {
    Created { workload: WorkloadHandle },
    Error { message: String },
}
