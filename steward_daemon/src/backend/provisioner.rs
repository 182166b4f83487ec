use std::collections::HashMap;
use std::path::PathBuf;

use async_trait::async_trait;
use steward_backend::provisioner::{ProvisionRequest, ProvisionResponse, WorkloadHandle};
use thiserror::Error;
use tokio::net::UnixStream;
use utils::wire::JsonChannel;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum WorkloadProvisionerError {
    #[error("Can't connect to the workload provisioner: {0}")]
    ConnectionFail(String),
    #[error("Can't communicate with the workload provisioner: {0}")]
    CommunicationFail(String),
    #[error("Workload creation was rejected: {0}")]
    CreationFail(String),
}

#[async_trait]
pub trait WorkloadProvisioner {
    /// Submits one creation request; retry policy belongs to the provisioner
    /// side, not here.
    async fn create_workload(
        &self,
        params: HashMap<String, String>,
    ) -> Result<WorkloadHandle, WorkloadProvisionerError>;
}

/// Provisioner client speaking framed JSON over a unix socket, one connection
/// per request.
pub struct SocketWorkloadProvisioner {
    socket_path: PathBuf,
}

impl SocketWorkloadProvisioner {
    pub fn new(socket_path: PathBuf) -> Self {
        Self { socket_path }
    }
}

#[async_trait]
impl WorkloadProvisioner for SocketWorkloadProvisioner {
    async fn create_workload(
        &self,
        params: HashMap<String, String>,
    ) -> Result<WorkloadHandle, WorkloadProvisionerError> {
        let stream = UnixStream::connect(&self.socket_path)
            .await
            .map_err(|err| WorkloadProvisionerError::ConnectionFail(err.to_string()))?;
        let mut channel = JsonChannel::<UnixStream, ProvisionResponse, ProvisionRequest>::new(stream);
        match channel
            .call(ProvisionRequest::CreateWorkload { params })
            .await
            .map_err(|err| WorkloadProvisionerError::CommunicationFail(err.to_string()))?
        {
            ProvisionResponse::Created { workload } => Ok(workload),
            ProvisionResponse::Error { message } => {
                Err(WorkloadProvisionerError::CreationFail(message))
            }
        }
    }
}
