use std::sync::Arc;

use log::info;
use steward_backend::provisioner::WorkloadHandle;
use steward_client::instance::Instance;
use thiserror::Error;
use uuid::Uuid;

use super::application_repository::ApplicationRepository;
use super::params::assemble_params;
use super::policy::PlacementPolicy;
use super::service_repository::ServiceRepository;
use crate::backend::provisioner::WorkloadProvisioner;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum DeployError {
    #[error("Instance with uuid: '{0}' doesn't exist")]
    MissingInstance(Uuid),
    #[error("Can't resolve instance '{0}': {1}")]
    InstanceResolutionFail(Uuid, String),
    #[error("Service with uuid: '{0}' doesn't exist")]
    MissingService(Uuid),
    #[error("Can't resolve service '{0}': {1}")]
    ServiceResolutionFail(Uuid, String),
    #[error("Application with uuid: '{0}' doesn't exist")]
    MissingApplication(Uuid),
    #[error("Can't resolve application '{0}': {1}")]
    ApplicationResolutionFail(Uuid, String),
    #[error("Provisioning of workload for instance '{0}' failed: {1}")]
    ProvisionFail(Uuid, String),
}

/// Turns an instance record into one provisioning request: resolve the
/// ownership chain upward, flatten the configuration, attach the placement
/// defaults, submit. Every stage only reads until the final call, so an
/// abort needs no rollback.
pub struct DeploymentOrchestrator {
    applications: Arc<ApplicationRepository>,
    services: Arc<ServiceRepository>,
    provisioner: Arc<dyn WorkloadProvisioner + Send + Sync>,
    policy: Arc<dyn PlacementPolicy + Send + Sync>,
}

impl DeploymentOrchestrator {
    pub fn new(
        applications: Arc<ApplicationRepository>,
        services: Arc<ServiceRepository>,
        provisioner: Arc<dyn WorkloadProvisioner + Send + Sync>,
        policy: Arc<dyn PlacementPolicy + Send + Sync>,
    ) -> Self {
        Self {
            applications,
            services,
            provisioner,
            policy,
        }
    }

    pub async fn deploy(&self, instance: &Instance) -> Result<WorkloadHandle, DeployError> {
        let service = self
            .services
            .get(&instance.service_uuid)
            .await
            .map_err(|err| {
                DeployError::ServiceResolutionFail(instance.service_uuid, err.to_string())
            })?
            .ok_or(DeployError::MissingService(instance.service_uuid))?;
        let application = self
            .applications
            .get(&service.application_uuid)
            .await
            .map_err(|err| {
                DeployError::ApplicationResolutionFail(service.application_uuid, err.to_string())
            })?
            .ok_or(DeployError::MissingApplication(service.application_uuid))?;
        let mut params = assemble_params(&application, &service, instance);
        self.policy.workload_defaults().apply_to(&mut params);
        info!(
            "Submitting provisioning request for instance '{}' with uuid: '{}'",
            instance.name, instance.uuid
        );
        self.provisioner
            .create_workload(params)
            .await
            .map_err(|err| DeployError::ProvisionFail(instance.uuid, err.to_string()))
    }
}
