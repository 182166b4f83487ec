use std::sync::Arc;

use async_trait::async_trait;
use steward_backend::provisioner::WorkloadHandle;
use steward_client::application::{Application, ApplicationConfig};
use steward_client::instance::{Instance, InstanceConfig};
use steward_client::service::{Service, ServiceConfig};
use uuid::Uuid;

use super::api::{Registry, RegistryError};
use super::application_repository::ApplicationRepository;
use super::deployment::{DeployError, DeploymentOrchestrator};
use super::instance_repository::InstanceRepository;
use super::policy::PlacementPolicy;
use super::service_repository::ServiceRepository;
use super::validator::ReferenceValidator;
use crate::backend::directory::DirectoryClient;
use crate::backend::images::ImageRegistryClient;
use crate::backend::provisioner::WorkloadProvisioner;
use crate::storage::kv_store::KvStore;

/// Facade over the three repositories and the orchestrator. Built once from
/// the injected collaborators and shared read-only across connections.
pub struct RegistryManager {
    applications: Arc<ApplicationRepository>,
    services: Arc<ServiceRepository>,
    instances: Arc<InstanceRepository>,
    orchestrator: DeploymentOrchestrator,
}

impl RegistryManager {
    pub fn new(
        storage: Arc<dyn KvStore + Send + Sync>,
        directory: Arc<dyn DirectoryClient + Send + Sync>,
        images: Arc<dyn ImageRegistryClient + Send + Sync>,
        provisioner: Arc<dyn WorkloadProvisioner + Send + Sync>,
        policy: Arc<dyn PlacementPolicy + Send + Sync>,
    ) -> Self {
        let validator = Arc::new(ReferenceValidator::new(storage.clone(), directory, images));
        let applications = Arc::new(ApplicationRepository::new(
            storage.clone(),
            validator.clone(),
        ));
        let services = Arc::new(ServiceRepository::new(storage.clone(), validator.clone()));
        let instances = Arc::new(InstanceRepository::new(storage, validator));
        let orchestrator = DeploymentOrchestrator::new(
            applications.clone(),
            services.clone(),
            provisioner,
            policy,
        );
        Self {
            applications,
            services,
            instances,
            orchestrator,
        }
    }
}

#[async_trait]
impl Registry for RegistryManager {
    async fn create_application(
        &self,
        config: ApplicationConfig,
    ) -> Result<Application, RegistryError> {
        self.applications.create(config).await
    }

    async fn list_applications(&self) -> Result<Vec<Application>, RegistryError> {
        self.applications.list().await
    }

    async fn get_application(&self, uuid: &Uuid) -> Result<Option<Application>, RegistryError> {
        self.applications.get(uuid).await
    }

    async fn delete_application(&self, uuid: &Uuid) -> Result<(), RegistryError> {
        self.applications.delete(uuid).await
    }

    async fn create_service(&self, config: ServiceConfig) -> Result<Service, RegistryError> {
        self.services.create(config).await
    }

    async fn list_services(&self) -> Result<Vec<Service>, RegistryError> {
        self.services.list().await
    }

    async fn get_service(&self, uuid: &Uuid) -> Result<Option<Service>, RegistryError> {
        self.services.get(uuid).await
    }

    async fn delete_service(&self, uuid: &Uuid) -> Result<(), RegistryError> {
        self.services.delete(uuid).await
    }

    async fn create_instance(&self, config: InstanceConfig) -> Result<Instance, RegistryError> {
        self.instances.create(config).await
    }

    async fn list_instances(&self) -> Result<Vec<Instance>, RegistryError> {
        self.instances.list().await
    }

    async fn get_instance(&self, uuid: &Uuid) -> Result<Option<Instance>, RegistryError> {
        self.instances.get(uuid).await
    }

    async fn delete_instance(&self, uuid: &Uuid) -> Result<(), RegistryError> {
        self.instances.delete(uuid).await
    }

    async fn deploy_instance(&self, uuid: &Uuid) -> Result<WorkloadHandle, DeployError> {
        let instance = self
            .instances
            .get(uuid)
            .await
            .map_err(|err| DeployError::InstanceResolutionFail(*uuid, err.to_string()))?
            .ok_or(DeployError::MissingInstance(*uuid))?;
        self.orchestrator.deploy(&instance).await
    }
}
