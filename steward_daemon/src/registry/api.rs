use async_trait::async_trait;
use steward_backend::provisioner::WorkloadHandle;
use steward_client::application::{Application, ApplicationConfig};
use steward_client::instance::{Instance, InstanceConfig};
use steward_client::service::{Service, ServiceConfig};
use thiserror::Error;
use uuid::Uuid;

use super::deployment::DeployError;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum RegistryError {
    #[error("Required field '{0}' is missing or empty")]
    MissingField(&'static str),
    #[error("Owner with uuid: '{0}' doesn't exist in the directory")]
    MissingOwner(Uuid),
    #[error("Application with uuid: '{0}' doesn't exist")]
    MissingApplication(Uuid),
    #[error("Image with uuid: '{0}' doesn't exist in the image registry")]
    MissingImage(Uuid),
    #[error("Service with uuid: '{0}' doesn't exist")]
    MissingService(Uuid),
    #[error("Image lookup failed: {0}")]
    ImageLookupFail(String),
    #[error("Storage operation failed: {0}")]
    StorageFail(String),
}

/// The registry surface the transport layer consumes: four CRUD operations
/// per entity kind plus deployment. Reads answer absence with `Ok(None)`,
/// never an error.
#[async_trait]
pub trait Registry {
    async fn create_application(
        &self,
        config: ApplicationConfig,
    ) -> Result<Application, RegistryError>;
    async fn list_applications(&self) -> Result<Vec<Application>, RegistryError>;
    async fn get_application(&self, uuid: &Uuid) -> Result<Option<Application>, RegistryError>;
    async fn delete_application(&self, uuid: &Uuid) -> Result<(), RegistryError>;

    async fn create_service(&self, config: ServiceConfig) -> Result<Service, RegistryError>;
    async fn list_services(&self) -> Result<Vec<Service>, RegistryError>;
    async fn get_service(&self, uuid: &Uuid) -> Result<Option<Service>, RegistryError>;
    async fn delete_service(&self, uuid: &Uuid) -> Result<(), RegistryError>;

    async fn create_instance(&self, config: InstanceConfig) -> Result<Instance, RegistryError>;
    async fn list_instances(&self) -> Result<Vec<Instance>, RegistryError>;
    async fn get_instance(&self, uuid: &Uuid) -> Result<Option<Instance>, RegistryError>;
    async fn delete_instance(&self, uuid: &Uuid) -> Result<(), RegistryError>;

    async fn deploy_instance(&self, uuid: &Uuid) -> Result<WorkloadHandle, DeployError>;
}
