use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::application::{Application, ApplicationConfig};
use crate::instance::{Instance, InstanceConfig};
use crate::service::{Service, ServiceConfig};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum StewardCommand {
    CreateApplication { config: ApplicationConfig },
    ListApplications,
    GetApplication { uuid: Uuid },
    DeleteApplication { uuid: Uuid },
    CreateService { config: ServiceConfig },
    ListServices,
    GetService { uuid: Uuid },
    DeleteService { uuid: Uuid },
    CreateInstance { config: InstanceConfig },
    ListInstances,
    GetInstance { uuid: Uuid },
    DeleteInstance { uuid: Uuid },
    DeployInstance { uuid: Uuid },
}

#[derive(Debug, Error, Clone, Serialize, Deserialize, PartialEq)]
pub enum StewardDaemonError {
    #[error("Failed to read request.")]
    ReadingRequestFail,
    #[error("Can't recognise a command.")]
    UnknownCommand,
    #[error("Registry error occured: {message}")]
    RegistryFail { message: String },
    #[error("Deployment error occured: {message}")]
    DeployFail { message: String },
    #[error("Failed to send response.")]
    SendingResponseFail,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum StewardResponse {
    Ok,
    CreatedApplication {
        application: Application,
    },
    ListedApplications {
        applications: Vec<Application>,
    },
    InspectedApplication {
        application: Option<Application>,
    },
    CreatedService {
        service: Service,
    },
    ListedServices {
        services: Vec<Service>,
    },
    InspectedService {
        service: Option<Service>,
    },
    CreatedInstance {
        instance: Instance,
    },
    ListedInstances {
        instances: Vec<Instance>,
    },
    InspectedInstance {
        instance: Option<Instance>,
    },
    DeployedInstance {
        workload_uuid: Uuid,
    },
    Error {
        steward_error: StewardDaemonError,
    },
}
