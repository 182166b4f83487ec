use std::path::PathBuf;

use steward_client::application::{Application, ApplicationConfig};
use steward_client::instance::{Instance, InstanceConfig};
use steward_client::service::{Service, ServiceConfig};
use steward_client::steward::{StewardCommand, StewardResponse};
use tokio::net::UnixStream;
use utils::wire::JsonChannel;
use uuid::Uuid;

pub use steward_client_error::StewardClientError;

mod steward_client_error;

type Communicator = JsonChannel<UnixStream, StewardResponse, StewardCommand>;

/// Typed connection to a running steward daemon.
pub struct StewardConnection {
    communicator: Communicator,
}

impl StewardConnection {
    pub async fn connect(socket_path: PathBuf) -> Result<Self, StewardClientError> {
        let stream = UnixStream::connect(&socket_path)
            .await
            .map_err(|_| StewardClientError::ConnectionFailed { socket_path })?;
        Ok(Self {
            communicator: JsonChannel::new(stream),
        })
    }

    pub async fn create_application(
        &mut self,
        config: ApplicationConfig,
    ) -> Result<Application, StewardClientError> {
        match self
            .communicate(StewardCommand::CreateApplication { config })
            .await?
        {
            StewardResponse::CreatedApplication { application } => Ok(application),
            response => Err(Self::handle_error_response(response)),
        }
    }

    pub async fn list_applications(&mut self) -> Result<Vec<Application>, StewardClientError> {
        match self.communicate(StewardCommand::ListApplications).await? {
            StewardResponse::ListedApplications { applications } => Ok(applications),
            response => Err(Self::handle_error_response(response)),
        }
    }

    pub async fn get_application(
        &mut self,
        uuid: Uuid,
    ) -> Result<Option<Application>, StewardClientError> {
        match self
            .communicate(StewardCommand::GetApplication { uuid })
            .await?
        {
            StewardResponse::InspectedApplication { application } => Ok(application),
            response => Err(Self::handle_error_response(response)),
        }
    }

    pub async fn delete_application(&mut self, uuid: Uuid) -> Result<(), StewardClientError> {
        match self
            .communicate(StewardCommand::DeleteApplication { uuid })
            .await?
        {
            StewardResponse::Ok => Ok(()),
            response => Err(Self::handle_error_response(response)),
        }
    }

    pub async fn create_service(
        &mut self,
        config: ServiceConfig,
    ) -> Result<Service, StewardClientError> {
        match self
            .communicate(StewardCommand::CreateService { config })
            .await?
        {
            StewardResponse::CreatedService { service } => Ok(service),
            response => Err(Self::handle_error_response(response)),
        }
    }

    pub async fn list_services(&mut self) -> Result<Vec<Service>, StewardClientError> {
        match self.communicate(StewardCommand::ListServices).await? {
            StewardResponse::ListedServices { services } => Ok(services),
            response => Err(Self::handle_error_response(response)),
        }
    }

    pub async fn get_service(
        &mut self,
        uuid: Uuid,
    ) -> Result<Option<Service>, StewardClientError> {
        match self.communicate(StewardCommand::GetService { uuid }).await? {
            StewardResponse::InspectedService { service } => Ok(service),
            response => Err(Self::handle_error_response(response)),
        }
    }

    pub async fn delete_service(&mut self, uuid: Uuid) -> Result<(), StewardClientError> {
        match self
            .communicate(StewardCommand::DeleteService { uuid })
            .await?
        {
            StewardResponse::Ok => Ok(()),
            response => Err(Self::handle_error_response(response)),
        }
    }

    pub async fn create_instance(
        &mut self,
        config: InstanceConfig,
    ) -> Result<Instance, StewardClientError> {
        match self
            .communicate(StewardCommand::CreateInstance { config })
            .await?
        {
            StewardResponse::CreatedInstance { instance } => Ok(instance),
            response => Err(Self::handle_error_response(response)),
        }
    }

    pub async fn list_instances(&mut self) -> Result<Vec<Instance>, StewardClientError> {
        match self.communicate(StewardCommand::ListInstances).await? {
            StewardResponse::ListedInstances { instances } => Ok(instances),
            response => Err(Self::handle_error_response(response)),
        }
    }

    pub async fn get_instance(
        &mut self,
        uuid: Uuid,
    ) -> Result<Option<Instance>, StewardClientError> {
        match self
            .communicate(StewardCommand::GetInstance { uuid })
            .await?
        {
            StewardResponse::InspectedInstance { instance } => Ok(instance),
            response => Err(Self::handle_error_response(response)),
        }
    }

    pub async fn delete_instance(&mut self, uuid: Uuid) -> Result<(), StewardClientError> {
        match self
            .communicate(StewardCommand::DeleteInstance { uuid })
            .await?
        {
            StewardResponse::Ok => Ok(()),
            response => Err(Self::handle_error_response(response)),
        }
    }

    pub async fn deploy_instance(&mut self, uuid: Uuid) -> Result<Uuid, StewardClientError> {
        match self
            .communicate(StewardCommand::DeployInstance { uuid })
            .await?
        {
            StewardResponse::DeployedInstance { workload_uuid } => Ok(workload_uuid),
            response => Err(Self::handle_error_response(response)),
        }
    }

    async fn communicate(
        &mut self,
        command: StewardCommand,
    ) -> Result<StewardResponse, StewardClientError> {
        self.communicator
            .call(command)
            .await
            .map_err(|err| StewardClientError::CommunicationFail(err.to_string()))
    }

    fn handle_error_response(response: StewardResponse) -> StewardClientError {
        match response {
            StewardResponse::Error { steward_error } => {
                StewardClientError::StewardOperationFail(steward_error)
            }
            response => StewardClientError::UnexpectedResponse(format!("{:?}", response)),
        }
    }
}
