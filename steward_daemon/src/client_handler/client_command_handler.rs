use std::sync::Arc;

use async_trait::async_trait;
use log::{error, trace};
use steward_client::steward::{StewardCommand, StewardDaemonError, StewardResponse};
use thiserror::Error;
use tokio::net::UnixStream;
use tokio::select;
use tokio_util::sync::CancellationToken;
use utils::wire::{JsonChannel, WireError};

use crate::registry::api::{Registry, RegistryError};
use crate::registry::deployment::DeployError;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Failed to receive a command: {0}")]
    ReceiveFail(String),
    #[error("Failed to send a response: {0}")]
    SendFail(String),
}

#[async_trait]
pub trait Client {
    async fn handle_connection(
        registry: Arc<dyn Registry + Send + Sync>,
        socket: UnixStream,
        token: Arc<CancellationToken>,
    ) -> Result<(), ClientError>;
}

pub struct ClientHandler {
    registry: Arc<dyn Registry + Send + Sync>,
    communicator: JsonChannel<UnixStream, StewardCommand, StewardResponse>,
    token: Arc<CancellationToken>,
}

#[async_trait]
impl Client for ClientHandler {
    async fn handle_connection(
        registry: Arc<dyn Registry + Send + Sync>,
        socket: UnixStream,
        token: Arc<CancellationToken>,
    ) -> Result<(), ClientError> {
        let mut handler = ClientHandler {
            registry,
            communicator: JsonChannel::new(socket),
            token,
        };
        handler.handle_requests().await
    }
}

impl ClientHandler {
    async fn handle_requests(&mut self) -> Result<(), ClientError> {
        loop {
            select! {
                command = self.communicator.recv() => {
                    let command = match command {
                        Ok(command) => command,
                        Err(WireError::ChannelClosed) => {
                            trace!("Client disconnected.");
                            break;
                        }
                        Err(err) => return Err(ClientError::ReceiveFail(err.to_string())),
                    };
                    let response = self.handle_command(command).await;
                    self.communicator
                        .send(response)
                        .await
                        .map_err(|err| ClientError::SendFail(err.to_string()))?;
                }
                _ = self.token.cancelled() => {
                    break;
                }
            }
        }
        Ok(())
    }

    async fn handle_command(&self, command: StewardCommand) -> StewardResponse {
        trace!("Handling command: {:?}", command);
        match command {
            StewardCommand::CreateApplication { config } => {
                match self.registry.create_application(config).await {
                    Ok(application) => StewardResponse::CreatedApplication { application },
                    Err(err) => Self::registry_error_response(err),
                }
            }
            StewardCommand::ListApplications => match self.registry.list_applications().await {
                Ok(applications) => StewardResponse::ListedApplications { applications },
                Err(err) => Self::registry_error_response(err),
            },
            StewardCommand::GetApplication { uuid } => {
                match self.registry.get_application(&uuid).await {
                    Ok(application) => StewardResponse::InspectedApplication { application },
                    Err(err) => Self::registry_error_response(err),
                }
            }
            StewardCommand::DeleteApplication { uuid } => {
                match self.registry.delete_application(&uuid).await {
                    Ok(()) => StewardResponse::Ok,
                    Err(err) => Self::registry_error_response(err),
                }
            }
            StewardCommand::CreateService { config } => {
                match self.registry.create_service(config).await {
                    Ok(service) => StewardResponse::CreatedService { service },
                    Err(err) => Self::registry_error_response(err),
                }
            }
            StewardCommand::ListServices => match self.registry.list_services().await {
                Ok(services) => StewardResponse::ListedServices { services },
                Err(err) => Self::registry_error_response(err),
            },
            StewardCommand::GetService { uuid } => match self.registry.get_service(&uuid).await {
                Ok(service) => StewardResponse::InspectedService { service },
                Err(err) => Self::registry_error_response(err),
            },
            StewardCommand::DeleteService { uuid } => {
                match self.registry.delete_service(&uuid).await {
                    Ok(()) => StewardResponse::Ok,
                    Err(err) => Self::registry_error_response(err),
                }
            }
            StewardCommand::CreateInstance { config } => {
                match self.registry.create_instance(config).await {
                    Ok(instance) => StewardResponse::CreatedInstance { instance },
                    Err(err) => Self::registry_error_response(err),
                }
            }
            StewardCommand::ListInstances => match self.registry.list_instances().await {
                Ok(instances) => StewardResponse::ListedInstances { instances },
                Err(err) => Self::registry_error_response(err),
            },
            StewardCommand::GetInstance { uuid } => match self.registry.get_instance(&uuid).await {
                Ok(instance) => StewardResponse::InspectedInstance { instance },
                Err(err) => Self::registry_error_response(err),
            },
            StewardCommand::DeleteInstance { uuid } => {
                match self.registry.delete_instance(&uuid).await {
                    Ok(()) => StewardResponse::Ok,
                    Err(err) => Self::registry_error_response(err),
                }
            }
            StewardCommand::DeployInstance { uuid } => {
                match self.registry.deploy_instance(&uuid).await {
                    Ok(workload) => StewardResponse::DeployedInstance {
                        workload_uuid: workload.uuid,
                    },
                    Err(err) => Self::deploy_error_response(err),
                }
            }
        }
    }

    fn registry_error_response(err: RegistryError) -> StewardResponse {
        error!("Error has occured while handling client command: {}", err);
        StewardResponse::Error {
            steward_error: StewardDaemonError::RegistryFail {
                message: err.to_string(),
            },
        }
    }

    fn deploy_error_response(err: DeployError) -> StewardResponse {
        error!("Error has occured while handling deployment: {}", err);
        StewardResponse::Error {
            steward_error: StewardDaemonError::DeployFail {
                message: err.to_string(),
            },
        }
    }
}
