use std::path::PathBuf;

use async_trait::async_trait;
use steward_backend::directory::{DirectoryRequest, DirectoryResponse, UserEntry};
use thiserror::Error;
use tokio::net::UnixStream;
use utils::wire::JsonChannel;
use uuid::Uuid;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum DirectoryClientError {
    #[error("Can't connect to the directory service: {0}")]
    ConnectionFail(String),
    #[error("Can't communicate with the directory service: {0}")]
    CommunicationFail(String),
    #[error("Directory lookup failed: {0}")]
    LookupFail(String),
}

#[async_trait]
pub trait DirectoryClient {
    /// Resolves an owner identifier to a principal record; absence is
    /// `Ok(None)`.
    async fn lookup_user(&self, uuid: &Uuid) -> Result<Option<UserEntry>, DirectoryClientError>;
}

/// Directory service client speaking framed JSON over a unix socket, one
/// connection per lookup.
pub struct SocketDirectoryClient {
    socket_path: PathBuf,
}

impl SocketDirectoryClient {
    pub fn new(socket_path: PathBuf) -> Self {
        Self { socket_path }
    }
}

#[async_trait]
impl DirectoryClient for SocketDirectoryClient {
    async fn lookup_user(&self, uuid: &Uuid) -> Result<Option<UserEntry>, DirectoryClientError> {
        let stream = UnixStream::connect(&self.socket_path)
            .await
            .map_err(|err| DirectoryClientError::ConnectionFail(err.to_string()))?;
        let mut channel =
            JsonChannel::<UnixStream, DirectoryResponse, DirectoryRequest>::new(stream);
        match channel
            .call(DirectoryRequest::LookupUser { uuid: *uuid })
            .await
            .map_err(|err| DirectoryClientError::CommunicationFail(err.to_string()))?
        {
            DirectoryResponse::User { user } => Ok(Some(user)),
            DirectoryResponse::NotFound => Ok(None),
            DirectoryResponse::Error { message } => Err(DirectoryClientError::LookupFail(message)),
        }
    }
}
