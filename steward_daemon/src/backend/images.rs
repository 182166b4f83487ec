use std::path::PathBuf;

use async_trait::async_trait;
use steward_backend::images::{ImageEntry, ImageRequest, ImageResponse};
use thiserror::Error;
use tokio::net::UnixStream;
use utils::wire::JsonChannel;
use uuid::Uuid;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ImageRegistryClientError {
    #[error("Can't connect to the image registry: {0}")]
    ConnectionFail(String),
    #[error("Can't communicate with the image registry: {0}")]
    CommunicationFail(String),
    #[error("Image lookup failed: {0}")]
    LookupFail(String),
}

#[async_trait]
pub trait ImageRegistryClient {
    /// Resolves an image identifier to its metadata; absence is `Ok(None)`.
    async fn lookup_image(&self, uuid: &Uuid)
        -> Result<Option<ImageEntry>, ImageRegistryClientError>;
}

/// Image registry client speaking framed JSON over a unix socket, one
/// connection per lookup.
pub struct SocketImageRegistryClient {
    socket_path: PathBuf,
}

impl SocketImageRegistryClient {
    pub fn new(socket_path: PathBuf) -> Self {
        Self { socket_path }
    }
}

#[async_trait]
impl ImageRegistryClient for SocketImageRegistryClient {
    async fn lookup_image(
        &self,
        uuid: &Uuid,
    ) -> Result<Option<ImageEntry>, ImageRegistryClientError> {
        let stream = UnixStream::connect(&self.socket_path)
            .await
            .map_err(|err| ImageRegistryClientError::ConnectionFail(err.to_string()))?;
        let mut channel = JsonChannel::<UnixStream, ImageResponse, ImageRequest>::new(stream);
        match channel
            .call(ImageRequest::LookupImage { uuid: *uuid })
            .await
            .map_err(|err| ImageRegistryClientError::CommunicationFail(err.to_string()))?
        {
            ImageResponse::Image { image } => Ok(Some(image)),
            ImageResponse::NotFound => Ok(None),
            ImageResponse::Error { message } => Err(ImageRegistryClientError::LookupFail(message)),
        }
    }
}
