use std::path::PathBuf;
use std::sync::Arc;

use log::{debug, error, info};
use thiserror::Error;
use tokio::net::UnixListener;
use tokio::{select, task::JoinSet};
use tokio_util::sync::CancellationToken;

use crate::client_handler::client_command_handler::Client;
use crate::registry::api::Registry;

#[derive(Debug, Error)]
pub enum UnixSocketServerError {
    #[error("Failed to bind the socket at '{path}': {message}")]
    SocketBindingFail { path: String, message: String },
    #[error("Failed to accept a client connection: {0}")]
    ClientAcceptFail(String),
}

pub struct UnixSocketServer;

impl UnixSocketServer {
    pub async fn listen<T: Client>(
        registry: Arc<dyn Registry + Send + Sync>,
        token: Arc<CancellationToken>,
        socket_path: PathBuf,
    ) -> Result<(), UnixSocketServerError> {
        info!("Starting Unix Socket Server!");
        let mut clients_set = JoinSet::new();

        let listener = UnixListener::bind(&socket_path).map_err(|err| {
            UnixSocketServerError::SocketBindingFail {
                path: socket_path.display().to_string(),
                message: err.to_string(),
            }
        })?;

        loop {
            select! {
                accepted_connection = listener.accept() => {
                    let (stream, _addr) = accepted_connection
                        .map_err(|err| UnixSocketServerError::ClientAcceptFail(err.to_string()))?;
                    let registry = registry.clone();
                    let token = token.clone();
                    info!("Client connected to the server!");
                    let _ = clients_set.spawn(async move {
                        if let Err(err) = T::handle_connection(registry, stream, token).await {
                            error!("{err:?}");
                        }
                    });
                }
                exited_client = clients_set.join_next(), if !clients_set.is_empty() => {
                    debug!("Client {:?} has exited", exited_client);
                }
                _ = token.cancelled() => {
                    break;
                }
            }
        }

        while let Some(client) = clients_set.join_next().await {
            debug!("Client task {:?} joined", client);
        }

        Ok(())
    }
}
