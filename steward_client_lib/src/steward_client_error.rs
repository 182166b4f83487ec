use std::path::PathBuf;

use steward_client::steward::StewardDaemonError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StewardClientError {
    #[error("Failed to connect to Steward's socket at path: {socket_path}")]
    ConnectionFailed { socket_path: PathBuf },
    #[error("Can't communicate with the steward daemon: {0}")]
    CommunicationFail(String),
    #[error("Steward operation failed: {0}")]
    StewardOperationFail(#[from] StewardDaemonError),
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),
}
