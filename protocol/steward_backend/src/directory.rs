use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A principal record as returned by the directory service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserEntry {
    pub uuid: Uuid,
    pub login: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum DirectoryRequest {
    LookupUser { uuid: Uuid },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum DirectoryResponse {
    User { user: UserEntry },
    NotFound,
    Error { message: String },
}
