use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Caller-supplied description of an application. The uuid is optional; the
/// daemon assigns one when it is absent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApplicationConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<Uuid>,
    pub name: String,
    pub owner_uuid: Uuid,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub params: HashMap<String, String>,
}

/// A persisted application: exactly the caller-supplied fields plus a
/// guaranteed uuid.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Application {
    pub uuid: Uuid,
    pub name: String,
    pub owner_uuid: Uuid,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub params: HashMap<String, String>,
}
