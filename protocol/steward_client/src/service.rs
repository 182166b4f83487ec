use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Caller-supplied description of a service owned by an application.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServiceConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<Uuid>,
    pub name: String,
    pub application_uuid: Uuid,
    pub image_uuid: Uuid,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub params: HashMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Service {
    pub uuid: Uuid,
    pub name: String,
    pub application_uuid: Uuid,
    pub image_uuid: Uuid,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub params: HashMap<String, String>,
}
