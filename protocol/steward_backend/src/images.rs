use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Image metadata as returned by the image registry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImageEntry {
    pub uuid: Uuid,
    pub name: String,
    pub version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum ImageRequest {
    LookupImage { uuid: Uuid },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum ImageResponse {
    Image { image: ImageEntry },
    NotFound,
    Error { message: String },
}
