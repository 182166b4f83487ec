use async_trait::async_trait;
use futures::future::try_join_all;
use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;

pub const APPLICATIONS_BUCKET: &str = "applications";
pub const SERVICES_BUCKET: &str = "services";
pub const INSTANCES_BUCKET: &str = "instances";

#[derive(Debug, Error, Clone, PartialEq)]
pub enum KvStoreError {
    #[error("Can't open the storage engine at '{path}': {message}")]
    EngineOpenFail { path: String, message: String },
    #[error("Can't provision bucket '{bucket}': {message}")]
    BucketCreationFail { bucket: String, message: String },
    #[error("Bucket '{0}' doesn't exist")]
    MissingBucket(String),
    #[error("Can't save record in bucket '{bucket}': {message}")]
    SaveFail { bucket: String, message: String },
    #[error("Can't read from bucket '{bucket}': {message}")]
    ReadFail { bucket: String, message: String },
    #[error("Can't remove record from bucket '{bucket}': {message}")]
    RemoveFail { bucket: String, message: String },
}

/// Provisioning hint: the record field the engine indexes and keeps unique
/// within the bucket.
#[derive(Debug, Clone, PartialEq)]
pub struct BucketSchema {
    pub unique_index: &'static str,
}

#[async_trait]
pub trait KvStore {
    /// Idempotent: creates the bucket when absent, no-op when present.
    async fn ensure_bucket(&self, bucket: &str, schema: &BucketSchema)
        -> Result<(), KvStoreError>;
    async fn put(&self, bucket: &str, uuid: &Uuid, record: Value) -> Result<(), KvStoreError>;
    async fn get(&self, bucket: &str, uuid: &Uuid) -> Result<Option<Value>, KvStoreError>;
    async fn list(&self, bucket: &str) -> Result<Vec<Value>, KvStoreError>;
    async fn delete(&self, bucket: &str, uuid: &Uuid) -> Result<(), KvStoreError>;
}

const UUID_INDEX: BucketSchema = BucketSchema {
    unique_index: "uuid",
};

/// Provisions the three entity buckets concurrently; the buckets are
/// independent, so a failure in any one fails the whole initialization.
pub async fn initialize_buckets(storage: &dyn KvStore) -> Result<(), KvStoreError> {
    let provisioning = [APPLICATIONS_BUCKET, SERVICES_BUCKET, INSTANCES_BUCKET]
        .into_iter()
        .map(|bucket| storage.ensure_bucket(bucket, &UUID_INDEX));
    try_join_all(provisioning).await.map(|_| ())
}
