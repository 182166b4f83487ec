use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use log::debug;
use serde_json::Value;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use super::kv_store::{BucketSchema, KvStore, KvStoreError};

/// Storage engine client backed by the local filesystem: one directory per
/// bucket, one JSON document per record. Records are keyed by the uuid in the
/// file name, which is also what enforces the bucket's uniqueness constraint.
pub struct FsKvStore {
    root_path: PathBuf,
}

impl FsKvStore {
    pub async fn new(root_path: PathBuf) -> Result<Self, KvStoreError> {
        tokio::fs::create_dir_all(&root_path)
            .await
            .map_err(|err| KvStoreError::EngineOpenFail {
                path: root_path.display().to_string(),
                message: err.to_string(),
            })?;
        Ok(Self { root_path })
    }

    fn bucket_path(&self, bucket: &str) -> PathBuf {
        self.root_path.join(bucket)
    }

    fn record_path(&self, bucket: &str, uuid: &Uuid) -> PathBuf {
        self.bucket_path(bucket).join(format!("{}.json", uuid))
    }

    async fn check_bucket(&self, bucket: &str) -> Result<(), KvStoreError> {
        match tokio::fs::metadata(self.bucket_path(bucket)).await {
            Ok(metadata) if metadata.is_dir() => Ok(()),
            _ => Err(KvStoreError::MissingBucket(bucket.to_string())),
        }
    }
}

#[async_trait]
impl KvStore for FsKvStore {
    async fn ensure_bucket(
        &self,
        bucket: &str,
        schema: &BucketSchema,
    ) -> Result<(), KvStoreError> {
        if self.check_bucket(bucket).await.is_ok() {
            return Ok(());
        }
        debug!(
            "Provisioning bucket '{}' keyed by '{}'",
            bucket, schema.unique_index
        );
        tokio::fs::create_dir_all(self.bucket_path(bucket))
            .await
            .map_err(|err| KvStoreError::BucketCreationFail {
                bucket: bucket.to_string(),
                message: err.to_string(),
            })
    }

    async fn put(&self, bucket: &str, uuid: &Uuid, record: Value) -> Result<(), KvStoreError> {
        self.check_bucket(bucket).await?;
        let save_fail = |message: String| KvStoreError::SaveFail {
            bucket: bucket.to_string(),
            message,
        };
        let data = serde_json::to_vec(&record).map_err(|err| save_fail(err.to_string()))?;
        let mut file = File::create(self.record_path(bucket, uuid))
            .await
            .map_err(|err| save_fail(err.to_string()))?;
        file.write_all(&data)
            .await
            .map_err(|err| save_fail(err.to_string()))?;
        file.flush().await.map_err(|err| save_fail(err.to_string()))
    }

    async fn get(&self, bucket: &str, uuid: &Uuid) -> Result<Option<Value>, KvStoreError> {
        self.check_bucket(bucket).await?;
        let read_fail = |message: String| KvStoreError::ReadFail {
            bucket: bucket.to_string(),
            message,
        };
        match tokio::fs::read(self.record_path(bucket, uuid)).await {
            Ok(data) => serde_json::from_slice(&data)
                .map(Some)
                .map_err(|err| read_fail(err.to_string())),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(read_fail(err.to_string())),
        }
    }

    async fn list(&self, bucket: &str) -> Result<Vec<Value>, KvStoreError> {
        self.check_bucket(bucket).await?;
        let read_fail = |message: String| KvStoreError::ReadFail {
            bucket: bucket.to_string(),
            message,
        };
        let mut records = Vec::new();
        let mut read_dir = tokio::fs::read_dir(self.bucket_path(bucket))
            .await
            .map_err(|err| read_fail(err.to_string()))?;
        while let Some(entry) = read_dir
            .next_entry()
            .await
            .map_err(|err| read_fail(err.to_string()))?
        {
            if let Ok(file_type) = entry.file_type().await {
                if file_type.is_file() {
                    let data = tokio::fs::read(entry.path())
                        .await
                        .map_err(|err| read_fail(err.to_string()))?;
                    records
                        .push(serde_json::from_slice(&data).map_err(|err| read_fail(err.to_string()))?);
                }
            }
        }
        Ok(records)
    }

    async fn delete(&self, bucket: &str, uuid: &Uuid) -> Result<(), KvStoreError> {
        self.check_bucket(bucket).await?;
        match tokio::fs::remove_file(self.record_path(bucket, uuid)).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(KvStoreError::RemoveFail {
                bucket: bucket.to_string(),
                message: err.to_string(),
            }),
        }
    }
}
