use std::sync::Arc;

use log::warn;
use uuid::Uuid;

use super::api::RegistryError;
use crate::backend::directory::DirectoryClient;
use crate::backend::images::ImageRegistryClient;
use crate::storage::kv_store::{KvStore, APPLICATIONS_BUCKET, SERVICES_BUCKET};

/// Existence checks for every reference a record may carry. Each check runs
/// before the single persisting write of a create.
pub struct ReferenceValidator {
    storage: Arc<dyn KvStore + Send + Sync>,
    directory: Arc<dyn DirectoryClient + Send + Sync>,
    images: Arc<dyn ImageRegistryClient + Send + Sync>,
}

impl ReferenceValidator {
    pub fn new(
        storage: Arc<dyn KvStore + Send + Sync>,
        directory: Arc<dyn DirectoryClient + Send + Sync>,
        images: Arc<dyn ImageRegistryClient + Send + Sync>,
    ) -> Self {
        Self {
            storage,
            directory,
            images,
        }
    }

    /// A failed directory lookup reads as a missing owner; callers cannot
    /// tell the two apart.
    // TODO: decide whether a directory outage should surface as a backend
    // error instead of coercing to "owner doesn't exist".
    pub async fn owner_exists(&self, owner_uuid: &Uuid) -> bool {
        match self.directory.lookup_user(owner_uuid).await {
            Ok(user) => user.is_some(),
            Err(err) => {
                warn!("Directory lookup for owner '{}' failed: {}", owner_uuid, err);
                false
            }
        }
    }

    /// Unlike `owner_exists`, an image registry failure aborts the caller's
    /// create instead of reading as a missing image.
    pub async fn image_exists(&self, image_uuid: &Uuid) -> Result<bool, RegistryError> {
        match self.images.lookup_image(image_uuid).await {
            Ok(image) => Ok(image.is_some()),
            Err(err) => Err(RegistryError::ImageLookupFail(err.to_string())),
        }
    }

    pub async fn application_exists(&self, uuid: &Uuid) -> Result<bool, RegistryError> {
        let record = self
            .storage
            .get(APPLICATIONS_BUCKET, uuid)
            .await
            .map_err(|err| RegistryError::StorageFail(err.to_string()))?;
        Ok(record.is_some())
    }

    pub async fn service_exists(&self, uuid: &Uuid) -> Result<bool, RegistryError> {
        let record = self
            .storage
            .get(SERVICES_BUCKET, uuid)
            .await
            .map_err(|err| RegistryError::StorageFail(err.to_string()))?;
        Ok(record.is_some())
    }
}

#[cfg(test)]
mod test {
    use std::sync::Arc;

    use serde_json::json;
    use steward_backend::directory::UserEntry;
    use uuid::Uuid;

    use super::ReferenceValidator;
    use crate::backend::directory::DirectoryClientError;
    use crate::backend::images::ImageRegistryClientError;
    use crate::registry::api::RegistryError;
    use crate::storage::kv_store::{KvStore, APPLICATIONS_BUCKET};
    use crate::test_utilities::{
        create_example_image_entry, InMemoryKvStore, MockDirectoryClient, MockImageRegistryClient,
    };

    fn create_validator(
        directory: MockDirectoryClient,
        images: MockImageRegistryClient,
    ) -> ReferenceValidator {
        ReferenceValidator::new(
            Arc::new(InMemoryKvStore::default()),
            Arc::new(directory),
            Arc::new(images),
        )
    }

    #[tokio::test]
    async fn owner_exists_when_directory_resolves_principal() {
        let mut directory = MockDirectoryClient::new();
        directory.expect_lookup_user().returning(|uuid| {
            Ok(Some(UserEntry {
                uuid: *uuid,
                login: String::from("operator"),
            }))
        });
        let validator = create_validator(directory, MockImageRegistryClient::new());
        assert!(validator.owner_exists(&Uuid::new_v4()).await);
    }

    #[tokio::test]
    async fn owner_missing_when_directory_has_no_principal() {
        let mut directory = MockDirectoryClient::new();
        directory.expect_lookup_user().returning(|_| Ok(None));
        let validator = create_validator(directory, MockImageRegistryClient::new());
        assert!(!validator.owner_exists(&Uuid::new_v4()).await);
    }

    #[tokio::test]
    async fn owner_lookup_error_reads_as_missing() {
        let mut directory = MockDirectoryClient::new();
        directory.expect_lookup_user().returning(|_| {
            Err(DirectoryClientError::ConnectionFail(String::from(
                "directory offline",
            )))
        });
        let validator = create_validator(directory, MockImageRegistryClient::new());
        assert!(!validator.owner_exists(&Uuid::new_v4()).await);
    }

    #[tokio::test]
    async fn image_exists_when_registry_resolves_metadata() {
        let mut images = MockImageRegistryClient::new();
        images
            .expect_lookup_image()
            .returning(|uuid| Ok(Some(create_example_image_entry(uuid))));
        let validator = create_validator(MockDirectoryClient::new(), images);
        assert_eq!(validator.image_exists(&Uuid::new_v4()).await, Ok(true));
    }

    #[tokio::test]
    async fn image_missing_when_registry_has_no_metadata() {
        let mut images = MockImageRegistryClient::new();
        images.expect_lookup_image().returning(|_| Ok(None));
        let validator = create_validator(MockDirectoryClient::new(), images);
        assert_eq!(validator.image_exists(&Uuid::new_v4()).await, Ok(false));
    }

    #[tokio::test]
    async fn image_lookup_error_propagates() {
        let mut images = MockImageRegistryClient::new();
        images.expect_lookup_image().returning(|_| {
            Err(ImageRegistryClientError::ConnectionFail(String::from(
                "registry offline",
            )))
        });
        let validator = create_validator(MockDirectoryClient::new(), images);
        assert_eq!(
            validator.image_exists(&Uuid::new_v4()).await,
            Err(RegistryError::ImageLookupFail(
                ImageRegistryClientError::ConnectionFail(String::from("registry offline"))
                    .to_string()
            ))
        );
    }

    #[tokio::test]
    async fn application_exists_reads_the_applications_bucket() {
        let storage = Arc::new(InMemoryKvStore::default());
        let uuid = Uuid::new_v4();
        storage
            .ensure_bucket(
                APPLICATIONS_BUCKET,
                &crate::storage::kv_store::BucketSchema {
                    unique_index: "uuid",
                },
            )
            .await
            .unwrap();
        storage
            .put(APPLICATIONS_BUCKET, &uuid, json!({"uuid": uuid}))
            .await
            .unwrap();
        let validator = ReferenceValidator::new(
            storage,
            Arc::new(MockDirectoryClient::new()),
            Arc::new(MockImageRegistryClient::new()),
        );
        assert_eq!(validator.application_exists(&uuid).await, Ok(true));
        assert_eq!(
            validator.application_exists(&Uuid::new_v4()).await,
            Ok(false)
        );
    }

    #[tokio::test]
    async fn service_exists_is_false_for_unknown_uuid() {
        let storage = Arc::new(InMemoryKvStore::default());
        crate::storage::kv_store::initialize_buckets(storage.as_ref())
            .await
            .unwrap();
        let validator = ReferenceValidator::new(
            storage,
            Arc::new(MockDirectoryClient::new()),
            Arc::new(MockImageRegistryClient::new()),
        );
        assert_eq!(validator.service_exists(&Uuid::new_v4()).await, Ok(false));
    }
}
