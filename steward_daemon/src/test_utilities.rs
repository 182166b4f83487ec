use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use mockall::mock;
use serde_json::Value;
use steward_backend::directory::UserEntry;
use steward_backend::images::ImageEntry;
use steward_backend::provisioner::WorkloadHandle;
use steward_client::application::{Application, ApplicationConfig};
use steward_client::instance::{Instance, InstanceConfig};
use steward_client::service::{Service, ServiceConfig};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::backend::directory::{DirectoryClient, DirectoryClientError};
use crate::backend::images::{ImageRegistryClient, ImageRegistryClientError};
use crate::backend::provisioner::{WorkloadProvisioner, WorkloadProvisionerError};
use crate::registry::api::{Registry, RegistryError};
use crate::registry::deployment::DeployError;
use crate::registry::validator::ReferenceValidator;
use crate::storage::kv_store::{
    initialize_buckets, BucketSchema, KvStore, KvStoreError, APPLICATIONS_BUCKET, SERVICES_BUCKET,
};

pub fn create_example_uuid() -> Uuid {
    Uuid::from_str("a46289a4-5902-4586-81a3-908bdd62e7a1").unwrap()
}

pub fn create_example_owner_uuid() -> Uuid {
    Uuid::from_str("70471a82-2e44-4d0c-b4f4-2f34b7b64b62").unwrap()
}

pub fn create_example_image_uuid() -> Uuid {
    Uuid::from_str("0e1bf723-1f4f-4e0f-8b17-20c8f48c3b73").unwrap()
}

pub fn create_example_application_config() -> ApplicationConfig {
    ApplicationConfig {
        uuid: None,
        name: String::from("app1"),
        owner_uuid: create_example_owner_uuid(),
        params: HashMap::new(),
    }
}

pub fn create_example_service_config(application_uuid: Uuid) -> ServiceConfig {
    ServiceConfig {
        uuid: None,
        name: String::from("svc1"),
        application_uuid,
        image_uuid: create_example_image_uuid(),
        params: HashMap::new(),
    }
}

pub fn create_example_instance_config(service_uuid: Uuid) -> InstanceConfig {
    InstanceConfig {
        uuid: None,
        name: String::from("inst1"),
        service_uuid,
        params: HashMap::new(),
    }
}

pub fn create_example_instance(service_uuid: Uuid) -> Instance {
    Instance {
        uuid: Uuid::new_v4(),
        name: String::from("inst1"),
        service_uuid,
        params: HashMap::new(),
    }
}

pub fn create_example_chain() -> (Application, Service, Instance) {
    let application = Application {
        uuid: Uuid::new_v4(),
        name: String::from("app1"),
        owner_uuid: create_example_owner_uuid(),
        params: HashMap::new(),
    };
    let service = Service {
        uuid: Uuid::new_v4(),
        name: String::from("svc1"),
        application_uuid: application.uuid,
        image_uuid: create_example_image_uuid(),
        params: HashMap::new(),
    };
    let instance = Instance {
        uuid: Uuid::new_v4(),
        name: String::from("inst1"),
        service_uuid: service.uuid,
        params: HashMap::new(),
    };
    (application, service, instance)
}

pub fn create_example_image_entry(uuid: &Uuid) -> ImageEntry {
    ImageEntry {
        uuid: *uuid,
        name: String::from("base-os"),
        version: String::from("1.0.0"),
    }
}

pub async fn create_initialized_storage() -> Arc<InMemoryKvStore> {
    let storage = Arc::new(InMemoryKvStore::default());
    initialize_buckets(storage.as_ref()).await.unwrap();
    storage
}

pub fn create_validator_with_mocks(
    storage: Arc<dyn KvStore + Send + Sync>,
    directory: MockDirectoryClient,
    images: MockImageRegistryClient,
) -> Arc<ReferenceValidator> {
    Arc::new(ReferenceValidator::new(
        storage,
        Arc::new(directory),
        Arc::new(images),
    ))
}

pub fn directory_resolving_every_owner() -> MockDirectoryClient {
    let mut directory = MockDirectoryClient::new();
    directory.expect_lookup_user().returning(|uuid| {
        Ok(Some(UserEntry {
            uuid: *uuid,
            login: String::from("operator"),
        }))
    });
    directory
}

pub fn directory_with_no_principals() -> MockDirectoryClient {
    let mut directory = MockDirectoryClient::new();
    directory.expect_lookup_user().returning(|_| Ok(None));
    directory
}

pub fn images_resolving_every_image() -> MockImageRegistryClient {
    let mut images = MockImageRegistryClient::new();
    images
        .expect_lookup_image()
        .returning(|uuid| Ok(Some(create_example_image_entry(uuid))));
    images
}

pub async fn seed_example_application(storage: &dyn KvStore) -> (Uuid, Uuid) {
    let application = Application {
        uuid: Uuid::new_v4(),
        name: String::from("app1"),
        owner_uuid: create_example_owner_uuid(),
        params: HashMap::new(),
    };
    storage
        .put(
            APPLICATIONS_BUCKET,
            &application.uuid,
            serde_json::to_value(&application).unwrap(),
        )
        .await
        .unwrap();
    (application.uuid, application.owner_uuid)
}

pub async fn seed_example_service_of(
    storage: &dyn KvStore,
    application_uuid: Uuid,
) -> (Uuid, Uuid) {
    let service = Service {
        uuid: Uuid::new_v4(),
        name: String::from("svc1"),
        application_uuid,
        image_uuid: create_example_image_uuid(),
        params: HashMap::new(),
    };
    storage
        .put(
            SERVICES_BUCKET,
            &service.uuid,
            serde_json::to_value(&service).unwrap(),
        )
        .await
        .unwrap();
    (service.uuid, service.image_uuid)
}

pub async fn seed_example_service(storage: &dyn KvStore) -> Uuid {
    let (application_uuid, _) = seed_example_application(storage).await;
    seed_example_service_of(storage, application_uuid).await.0
}

/// Storage engine double keeping buckets in memory; mirrors the engine's
/// semantics, including the missing-bucket condition.
#[derive(Default)]
pub struct InMemoryKvStore {
    buckets: Mutex<HashMap<String, HashMap<Uuid, Value>>>,
}

#[async_trait]
impl KvStore for InMemoryKvStore {
    async fn ensure_bucket(
        &self,
        bucket: &str,
        _schema: &BucketSchema,
    ) -> Result<(), KvStoreError> {
        self.buckets
            .lock()
            .await
            .entry(bucket.to_string())
            .or_default();
        Ok(())
    }

    async fn put(&self, bucket: &str, uuid: &Uuid, record: Value) -> Result<(), KvStoreError> {
        self.buckets
            .lock()
            .await
            .get_mut(bucket)
            .ok_or_else(|| KvStoreError::MissingBucket(bucket.to_string()))?
            .insert(*uuid, record);
        Ok(())
    }

    async fn get(&self, bucket: &str, uuid: &Uuid) -> Result<Option<Value>, KvStoreError> {
        Ok(self
            .buckets
            .lock()
            .await
            .get(bucket)
            .ok_or_else(|| KvStoreError::MissingBucket(bucket.to_string()))?
            .get(uuid)
            .cloned())
    }

    async fn list(&self, bucket: &str) -> Result<Vec<Value>, KvStoreError> {
        Ok(self
            .buckets
            .lock()
            .await
            .get(bucket)
            .ok_or_else(|| KvStoreError::MissingBucket(bucket.to_string()))?
            .values()
            .cloned()
            .collect())
    }

    async fn delete(&self, bucket: &str, uuid: &Uuid) -> Result<(), KvStoreError> {
        self.buckets
            .lock()
            .await
            .get_mut(bucket)
            .ok_or_else(|| KvStoreError::MissingBucket(bucket.to_string()))?
            .remove(uuid);
        Ok(())
    }
}

mock! {
    pub KvStore {}

    #[async_trait]
    impl KvStore for KvStore {
        async fn ensure_bucket(&self, bucket: &str, schema: &BucketSchema) -> Result<(), KvStoreError>;
        async fn put(&self, bucket: &str, uuid: &Uuid, record: Value) -> Result<(), KvStoreError>;
        async fn get(&self, bucket: &str, uuid: &Uuid) -> Result<Option<Value>, KvStoreError>;
        async fn list(&self, bucket: &str) -> Result<Vec<Value>, KvStoreError>;
        async fn delete(&self, bucket: &str, uuid: &Uuid) -> Result<(), KvStoreError>;
    }
}

mock! {
    pub DirectoryClient {}

    #[async_trait]
    impl DirectoryClient for DirectoryClient {
        async fn lookup_user(&self, uuid: &Uuid) -> Result<Option<UserEntry>, DirectoryClientError>;
    }
}

mock! {
    pub ImageRegistryClient {}

    #[async_trait]
    impl ImageRegistryClient for ImageRegistryClient {
        async fn lookup_image(&self, uuid: &Uuid) -> Result<Option<ImageEntry>, ImageRegistryClientError>;
    }
}

mock! {
    pub WorkloadProvisioner {}

    #[async_trait]
    impl WorkloadProvisioner for WorkloadProvisioner {
        async fn create_workload(
            &self,
            params: HashMap<String, String>,
        ) -> Result<WorkloadHandle, WorkloadProvisionerError>;
    }
}

mock! {
    pub Registry {}

    #[async_trait]
    impl Registry for Registry {
        async fn create_application(&self, config: ApplicationConfig) -> Result<Application, RegistryError>;
        async fn list_applications(&self) -> Result<Vec<Application>, RegistryError>;
        async fn get_application(&self, uuid: &Uuid) -> Result<Option<Application>, RegistryError>;
        async fn delete_application(&self, uuid: &Uuid) -> Result<(), RegistryError>;
        async fn create_service(&self, config: ServiceConfig) -> Result<Service, RegistryError>;
        async fn list_services(&self) -> Result<Vec<Service>, RegistryError>;
        async fn get_service(&self, uuid: &Uuid) -> Result<Option<Service>, RegistryError>;
        async fn delete_service(&self, uuid: &Uuid) -> Result<(), RegistryError>;
        async fn create_instance(&self, config: InstanceConfig) -> Result<Instance, RegistryError>;
        async fn list_instances(&self) -> Result<Vec<Instance>, RegistryError>;
        async fn get_instance(&self, uuid: &Uuid) -> Result<Option<Instance>, RegistryError>;
        async fn delete_instance(&self, uuid: &Uuid) -> Result<(), RegistryError>;
        async fn deploy_instance(&self, uuid: &Uuid) -> Result<WorkloadHandle, DeployError>;
    }
}
