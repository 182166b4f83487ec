use std::sync::Arc;

use log::info;
use steward_client::service::{Service, ServiceConfig};
use uuid::Uuid;

use super::api::RegistryError;
use super::validator::ReferenceValidator;
use crate::storage::kv_store::{KvStore, SERVICES_BUCKET};

pub struct ServiceRepository {
    storage: Arc<dyn KvStore + Send + Sync>,
    validator: Arc<ReferenceValidator>,
}

impl ServiceRepository {
    pub fn new(storage: Arc<dyn KvStore + Send + Sync>, validator: Arc<ReferenceValidator>) -> Self {
        Self { storage, validator }
    }

    /// Referential checks run in order, application first; the first failure
    /// aborts the create before anything is written.
    pub async fn create(&self, config: ServiceConfig) -> Result<Service, RegistryError> {
        if config.name.is_empty() {
            return Err(RegistryError::MissingField("name"));
        }
        if !self
            .validator
            .application_exists(&config.application_uuid)
            .await?
        {
            return Err(RegistryError::MissingApplication(config.application_uuid));
        }
        if !self.validator.image_exists(&config.image_uuid).await? {
            return Err(RegistryError::MissingImage(config.image_uuid));
        }
        let service = Service {
            uuid: config.uuid.unwrap_or_else(Uuid::new_v4),
            name: config.name,
            application_uuid: config.application_uuid,
            image_uuid: config.image_uuid,
            params: config.params,
        };
        let record = serde_json::to_value(&service)
            .map_err(|err| RegistryError::StorageFail(err.to_string()))?;
        self.storage
            .put(SERVICES_BUCKET, &service.uuid, record)
            .await
            .map_err(|err| RegistryError::StorageFail(err.to_string()))?;
        info!(
            "Created service '{}' with uuid: '{}' in application '{}'",
            service.name, service.uuid, service.application_uuid
        );
        Ok(service)
    }

    pub async fn list(&self) -> Result<Vec<Service>, RegistryError> {
        let records = self
            .storage
            .list(SERVICES_BUCKET)
            .await
            .map_err(|err| RegistryError::StorageFail(err.to_string()))?;
        records
            .into_iter()
            .map(|record| {
                serde_json::from_value(record)
                    .map_err(|err| RegistryError::StorageFail(err.to_string()))
            })
            .collect()
    }

    pub async fn get(&self, uuid: &Uuid) -> Result<Option<Service>, RegistryError> {
        match self
            .storage
            .get(SERVICES_BUCKET, uuid)
            .await
            .map_err(|err| RegistryError::StorageFail(err.to_string()))?
        {
            Some(record) => serde_json::from_value(record)
                .map(Some)
                .map_err(|err| RegistryError::StorageFail(err.to_string())),
            None => Ok(None),
        }
    }

    pub async fn delete(&self, uuid: &Uuid) -> Result<(), RegistryError> {
        self.storage
            .delete(SERVICES_BUCKET, uuid)
            .await
            .map_err(|err| RegistryError::StorageFail(err.to_string()))
    }
}
