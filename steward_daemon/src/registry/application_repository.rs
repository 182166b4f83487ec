use std::sync::Arc;

use log::info;
use steward_client::application::{Application, ApplicationConfig};
use uuid::Uuid;

use super::api::RegistryError;
use super::validator::ReferenceValidator;
use crate::storage::kv_store::{KvStore, APPLICATIONS_BUCKET};

pub struct ApplicationRepository {
    storage: Arc<dyn KvStore + Send + Sync>,
    validator: Arc<ReferenceValidator>,
}

impl ApplicationRepository {
    pub fn new(storage: Arc<dyn KvStore + Send + Sync>, validator: Arc<ReferenceValidator>) -> Self {
        Self { storage, validator }
    }

    /// Validates and persists a new application. Nothing is written unless
    /// every check has passed.
    pub async fn create(&self, config: ApplicationConfig) -> Result<Application, RegistryError> {
        if config.name.is_empty() {
            return Err(RegistryError::MissingField("name"));
        }
        if !self.validator.owner_exists(&config.owner_uuid).await {
            return Err(RegistryError::MissingOwner(config.owner_uuid));
        }
        let application = Application {
            uuid: config.uuid.unwrap_or_else(Uuid::new_v4),
            name: config.name,
            owner_uuid: config.owner_uuid,
            params: config.params,
        };
        let record = serde_json::to_value(&application)
            .map_err(|err| RegistryError::StorageFail(err.to_string()))?;
        self.storage
            .put(APPLICATIONS_BUCKET, &application.uuid, record)
            .await
            .map_err(|err| RegistryError::StorageFail(err.to_string()))?;
        info!(
            "Created application '{}' with uuid: '{}'",
            application.name, application.uuid
        );
        Ok(application)
    }

    pub async fn list(&self) -> Result<Vec<Application>, RegistryError> {
        let records = self
            .storage
            .list(APPLICATIONS_BUCKET)
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

    pub async fn get(&self, uuid: &Uuid) -> Result<Option<Application>, RegistryError> {
        match self
            .storage
            .get(APPLICATIONS_BUCKET, uuid)
            .await
            .map_err(|err| RegistryError::StorageFail(err.to_string()))?
        {
            Some(record) => serde_json::from_value(record)
                .map(Some)
                .map_err(|err| RegistryError::StorageFail(err.to_string())),
            None => Ok(None),
        }
    }

    /// Removes by identifier; dependent services are left untouched, their
    /// references were checked at creation time only.
    pub async fn delete(&self, uuid: &Uuid) -> Result<(), RegistryError> {
        self.storage
            .delete(APPLICATIONS_BUCKET, uuid)
            .await
            .map_err(|err| RegistryError::StorageFail(err.to_string()))
    }
}
