use std::sync::Arc;

use log::info;
use steward_client::instance::{Instance, InstanceConfig};
use uuid::Uuid;

use super::api::RegistryError;
use super::validator::ReferenceValidator;
use crate::storage::kv_store::{KvStore, INSTANCES_BUCKET};

pub struct InstanceRepository {
    storage: Arc<dyn KvStore + Send + Sync>,
    validator: Arc<ReferenceValidator>,
}

impl InstanceRepository {
    pub fn new(storage: Arc<dyn KvStore + Send + Sync>, validator: Arc<ReferenceValidator>) -> Self {
        Self { storage, validator }
    }

    pub async fn create(&self, config: InstanceConfig) -> Result<Instance, RegistryError> {
        if config.name.is_empty() {
            return Err(RegistryError::MissingField("name"));
        }
        if !self.validator.service_exists(&config.service_uuid).await? {
            return Err(RegistryError::MissingService(config.service_uuid));
        }
        let instance = Instance {
            uuid: config.uuid.unwrap_or_else(Uuid::new_v4),
            name: config.name,
            service_uuid: config.service_uuid,
            params: config.params,
        };
        let record = serde_json::to_value(&instance)
            .map_err(|err| RegistryError::StorageFail(err.to_string()))?;
        self.storage
            .put(INSTANCES_BUCKET, &instance.uuid, record)
            .await
            .map_err(|err| RegistryError::StorageFail(err.to_string()))?;
        info!(
            "Created instance '{}' with uuid: '{}' in service '{}'",
            instance.name, instance.uuid, instance.service_uuid
        );
        Ok(instance)
    }

    pub async fn list(&self) -> Result<Vec<Instance>, RegistryError> {
        let records = self
            .storage
            .list(INSTANCES_BUCKET)
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

    pub async fn get(&self, uuid: &Uuid) -> Result<Option<Instance>, RegistryError> {
        match self
            .storage
            .get(INSTANCES_BUCKET, uuid)
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
            .delete(INSTANCES_BUCKET, uuid)
            .await
            .map_err(|err| RegistryError::StorageFail(err.to_string()))
    }
}
