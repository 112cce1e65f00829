use crate::{
    db::DbPool,
    entities::device,
    errors::ServiceError,
    services::record_not_found,
    store::RegistryStore,
};
use sea_orm::{ActiveModelTrait, EntityTrait, Set};
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

#[derive(Debug)]
pub struct CreateDevice {
    pub device_type: String,
    pub ua: String,
    pub location_id: Uuid,
}

#[derive(Debug, Default)]
pub struct UpdateDevice {
    pub device_type: Option<String>,
    pub ua: Option<String>,
    pub location_id: Option<Uuid>,
}

/// Service for managing field devices (appropriation units).
#[derive(Clone)]
pub struct DeviceService {
    db: Arc<DbPool>,
    store: Arc<RegistryStore>,
}

impl DeviceService {
    pub fn new(db: Arc<DbPool>, store: Arc<RegistryStore>) -> Self {
        Self { db, store }
    }

    #[instrument(skip(self))]
    pub async fn create(&self, cmd: CreateDevice) -> Result<Uuid, ServiceError> {
        if cmd.device_type.trim().is_empty() || cmd.ua.trim().is_empty() {
            return Err(ServiceError::ValidationError(
                "Device type and UA are required".into(),
            ));
        }
        self.require_location(cmd.location_id).await?;

        let model = device::ActiveModel {
            id: Set(Uuid::new_v4()),
            device_type: Set(cmd.device_type),
            ua: Set(cmd.ua),
            location_id: Set(cmd.location_id),
        }
        .insert(&*self.db)
        .await?;

        info!("Device created: {}", model.id);
        let id = model.id;
        self.store.insert_device(model).await;
        Ok(id)
    }

    #[instrument(skip(self))]
    pub async fn update(&self, id: Uuid, cmd: UpdateDevice) -> Result<device::Model, ServiceError> {
        if matches!(&cmd.device_type, Some(t) if t.trim().is_empty())
            || matches!(&cmd.ua, Some(ua) if ua.trim().is_empty())
        {
            return Err(ServiceError::ValidationError(
                "Device type and UA are required".into(),
            ));
        }
        if let Some(location_id) = cmd.location_id {
            self.require_location(location_id).await?;
        }

        let mut active = device::ActiveModel {
            id: Set(id),
            ..Default::default()
        };
        if let Some(device_type) = cmd.device_type {
            active.device_type = Set(device_type);
        }
        if let Some(ua) = cmd.ua {
            active.ua = Set(ua);
        }
        if let Some(location_id) = cmd.location_id {
            active.location_id = Set(location_id);
        }

        let model = active
            .update(&*self.db)
            .await
            .map_err(record_not_found("Device", id))?;

        self.store.update_device(model.clone()).await;
        Ok(model)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
        let result = device::Entity::delete_by_id(id).exec(&*self.db).await?;
        if result.rows_affected == 0 {
            return Err(ServiceError::NotFound(format!("Device {} not found", id)));
        }

        info!("Device deleted: {}", id);
        self.store.remove_device(id).await;
        Ok(())
    }

    /// Full listing, sorted by owning-location name then device type.
    pub async fn list(&self) -> Vec<device::Model> {
        self.store
            .read(|snap| {
                let mut devices = snap.devices.clone();
                devices.sort_by(|a, b| {
                    let loc_a = snap.location_name(a.location_id).unwrap_or("");
                    let loc_b = snap.location_name(b.location_id).unwrap_or("");
                    loc_a
                        .to_lowercase()
                        .cmp(&loc_b.to_lowercase())
                        .then_with(|| {
                            a.device_type
                                .to_lowercase()
                                .cmp(&b.device_type.to_lowercase())
                        })
                });
                devices
            })
            .await
    }

    /// The device choice set for a pour at `location_id`: only devices
    /// installed there are offered.
    pub async fn list_for_location(&self, location_id: Uuid) -> Vec<device::Model> {
        self.store
            .read(|snap| {
                snap.devices
                    .iter()
                    .filter(|d| d.location_id == location_id)
                    .cloned()
                    .collect()
            })
            .await
    }

    async fn require_location(&self, location_id: Uuid) -> Result<(), ServiceError> {
        let exists = self
            .store
            .read(|snap| snap.locations.iter().any(|l| l.id == location_id))
            .await;
        if !exists {
            return Err(ServiceError::ValidationError(format!(
                "Device must reference an existing location (got {})",
                location_id
            )));
        }
        Ok(())
    }
}
