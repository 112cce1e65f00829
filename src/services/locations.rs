use crate::{
    db::DbPool,
    entities::location,
    errors::ServiceError,
    services::record_not_found,
    store::RegistryStore,
};
use sea_orm::{ActiveModelTrait, EntityTrait, Set};
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

#[derive(Debug)]
pub struct CreateLocation {
    pub name: String,
    pub cost_center: String,
}

#[derive(Debug, Default)]
pub struct UpdateLocation {
    pub name: Option<String>,
    pub cost_center: Option<String>,
}

/// Service for managing pour locations.
#[derive(Clone)]
pub struct LocationService {
    db: Arc<DbPool>,
    store: Arc<RegistryStore>,
}

impl LocationService {
    pub fn new(db: Arc<DbPool>, store: Arc<RegistryStore>) -> Self {
        Self { db, store }
    }

    #[instrument(skip(self))]
    pub async fn create(&self, cmd: CreateLocation) -> Result<Uuid, ServiceError> {
        if cmd.name.trim().is_empty() {
            return Err(ServiceError::ValidationError(
                "Location name is required".into(),
            ));
        }

        let model = location::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(cmd.name),
            cost_center: Set(cmd.cost_center),
        }
        .insert(&*self.db)
        .await?;

        info!("Location created: {}", model.id);
        let id = model.id;
        self.store.insert_location(model).await;
        Ok(id)
    }

    /// Merge-updates the location: fields absent from the command are left
    /// untouched in the database and in the snapshot.
    #[instrument(skip(self))]
    pub async fn update(
        &self,
        id: Uuid,
        cmd: UpdateLocation,
    ) -> Result<location::Model, ServiceError> {
        if matches!(&cmd.name, Some(name) if name.trim().is_empty()) {
            return Err(ServiceError::ValidationError(
                "Location name is required".into(),
            ));
        }

        let mut active = location::ActiveModel {
            id: Set(id),
            ..Default::default()
        };
        if let Some(name) = cmd.name {
            active.name = Set(name);
        }
        if let Some(cost_center) = cmd.cost_center {
            active.cost_center = Set(cost_center);
        }

        let model = active
            .update(&*self.db)
            .await
            .map_err(record_not_found("Location", id))?;

        self.store.update_location(model.clone()).await;
        Ok(model)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
        let result = location::Entity::delete_by_id(id).exec(&*self.db).await?;
        if result.rows_affected == 0 {
            return Err(ServiceError::NotFound(format!("Location {} not found", id)));
        }

        info!("Location deleted: {}", id);
        self.store.remove_location(id).await;
        Ok(())
    }

    pub async fn list(&self) -> Vec<location::Model> {
        self.store.read(|s| s.locations.clone()).await
    }
}
