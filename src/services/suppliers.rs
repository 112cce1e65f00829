use crate::{
    db::DbPool,
    entities::supplier,
    errors::ServiceError,
    services::record_not_found,
    store::RegistryStore,
};
use sea_orm::{ActiveModelTrait, EntityTrait, Set};
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

#[derive(Debug)]
pub struct CreateSupplier {
    pub name: String,
    pub contact: String,
    pub rating: i16,
}

#[derive(Debug, Default)]
pub struct UpdateSupplier {
    pub name: Option<String>,
    pub contact: Option<String>,
    pub rating: Option<i16>,
}

/// Service for managing concrete suppliers.
#[derive(Clone)]
pub struct SupplierService {
    db: Arc<DbPool>,
    store: Arc<RegistryStore>,
}

impl SupplierService {
    pub fn new(db: Arc<DbPool>, store: Arc<RegistryStore>) -> Self {
        Self { db, store }
    }

    #[instrument(skip(self))]
    pub async fn create(&self, cmd: CreateSupplier) -> Result<Uuid, ServiceError> {
        if cmd.name.trim().is_empty() {
            return Err(ServiceError::ValidationError(
                "Supplier name is required".into(),
            ));
        }
        validate_rating(cmd.rating)?;

        let model = supplier::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(cmd.name),
            contact: Set(cmd.contact),
            rating: Set(cmd.rating),
        }
        .insert(&*self.db)
        .await?;

        info!("Supplier created: {}", model.id);
        let id = model.id;
        self.store.insert_supplier(model).await;
        Ok(id)
    }

    #[instrument(skip(self))]
    pub async fn update(
        &self,
        id: Uuid,
        cmd: UpdateSupplier,
    ) -> Result<supplier::Model, ServiceError> {
        if matches!(&cmd.name, Some(name) if name.trim().is_empty()) {
            return Err(ServiceError::ValidationError(
                "Supplier name is required".into(),
            ));
        }
        if let Some(rating) = cmd.rating {
            validate_rating(rating)?;
        }

        let mut active = supplier::ActiveModel {
            id: Set(id),
            ..Default::default()
        };
        if let Some(name) = cmd.name {
            active.name = Set(name);
        }
        if let Some(contact) = cmd.contact {
            active.contact = Set(contact);
        }
        if let Some(rating) = cmd.rating {
            active.rating = Set(rating);
        }

        let model = active
            .update(&*self.db)
            .await
            .map_err(record_not_found("Supplier", id))?;

        self.store.update_supplier(model.clone()).await;
        Ok(model)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
        let result = supplier::Entity::delete_by_id(id).exec(&*self.db).await?;
        if result.rows_affected == 0 {
            return Err(ServiceError::NotFound(format!("Supplier {} not found", id)));
        }

        info!("Supplier deleted: {}", id);
        self.store.remove_supplier(id).await;
        Ok(())
    }

    pub async fn list(&self) -> Vec<supplier::Model> {
        self.store.read(|s| s.suppliers.clone()).await
    }
}

fn validate_rating(rating: i16) -> Result<(), ServiceError> {
    if !(1..=5).contains(&rating) {
        return Err(ServiceError::ValidationError(
            "Supplier rating must be between 1 and 5".into(),
        ));
    }
    Ok(())
}
