use crate::{
    db::DbPool,
    entities::input::{self, Unit},
    errors::ServiceError,
    services::record_not_found,
    store::RegistryStore,
};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, EntityTrait, Set};
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

#[derive(Debug)]
pub struct CreateInput {
    pub name: String,
    pub unit: Unit,
    pub price: Decimal,
}

#[derive(Debug, Default)]
pub struct UpdateInput {
    pub name: Option<String>,
    pub unit: Option<Unit>,
    pub price: Option<Decimal>,
}

/// Service for managing material inputs. The sequential `code` is derived
/// here, never taken from the caller.
#[derive(Clone)]
pub struct InputService {
    db: Arc<DbPool>,
    store: Arc<RegistryStore>,
}

impl InputService {
    pub fn new(db: Arc<DbPool>, store: Arc<RegistryStore>) -> Self {
        Self { db, store }
    }

    #[instrument(skip(self))]
    pub async fn create(&self, cmd: CreateInput) -> Result<Uuid, ServiceError> {
        if cmd.name.trim().is_empty() {
            return Err(ServiceError::ValidationError(
                "Input name is required".into(),
            ));
        }
        validate_price(cmd.price)?;

        let code = self.store.read(|snap| next_input_code(&snap.inputs)).await;

        let model = input::ActiveModel {
            id: Set(Uuid::new_v4()),
            code: Set(code),
            name: Set(cmd.name),
            unit: Set(cmd.unit),
            price: Set(cmd.price),
        }
        .insert(&*self.db)
        .await?;

        info!("Input created: {} (code #{})", model.id, model.code);
        let id = model.id;
        self.store.insert_input(model).await;
        Ok(id)
    }

    /// Merge-update. `code` is immutable once assigned.
    #[instrument(skip(self))]
    pub async fn update(&self, id: Uuid, cmd: UpdateInput) -> Result<input::Model, ServiceError> {
        if matches!(&cmd.name, Some(name) if name.trim().is_empty()) {
            return Err(ServiceError::ValidationError(
                "Input name is required".into(),
            ));
        }
        if let Some(price) = cmd.price {
            validate_price(price)?;
        }

        let mut active = input::ActiveModel {
            id: Set(id),
            ..Default::default()
        };
        if let Some(name) = cmd.name {
            active.name = Set(name);
        }
        if let Some(unit) = cmd.unit {
            active.unit = Set(unit);
        }
        if let Some(price) = cmd.price {
            active.price = Set(price);
        }

        let model = active
            .update(&*self.db)
            .await
            .map_err(record_not_found("Input", id))?;

        self.store.update_input(model.clone()).await;
        Ok(model)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
        let result = input::Entity::delete_by_id(id).exec(&*self.db).await?;
        if result.rows_affected == 0 {
            return Err(ServiceError::NotFound(format!("Input {} not found", id)));
        }

        info!("Input deleted: {}", id);
        self.store.remove_input(id).await;
        Ok(())
    }

    /// Listing sorted by ascending material code.
    pub async fn list(&self) -> Vec<input::Model> {
        self.store
            .read(|snap| {
                let mut inputs = snap.inputs.clone();
                inputs.sort_by_key(|i| i.code);
                inputs
            })
            .await
    }
}

/// Highest existing code + 1; 1 for an empty registry.
pub fn next_input_code(inputs: &[input::Model]) -> i32 {
    inputs.iter().map(|i| i.code).max().map_or(1, |max| max + 1)
}

fn validate_price(price: Decimal) -> Result<(), ServiceError> {
    if price <= Decimal::ZERO {
        return Err(ServiceError::ValidationError(
            "Input price must be greater than zero".into(),
        ));
    }
    Ok(())
}
