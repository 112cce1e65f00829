use crate::{
    db::DbPool,
    entities::concrete_type::{self, IngredientList, RecipeIngredient},
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
pub struct CreateConcreteType {
    pub name: String,
    pub description: String,
    pub characteristic_strength: Decimal,
    pub ingredients: Vec<RecipeIngredient>,
}

#[derive(Debug, Default)]
pub struct UpdateConcreteType {
    pub name: Option<String>,
    pub description: Option<String>,
    pub characteristic_strength: Option<Decimal>,
    pub ingredients: Option<Vec<RecipeIngredient>>,
}

/// Service for managing concrete mix recipes.
#[derive(Clone)]
pub struct ConcreteTypeService {
    db: Arc<DbPool>,
    store: Arc<RegistryStore>,
}

impl ConcreteTypeService {
    pub fn new(db: Arc<DbPool>, store: Arc<RegistryStore>) -> Self {
        Self { db, store }
    }

    #[instrument(skip(self))]
    pub async fn create(&self, cmd: CreateConcreteType) -> Result<Uuid, ServiceError> {
        if cmd.name.trim().is_empty() {
            return Err(ServiceError::ValidationError(
                "Concrete type name is required".into(),
            ));
        }

        let model = concrete_type::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(cmd.name),
            description: Set(cmd.description),
            characteristic_strength: Set(cmd.characteristic_strength),
            ingredients: Set(accept_ingredients(cmd.ingredients)),
        }
        .insert(&*self.db)
        .await?;

        info!(
            "Concrete type created: {} ({} ingredients)",
            model.id,
            model.ingredients.len()
        );
        let id = model.id;
        self.store.insert_concrete_type(model).await;
        Ok(id)
    }

    #[instrument(skip(self))]
    pub async fn update(
        &self,
        id: Uuid,
        cmd: UpdateConcreteType,
    ) -> Result<concrete_type::Model, ServiceError> {
        if matches!(&cmd.name, Some(name) if name.trim().is_empty()) {
            return Err(ServiceError::ValidationError(
                "Concrete type name is required".into(),
            ));
        }

        let mut active = concrete_type::ActiveModel {
            id: Set(id),
            ..Default::default()
        };
        if let Some(name) = cmd.name {
            active.name = Set(name);
        }
        if let Some(description) = cmd.description {
            active.description = Set(description);
        }
        if let Some(strength) = cmd.characteristic_strength {
            active.characteristic_strength = Set(strength);
        }
        if let Some(ingredients) = cmd.ingredients {
            active.ingredients = Set(accept_ingredients(ingredients));
        }

        let model = active
            .update(&*self.db)
            .await
            .map_err(record_not_found("Concrete type", id))?;

        self.store.update_concrete_type(model.clone()).await;
        Ok(model)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
        let result = concrete_type::Entity::delete_by_id(id)
            .exec(&*self.db)
            .await?;
        if result.rows_affected == 0 {
            return Err(ServiceError::NotFound(format!(
                "Concrete type {} not found",
                id
            )));
        }

        info!("Concrete type deleted: {}", id);
        self.store.remove_concrete_type(id).await;
        Ok(())
    }

    pub async fn list(&self) -> Vec<concrete_type::Model> {
        self.store.read(|s| s.concrete_types.clone()).await
    }
}

/// An ingredient entry only enters a recipe with a material selected and a
/// positive quantity; anything else is dropped. Submission order is kept.
fn accept_ingredients(entries: Vec<RecipeIngredient>) -> IngredientList {
    IngredientList(
        entries
            .into_iter()
            .filter(|entry| entry.quantity > Decimal::ZERO)
            .collect(),
    )
}
