use sea_orm::entity::prelude::*;
use sea_orm::FromJsonQueryResult;
use serde::{Deserialize, Serialize};

/// A named concrete mix recipe ("FCK 30 Bombeável") with its target
/// characteristic strength in MPa and an ordered material composition.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "tipos_concreto")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub characteristic_strength: Decimal,
    /// Ordered list of {input, quantity per m³}. May be empty. Stored as a
    /// JSON column: the recipe belongs to the mix and is always read and
    /// written whole, never queried by ingredient.
    #[sea_orm(column_type = "Json")]
    pub ingredients: IngredientList,
}

/// One line of a mix recipe: quantity of a material input per cubic meter.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct RecipeIngredient {
    pub input_id: Uuid,
    pub quantity: Decimal,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct IngredientList(pub Vec<RecipeIngredient>);

impl IngredientList {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
