use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Raw material consumed by a concrete mix (cement, aggregate, admixture).
///
/// `code` is assigned server-side as max existing code + 1; it is never
/// taken from the request payload.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "insumos")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub code: i32,
    pub name: String,
    pub unit: Unit,
    pub price: Decimal,
}

/// Purchase unit for a material input. String values match the labels the
/// original deployment stored (`saco` = bag, `un` = unit).
#[derive(Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(8))")]
pub enum Unit {
    #[sea_orm(string_value = "m³")]
    #[serde(rename = "m³")]
    CubicMeter,
    #[sea_orm(string_value = "kg")]
    #[serde(rename = "kg")]
    Kilogram,
    #[sea_orm(string_value = "saco")]
    #[serde(rename = "saco")]
    Bag,
    #[sea_orm(string_value = "l")]
    #[serde(rename = "l")]
    Liter,
    #[sea_orm(string_value = "ton")]
    #[serde(rename = "ton")]
    Ton,
    #[sea_orm(string_value = "un")]
    #[serde(rename = "un")]
    Each,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
