use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One recorded delivery of ready-mix concrete.
///
/// Reference columns deliberately carry no foreign-key constraint: deleting
/// a registry entry must never touch historical pours, and reads substitute
/// placeholder labels for references that no longer resolve.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "concretagens")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub date: Date,
    /// Supplier delivery invoice number (NF), free text.
    pub invoice_number: String,
    pub location_id: Uuid,
    pub device_id: Option<Uuid>,
    pub supplier_id: Uuid,
    pub concrete_type_id: Uuid,
    /// Invoiced volume in cubic meters.
    pub volume_delivered: Decimal,
    pub truck_id: Option<String>,
    pub notes: Option<String>,
    pub weather: Option<Weather>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(8))")]
pub enum Weather {
    #[sea_orm(string_value = "Sunny")]
    Sunny,
    #[sea_orm(string_value = "Cloudy")]
    Cloudy,
    #[sea_orm(string_value = "Rainy")]
    Rainy,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
