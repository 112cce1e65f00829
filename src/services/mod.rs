pub mod analysis;
pub mod concrete_types;
pub mod dashboard;
pub mod devices;
pub mod inputs;
pub mod locations;
pub mod period;
pub mod pours;
pub mod suppliers;

use crate::errors::ServiceError;
use sea_orm::DbErr;
use uuid::Uuid;

/// Maps SeaORM's merge-update miss onto our NotFound variant.
pub(crate) fn record_not_found(entity: &'static str, id: Uuid) -> impl FnOnce(DbErr) -> ServiceError {
    move |err| match err {
        DbErr::RecordNotUpdated => ServiceError::NotFound(format!("{} {} not found", entity, id)),
        other => ServiceError::DatabaseError(other),
    }
}
