use crate::{
    db::DbPool,
    entities::pour::{self, Weather},
    errors::ServiceError,
    services::record_not_found,
    store::{RegistrySnapshot, RegistryStore},
};
use chrono::{Local, NaiveDate};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, EntityTrait, Set};
use serde::Deserialize;
use std::cmp::Ordering;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

#[derive(Debug)]
pub struct CreatePour {
    /// Defaults to the local calendar day when absent.
    pub date: Option<NaiveDate>,
    pub invoice_number: String,
    pub location_id: Uuid,
    pub device_id: Option<Uuid>,
    pub supplier_id: Uuid,
    pub concrete_type_id: Uuid,
    pub volume_delivered: Decimal,
    pub truck_id: Option<String>,
    pub notes: Option<String>,
    pub weather: Option<Weather>,
}

#[derive(Debug, Default)]
pub struct UpdatePour {
    pub date: Option<NaiveDate>,
    pub invoice_number: Option<String>,
    pub location_id: Option<Uuid>,
    /// `Some(None)` clears the device link.
    pub device_id: Option<Option<Uuid>>,
    pub supplier_id: Option<Uuid>,
    pub concrete_type_id: Option<Uuid>,
    pub volume_delivered: Option<Decimal>,
    pub truck_id: Option<Option<String>>,
    pub notes: Option<Option<String>>,
    pub weather: Option<Option<Weather>>,
}

/// Sortable columns of the pour history table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PourSortKey {
    Date,
    /// Invoice number.
    Nf,
    Location,
    Supplier,
    Volume,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Asc,
    Desc,
}

/// Service for recording concrete pours.
#[derive(Clone)]
pub struct PourService {
    db: Arc<DbPool>,
    store: Arc<RegistryStore>,
}

impl PourService {
    pub fn new(db: Arc<DbPool>, store: Arc<RegistryStore>) -> Self {
        Self { db, store }
    }

    #[instrument(skip(self))]
    pub async fn create(&self, cmd: CreatePour) -> Result<Uuid, ServiceError> {
        validate_volume(cmd.volume_delivered)?;
        if let Some(device_id) = cmd.device_id {
            self.require_device_at(device_id, cmd.location_id).await?;
        }

        let date = cmd.date.unwrap_or_else(|| Local::now().date_naive());

        let model = pour::ActiveModel {
            id: Set(Uuid::new_v4()),
            date: Set(date),
            invoice_number: Set(cmd.invoice_number),
            location_id: Set(cmd.location_id),
            device_id: Set(cmd.device_id),
            supplier_id: Set(cmd.supplier_id),
            concrete_type_id: Set(cmd.concrete_type_id),
            volume_delivered: Set(cmd.volume_delivered),
            truck_id: Set(cmd.truck_id),
            notes: Set(cmd.notes),
            weather: Set(cmd.weather),
        }
        .insert(&*self.db)
        .await?;

        info!("Pour recorded: {} ({} m³)", model.id, model.volume_delivered);
        let id = model.id;
        self.store.insert_pour(model).await;
        Ok(id)
    }

    #[instrument(skip(self))]
    pub async fn update(&self, id: Uuid, cmd: UpdatePour) -> Result<pour::Model, ServiceError> {
        if let Some(volume) = cmd.volume_delivered {
            validate_volume(volume)?;
        }

        // The device must belong to the pour's location, whichever of the
        // two the command is changing.
        let effective_location = match cmd.location_id {
            Some(location_id) => Some(location_id),
            None => {
                self.store
                    .read(|s| s.pours.iter().find(|p| p.id == id).map(|p| p.location_id))
                    .await
            }
        };
        let effective_device = match cmd.device_id {
            Some(device) => device,
            None => self
                .store
                .read(|s| s.pours.iter().find(|p| p.id == id).and_then(|p| p.device_id))
                .await,
        };
        if let (Some(device_id), Some(location_id)) = (effective_device, effective_location) {
            self.require_device_at(device_id, location_id).await?;
        }

        let mut active = pour::ActiveModel {
            id: Set(id),
            ..Default::default()
        };
        if let Some(date) = cmd.date {
            active.date = Set(date);
        }
        if let Some(invoice_number) = cmd.invoice_number {
            active.invoice_number = Set(invoice_number);
        }
        if let Some(location_id) = cmd.location_id {
            active.location_id = Set(location_id);
        }
        if let Some(device_id) = cmd.device_id {
            active.device_id = Set(device_id);
        }
        if let Some(supplier_id) = cmd.supplier_id {
            active.supplier_id = Set(supplier_id);
        }
        if let Some(concrete_type_id) = cmd.concrete_type_id {
            active.concrete_type_id = Set(concrete_type_id);
        }
        if let Some(volume) = cmd.volume_delivered {
            active.volume_delivered = Set(volume);
        }
        if let Some(truck_id) = cmd.truck_id {
            active.truck_id = Set(truck_id);
        }
        if let Some(notes) = cmd.notes {
            active.notes = Set(notes);
        }
        if let Some(weather) = cmd.weather {
            active.weather = Set(weather);
        }

        let model = active
            .update(&*self.db)
            .await
            .map_err(record_not_found("Pour", id))?;

        self.store.update_pour(model.clone()).await;
        Ok(model)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
        let result = pour::Entity::delete_by_id(id).exec(&*self.db).await?;
        if result.rows_affected == 0 {
            return Err(ServiceError::NotFound(format!("Pour {} not found", id)));
        }

        info!("Pour deleted: {}", id);
        self.store.remove_pour(id).await;
        Ok(())
    }

    /// Full history, sorted by the requested column.
    pub async fn list_sorted(&self, key: PourSortKey, direction: SortDirection) -> Vec<pour::Model> {
        self.store
            .read(|snap| {
                let mut pours = snap.pours.clone();
                sort_pours(&mut pours, key, direction, snap);
                pours
            })
            .await
    }

    async fn require_device_at(&self, device_id: Uuid, location_id: Uuid) -> Result<(), ServiceError> {
        let belongs = self
            .store
            .read(|snap| {
                snap.devices
                    .iter()
                    .any(|d| d.id == device_id && d.location_id == location_id)
            })
            .await;
        if !belongs {
            return Err(ServiceError::ValidationError(
                "Selected device does not belong to the selected location".into(),
            ));
        }
        Ok(())
    }
}

/// Parses the volume text of the entry form into the domain type. This is
/// the single string-to-number boundary for pour volumes.
pub fn parse_volume(text: &str) -> Result<Decimal, ServiceError> {
    let volume = Decimal::from_str(text.trim()).map_err(|_| {
        ServiceError::ValidationError(format!("Invalid volume value: '{}'", text))
    })?;
    validate_volume(volume)?;
    Ok(volume)
}

fn validate_volume(volume: Decimal) -> Result<(), ServiceError> {
    if volume < Decimal::ZERO {
        return Err(ServiceError::ValidationError(
            "Delivered volume cannot be negative".into(),
        ));
    }
    Ok(())
}

/// Sorts the history in place. String columns compare case-insensitively;
/// `location` and `supplier` compare by the referenced display name, with a
/// dangling reference sorting as the empty string so unresolved records
/// cluster together.
pub fn sort_pours(
    pours: &mut [pour::Model],
    key: PourSortKey,
    direction: SortDirection,
    snap: &RegistrySnapshot,
) {
    pours.sort_by(|a, b| {
        let ordering = compare(a, b, key, snap);
        match direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
}

fn compare(a: &pour::Model, b: &pour::Model, key: PourSortKey, snap: &RegistrySnapshot) -> Ordering {
    match key {
        PourSortKey::Date => a.date.cmp(&b.date),
        PourSortKey::Nf => compare_text(&a.invoice_number, &b.invoice_number),
        PourSortKey::Volume => a.volume_delivered.cmp(&b.volume_delivered),
        PourSortKey::Location => compare_text(
            snap.location_name(a.location_id).unwrap_or(""),
            snap.location_name(b.location_id).unwrap_or(""),
        ),
        PourSortKey::Supplier => compare_text(
            snap.supplier_name(a.supplier_id).unwrap_or(""),
            snap.supplier_name(b.supplier_id).unwrap_or(""),
        ),
    }
}

fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}
