//! In-process snapshot of every business collection.
//!
//! The snapshot is loaded in full once at startup and then kept current
//! optimistically: each mutating service applies its change here only after
//! the database write succeeds (prepend for pour creates, append for
//! registry creates, in-place replace for updates, filter-out for deletes).
//! It is never re-fetched wholesale while the process runs.
//!
//! Consistency contract: the snapshot reflects the last operation this
//! process issued. It is not guaranteed consistent with concurrent external
//! writers until the next restart.

use crate::entities::{concrete_type, device, input, location, pour, supplier};
use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder};
use tokio::sync::RwLock;
use tracing::warn;
use uuid::Uuid;

#[derive(Debug, Default, Clone)]
pub struct RegistrySnapshot {
    /// Most-recent-first: loaded by descending date, creates are prepended.
    pub pours: Vec<pour::Model>,
    pub suppliers: Vec<supplier::Model>,
    pub locations: Vec<location::Model>,
    pub concrete_types: Vec<concrete_type::Model>,
    pub devices: Vec<device::Model>,
    pub inputs: Vec<input::Model>,
}

impl RegistrySnapshot {
    pub fn location_name(&self, id: Uuid) -> Option<&str> {
        self.locations
            .iter()
            .find(|l| l.id == id)
            .map(|l| l.name.as_str())
    }

    pub fn supplier_name(&self, id: Uuid) -> Option<&str> {
        self.suppliers
            .iter()
            .find(|s| s.id == id)
            .map(|s| s.name.as_str())
    }
}

#[derive(Debug, Default)]
pub struct RegistryStore {
    inner: RwLock<RegistrySnapshot>,
}

/// A collection load degrades to empty instead of failing the whole boot;
/// writes against it will still surface their own errors.
async fn load_collection<E>(db: &DatabaseConnection, name: &str) -> Vec<E::Model>
where
    E: EntityTrait,
{
    match E::find().all(db).await {
        Ok(rows) => rows,
        Err(err) => {
            warn!("Failed to load collection '{}': {}", name, err);
            Vec::new()
        }
    }
}

impl RegistryStore {
    /// Bulk-load every collection. Pours come back newest-first so the
    /// dashboard's "first N in store order" reads most-recent-first.
    pub async fn load(db: &DatabaseConnection) -> Self {
        let pours = match pour::Entity::find()
            .order_by_desc(pour::Column::Date)
            .all(db)
            .await
        {
            Ok(rows) => rows,
            Err(err) => {
                warn!("Failed to load collection 'concretagens': {}", err);
                Vec::new()
            }
        };

        let snapshot = RegistrySnapshot {
            pours,
            suppliers: load_collection::<supplier::Entity>(db, "fornecedores").await,
            locations: load_collection::<location::Entity>(db, "locais").await,
            concrete_types: load_collection::<concrete_type::Entity>(db, "tipos_concreto").await,
            devices: load_collection::<device::Entity>(db, "dispositivos").await,
            inputs: load_collection::<input::Entity>(db, "insumos").await,
        };

        Self {
            inner: RwLock::new(snapshot),
        }
    }

    /// Run a read-only closure against the current snapshot.
    pub async fn read<T>(&self, f: impl FnOnce(&RegistrySnapshot) -> T) -> T {
        let guard = self.inner.read().await;
        f(&guard)
    }

    pub async fn insert_pour(&self, model: pour::Model) {
        self.inner.write().await.pours.insert(0, model);
    }

    pub async fn update_pour(&self, model: pour::Model) {
        let mut guard = self.inner.write().await;
        if let Some(slot) = guard.pours.iter_mut().find(|p| p.id == model.id) {
            *slot = model;
        }
    }

    pub async fn remove_pour(&self, id: Uuid) {
        self.inner.write().await.pours.retain(|p| p.id != id);
    }
}

/// Generates the append/replace/remove trio for a reference collection.
macro_rules! registry_collection {
    ($insert:ident, $update:ident, $remove:ident, $field:ident, $module:ident) => {
        impl RegistryStore {
            pub async fn $insert(&self, model: $module::Model) {
                self.inner.write().await.$field.push(model);
            }

            pub async fn $update(&self, model: $module::Model) {
                let mut guard = self.inner.write().await;
                if let Some(slot) = guard.$field.iter_mut().find(|m| m.id == model.id) {
                    *slot = model;
                }
            }

            pub async fn $remove(&self, id: Uuid) {
                self.inner.write().await.$field.retain(|m| m.id != id);
            }
        }
    };
}

registry_collection!(insert_supplier, update_supplier, remove_supplier, suppliers, supplier);
registry_collection!(insert_location, update_location, remove_location, locations, location);
registry_collection!(
    insert_concrete_type,
    update_concrete_type,
    remove_concrete_type,
    concrete_types,
    concrete_type
);
registry_collection!(insert_device, update_device, remove_device, devices, device);
registry_collection!(insert_input, update_input, remove_input, inputs, input);
