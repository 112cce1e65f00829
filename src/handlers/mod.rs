pub mod analysis;
pub mod common;
pub mod concrete_types;
pub mod dashboard;
pub mod devices;
pub mod inputs;
pub mod locations;
pub mod pours;
pub mod reports;
pub mod suppliers;

use crate::{config::AppConfig, db::DbPool, reports::ReportService, store::RegistryStore};
use std::sync::Arc;

// Re-export AppState so handler modules can import it as crate::handlers::AppState
pub use crate::AppState;

/// Services layer that encapsulates business logic used by HTTP handlers.
#[derive(Clone)]
pub struct AppServices {
    pub locations: Arc<crate::services::locations::LocationService>,
    pub suppliers: Arc<crate::services::suppliers::SupplierService>,
    pub concrete_types: Arc<crate::services::concrete_types::ConcreteTypeService>,
    pub devices: Arc<crate::services::devices::DeviceService>,
    pub inputs: Arc<crate::services::inputs::InputService>,
    pub pours: Arc<crate::services::pours::PourService>,
    pub dashboard: Arc<crate::services::dashboard::DashboardService>,
    pub reports: Arc<ReportService>,
    pub analysis: Arc<crate::services::analysis::AnalysisService>,
}

impl AppServices {
    pub fn new(db: Arc<DbPool>, store: Arc<RegistryStore>, config: &AppConfig) -> Self {
        Self {
            locations: Arc::new(crate::services::locations::LocationService::new(
                db.clone(),
                store.clone(),
            )),
            suppliers: Arc::new(crate::services::suppliers::SupplierService::new(
                db.clone(),
                store.clone(),
            )),
            concrete_types: Arc::new(crate::services::concrete_types::ConcreteTypeService::new(
                db.clone(),
                store.clone(),
            )),
            devices: Arc::new(crate::services::devices::DeviceService::new(
                db.clone(),
                store.clone(),
            )),
            inputs: Arc::new(crate::services::inputs::InputService::new(
                db.clone(),
                store.clone(),
            )),
            pours: Arc::new(crate::services::pours::PourService::new(
                db.clone(),
                store.clone(),
            )),
            dashboard: Arc::new(crate::services::dashboard::DashboardService::new(
                store.clone(),
            )),
            reports: Arc::new(ReportService::new(store.clone())),
            analysis: Arc::new(crate::services::analysis::AnalysisService::new(
                store,
                config.ai_api_key.clone(),
                config.ai_endpoint.clone(),
                config.ai_model.clone(),
            )),
        }
    }
}
