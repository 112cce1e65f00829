use crate::{entities::pour, services::period::Period, store::RegistryStore};
use rust_decimal::Decimal;
use serde::Serialize;
use std::sync::Arc;

/// How many filtered records the dashboard lists under the stat cards.
const RECENT_LIMIT: usize = 20;

#[derive(Debug, Serialize)]
pub struct DashboardStats {
    pub period: Period,
    /// Sum of delivered volume over the filtered set, in m³.
    pub total_volume: Decimal,
    pub total_pours: usize,
    /// First records of the filtered set in store order (most recent first).
    pub recent: Vec<RecentPour>,
}

#[derive(Debug, Serialize)]
pub struct RecentPour {
    pub id: uuid::Uuid,
    pub date: chrono::NaiveDate,
    pub invoice_number: String,
    pub location: String,
    pub volume_delivered: Decimal,
}

/// Read-side aggregate view over the pour snapshot.
#[derive(Clone)]
pub struct DashboardService {
    store: Arc<RegistryStore>,
}

impl DashboardService {
    pub fn new(store: Arc<RegistryStore>) -> Self {
        Self { store }
    }

    pub async fn stats(&self, period: Period) -> DashboardStats {
        self.store
            .read(|snap| {
                let filtered: Vec<&pour::Model> = snap
                    .pours
                    .iter()
                    .filter(|p| period.contains(p.date))
                    .collect();

                let total_volume = filtered
                    .iter()
                    .fold(Decimal::ZERO, |acc, p| acc + p.volume_delivered);

                let recent = filtered
                    .iter()
                    .take(RECENT_LIMIT)
                    .map(|p| RecentPour {
                        id: p.id,
                        date: p.date,
                        invoice_number: p.invoice_number.clone(),
                        location: snap
                            .location_name(p.location_id)
                            .unwrap_or("Local indefinido")
                            .to_string(),
                        volume_delivered: p.volume_delivered,
                    })
                    .collect();

                DashboardStats {
                    period,
                    total_volume,
                    total_pours: filtered.len(),
                    recent,
                }
            })
            .await
    }
}
