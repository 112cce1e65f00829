//! Date-range filtered report pipeline: enrich pour records with registry
//! display names, then materialize them as a spreadsheet or a PDF table.

pub mod pdf;
pub mod xlsx;

use crate::{
    entities::pour,
    errors::ServiceError,
    services::period::Period,
    store::{RegistrySnapshot, RegistryStore},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, instrument};

/// Rows shown in the on-screen preview before exporting.
const PREVIEW_LIMIT: usize = 5;

/// One exported record with every foreign key resolved to a display label.
#[derive(Debug, Clone, Serialize)]
pub struct ReportRow {
    /// `DD/MM/YYYY`
    pub date: String,
    pub invoice: String,
    pub location: String,
    pub cost_center: String,
    pub supplier: String,
    pub mix: String,
    /// `"{type} ({ua})"`, or `-` when no device was tagged.
    pub device: String,
    pub volume_m3: Decimal,
    pub truck: String,
    pub notes: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportSummary {
    pub period: Period,
    pub total_volume: Decimal,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct Preview {
    pub summary: ReportSummary,
    pub rows: Vec<PreviewRow>,
    /// Matching records beyond the previewed ones.
    pub remaining: usize,
}

#[derive(Debug, Serialize)]
pub struct PreviewRow {
    pub date: String,
    pub location: String,
    pub volume_delivered: Decimal,
}

/// A generated download.
pub struct ExportFile {
    pub file_name: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

/// Read-side exporter over the pour snapshot.
#[derive(Clone)]
pub struct ReportService {
    store: Arc<RegistryStore>,
}

impl ReportService {
    pub fn new(store: Arc<RegistryStore>) -> Self {
        Self { store }
    }

    pub async fn preview(&self, period: Period) -> Preview {
        self.store
            .read(|snap| {
                let filtered = filter_period(snap, period);
                let summary = summarize(period, &filtered);
                let rows = filtered
                    .iter()
                    .take(PREVIEW_LIMIT)
                    .map(|p| PreviewRow {
                        date: format_date_br(p.date),
                        location: snap
                            .location_name(p.location_id)
                            .unwrap_or("-")
                            .to_string(),
                        volume_delivered: p.volume_delivered,
                    })
                    .collect::<Vec<_>>();
                let remaining = filtered.len().saturating_sub(rows.len());

                Preview {
                    summary,
                    rows,
                    remaining,
                }
            })
            .await
    }

    /// Flat spreadsheet, one row per record. `None` when nothing matches
    /// the period: an empty report is never produced.
    #[instrument(skip(self))]
    pub async fn export_xlsx(&self, period: Period) -> Result<Option<ExportFile>, ServiceError> {
        let rows = self
            .store
            .read(|snap| {
                filter_period(snap, period)
                    .into_iter()
                    .map(|p| enrich(snap, p))
                    .collect::<Vec<_>>()
            })
            .await;
        if rows.is_empty() {
            return Ok(None);
        }

        let bytes = xlsx::build(&rows)?;
        info!("Spreadsheet report generated: {} records", rows.len());
        Ok(Some(ExportFile {
            file_name: export_file_name(period, "xlsx"),
            content_type: "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
            bytes,
        }))
    }

    /// Paginated PDF table below a title/summary header block. `None` when
    /// nothing matches the period.
    #[instrument(skip(self))]
    pub async fn export_pdf(&self, period: Period) -> Result<Option<ExportFile>, ServiceError> {
        let (summary, lines) = self
            .store
            .read(|snap| {
                let filtered = filter_period(snap, period);
                let summary = summarize(period, &filtered);
                let lines = filtered
                    .iter()
                    .map(|p| pdf::TableLine {
                        date: format_date_br(p.date),
                        invoice: p.invoice_number.clone(),
                        location: snap
                            .location_name(p.location_id)
                            .unwrap_or("N/A")
                            .to_string(),
                        supplier: snap
                            .supplier_name(p.supplier_id)
                            .unwrap_or("N/A")
                            .to_string(),
                        ua: p
                            .device_id
                            .and_then(|id| {
                                snap.devices.iter().find(|d| d.id == id).map(|d| d.ua.clone())
                            })
                            .unwrap_or_else(|| "-".to_string()),
                        volume: format!("{:.1}", p.volume_delivered.round_dp(1)),
                    })
                    .collect::<Vec<_>>();
                (summary, lines)
            })
            .await;
        if lines.is_empty() {
            return Ok(None);
        }

        let bytes = pdf::build(&summary, &lines)?;
        info!("PDF report generated: {} records", lines.len());
        Ok(Some(ExportFile {
            file_name: export_file_name(period, "pdf"),
            content_type: "application/pdf",
            bytes,
        }))
    }
}

fn filter_period<'a>(snap: &'a RegistrySnapshot, period: Period) -> Vec<&'a pour::Model> {
    snap.pours
        .iter()
        .filter(|p| period.contains(p.date))
        .collect()
}

fn summarize(period: Period, filtered: &[&pour::Model]) -> ReportSummary {
    ReportSummary {
        period,
        total_volume: filtered
            .iter()
            .fold(Decimal::ZERO, |acc, p| acc + p.volume_delivered),
        count: filtered.len(),
    }
}

fn enrich(snap: &RegistrySnapshot, p: &pour::Model) -> ReportRow {
    let location = snap.locations.iter().find(|l| l.id == p.location_id);
    let device = p
        .device_id
        .and_then(|id| snap.devices.iter().find(|d| d.id == id));

    ReportRow {
        date: format_date_br(p.date),
        invoice: p.invoice_number.clone(),
        location: location.map_or("N/A".to_string(), |l| l.name.clone()),
        cost_center: location.map_or("N/A".to_string(), |l| l.cost_center.clone()),
        supplier: snap
            .supplier_name(p.supplier_id)
            .unwrap_or("N/A")
            .to_string(),
        mix: snap
            .concrete_types
            .iter()
            .find(|t| t.id == p.concrete_type_id)
            .map_or("N/A".to_string(), |t| t.name.clone()),
        device: device.map_or("-".to_string(), |d| format!("{} ({})", d.device_type, d.ua)),
        volume_m3: p.volume_delivered,
        truck: p.truck_id.clone().unwrap_or_else(|| "-".to_string()),
        notes: p.notes.clone().unwrap_or_default(),
    }
}

/// `DD/MM/YYYY`, the display convention of every generated report.
pub fn format_date_br(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

pub fn export_file_name(period: Period, extension: &str) -> String {
    format!(
        "Relatorio_Concretagem_{}_a_{}.{}",
        period.start, period.end, extension
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn dates_render_day_first() {
        assert_eq!(format_date_br(d(2024, 3, 7)), "07/03/2024");
    }

    #[test]
    fn file_name_carries_the_active_range() {
        let period = Period::new(d(2024, 3, 1), d(2024, 3, 31));
        assert_eq!(
            export_file_name(period, "xlsx"),
            "Relatorio_Concretagem_2024-03-01_a_2024-03-31.xlsx"
        );
    }
}
