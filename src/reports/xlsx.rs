use super::ReportRow;
use crate::errors::ServiceError;
use rust_decimal::prelude::ToPrimitive;
use rust_xlsxwriter::{Format, Workbook, XlsxError};

const SHEET_NAME: &str = "Concretagens";

const HEADERS: [&str; 10] = [
    "Data",
    "NF",
    "Local",
    "CentroCusto",
    "Fornecedor",
    "Traco",
    "Dispositivo",
    "Volume_m3",
    "Caminhao",
    "Observacoes",
];

/// Builds the workbook in memory: a single sheet, a bold header row, one
/// row per enriched record.
pub fn build(rows: &[ReportRow]) -> Result<Vec<u8>, ServiceError> {
    build_workbook(rows).map_err(|e| ServiceError::InternalError(format!("xlsx error: {}", e)))
}

fn build_workbook(rows: &[ReportRow]) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    let header_format = Format::new().set_bold();
    for (col, header) in HEADERS.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *header, &header_format)?;
    }

    for (i, row) in rows.iter().enumerate() {
        let r = (i + 1) as u32;
        sheet.write_string(r, 0, &row.date)?;
        sheet.write_string(r, 1, &row.invoice)?;
        sheet.write_string(r, 2, &row.location)?;
        sheet.write_string(r, 3, &row.cost_center)?;
        sheet.write_string(r, 4, &row.supplier)?;
        sheet.write_string(r, 5, &row.mix)?;
        sheet.write_string(r, 6, &row.device)?;
        sheet.write_number(r, 7, row.volume_m3.to_f64().unwrap_or_default())?;
        sheet.write_string(r, 8, &row.truck)?;
        sheet.write_string(r, 9, &row.notes)?;
    }

    workbook.save_to_buffer()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample_row() -> ReportRow {
        ReportRow {
            date: "15/03/2024".to_string(),
            invoice: "NF-4412".to_string(),
            location: "Bloco A - Laje 1".to_string(),
            cost_center: "CC-101".to_string(),
            supplier: "Agil Concreto".to_string(),
            mix: "FCK 30 Bombeável".to_string(),
            device: "Tablet (UA-07)".to_string(),
            volume_m3: dec!(8.5),
            truck: "ABC-1234".to_string(),
            notes: String::new(),
        }
    }

    #[test]
    fn workbook_bytes_start_with_zip_magic() {
        let bytes = build(&[sample_row()]).unwrap();
        assert_eq!(&bytes[..2], b"PK");
    }
}
