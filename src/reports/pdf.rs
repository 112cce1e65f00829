use super::ReportSummary;
use crate::errors::ServiceError;
use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfLayerReference};

/// One body row of the six-column report table.
pub struct TableLine {
    pub date: String,
    pub invoice: String,
    pub location: String,
    pub supplier: String,
    pub ua: String,
    /// Already rendered to one decimal place.
    pub volume: String,
}

// A4 portrait. printpdf's origin is the bottom-left corner, so vertical
// positions count down from PAGE_HEIGHT.
const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN_LEFT: f32 = 14.0;
const MARGIN_BOTTOM: f32 = 15.0;
const ROW_STEP: f32 = 5.0;

const TITLE_SIZE: f32 = 16.0;
const META_SIZE: f32 = 10.0;
const TABLE_SIZE: f32 = 8.0;

/// Column x offsets: Data, NF, Local, Fornecedor, Disp., Vol (m³).
const COLUMNS: [(f32, &str); 6] = [
    (14.0, "Data"),
    (38.0, "NF"),
    (62.0, "Local"),
    (112.0, "Fornecedor"),
    (152.0, "Disp."),
    (178.0, "Vol (m³)"),
];

/// Widest cell content per column, in characters. Longer values are cut so
/// adjacent columns never overprint.
const COLUMN_CHAR_LIMITS: [usize; 6] = [10, 12, 26, 20, 12, 8];

pub fn build(summary: &ReportSummary, lines: &[TableLine]) -> Result<Vec<u8>, ServiceError> {
    render(summary, lines).map_err(|e| ServiceError::InternalError(format!("pdf error: {}", e)))
}

fn render(summary: &ReportSummary, lines: &[TableLine]) -> Result<Vec<u8>, printpdf::Error> {
    let (doc, first_page, first_layer) = PdfDocument::new(
        "Relatório de Concretagens",
        Mm(PAGE_WIDTH),
        Mm(PAGE_HEIGHT),
        "Layer 1",
    );
    let regular = doc.add_builtin_font(BuiltinFont::Helvetica)?;
    let bold = doc.add_builtin_font(BuiltinFont::HelveticaBold)?;

    let mut layer = doc.get_page(first_page).get_layer(first_layer);
    let mut y = PAGE_HEIGHT - 15.0;

    layer.use_text(
        "Relatório de Concretagens",
        TITLE_SIZE,
        Mm(MARGIN_LEFT),
        Mm(y),
        &bold,
    );
    y -= 7.0;
    layer.use_text(
        format!(
            "Período: {} a {}",
            super::format_date_br(summary.period.start),
            super::format_date_br(summary.period.end)
        ),
        META_SIZE,
        Mm(MARGIN_LEFT),
        Mm(y),
        &regular,
    );
    y -= 5.0;
    layer.use_text(
        format!(
            "Total Volume: {:.1} m³ | Registros: {}",
            summary.total_volume.round_dp(1),
            summary.count
        ),
        META_SIZE,
        Mm(MARGIN_LEFT),
        Mm(y),
        &regular,
    );

    // Table starts below the header block and flows over as many pages as
    // it needs, repeating the column captions on each.
    y -= 8.0;
    write_table_header(&layer, &bold, y);
    y -= ROW_STEP;

    for line in lines {
        if y < MARGIN_BOTTOM {
            let (page, new_layer) = doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
            layer = doc.get_page(page).get_layer(new_layer);
            y = PAGE_HEIGHT - 15.0;
            write_table_header(&layer, &bold, y);
            y -= ROW_STEP;
        }

        let cells = [
            line.date.as_str(),
            line.invoice.as_str(),
            line.location.as_str(),
            line.supplier.as_str(),
            line.ua.as_str(),
            line.volume.as_str(),
        ];
        for ((&(x, _), limit), cell) in COLUMNS.iter().zip(COLUMN_CHAR_LIMITS).zip(cells) {
            layer.use_text(clip(cell, limit), TABLE_SIZE, Mm(x), Mm(y), &regular);
        }
        y -= ROW_STEP;
    }

    doc.save_to_bytes()
}

fn write_table_header(layer: &PdfLayerReference, font: &IndirectFontRef, y: f32) {
    for &(x, caption) in COLUMNS.iter() {
        layer.use_text(caption, TABLE_SIZE, Mm(x), Mm(y), font);
    }
}

fn clip(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        text.to_string()
    } else {
        let mut cut: String = text.chars().take(limit.saturating_sub(2)).collect();
        cut.push_str("..");
        cut
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::period::Period;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn sample_line(day: u32) -> TableLine {
        TableLine {
            date: format!("{:02}/03/2024", day),
            invoice: format!("NF-{day}"),
            location: "Bloco A - Laje 1".to_string(),
            supplier: "Agil Concreto".to_string(),
            ua: "UA-07".to_string(),
            volume: "8.5".to_string(),
        }
    }

    fn sample_summary(count: usize) -> ReportSummary {
        ReportSummary {
            period: Period::new(
                NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
                NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
            ),
            total_volume: dec!(15.5),
            count,
        }
    }

    #[test]
    fn document_bytes_start_with_pdf_magic() {
        let lines: Vec<_> = (1..=3).map(sample_line).collect();
        let bytes = build(&sample_summary(lines.len()), &lines).unwrap();
        assert_eq!(&bytes[..5], b"%PDF-");
    }

    #[test]
    fn long_tables_spill_onto_additional_pages() {
        // Far more rows than fit a single A4 page.
        let lines: Vec<_> = (0..120).map(|i| sample_line((i % 28) + 1)).collect();
        let bytes = build(&sample_summary(lines.len()), &lines).unwrap();
        let text = String::from_utf8_lossy(&bytes);
        // One match comes from the document's /Pages tree node; anything
        // beyond two means the table really paginated.
        assert!(text.matches("/Type /Page").count() > 2);
    }

    #[test]
    fn clip_keeps_short_values_intact() {
        assert_eq!(clip("UA-07", 12), "UA-07");
        assert_eq!(clip("Bloco A - Laje 1 - Torre Norte", 10), "Bloco A ..");
    }
}
