mod common;

use chrono::NaiveDate;
use common::{load_store, test_db};
use pourtrack_api::{
    entities::pour,
    reports::ReportService,
    services::{
        concrete_types::{ConcreteTypeService, CreateConcreteType},
        devices::{CreateDevice, DeviceService},
        locations::{CreateLocation, LocationService},
        period::Period,
        pours::{CreatePour, PourService},
        suppliers::{CreateSupplier, SupplierService},
    },
};
use rust_decimal_macros::dec;
use std::io::Write;
use uuid::Uuid;

fn march(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, day).unwrap()
}

struct Fixture {
    reports: ReportService,
    pours: PourService,
    location: Uuid,
    device: Uuid,
    supplier: Uuid,
    mix: Uuid,
}

async fn fixture() -> Fixture {
    let db = test_db().await;
    let store = load_store(&db).await;

    let location = LocationService::new(db.clone(), store.clone())
        .create(CreateLocation {
            name: "Bloco A - Laje 1".to_string(),
            cost_center: "CC-101".to_string(),
        })
        .await
        .unwrap();
    let supplier = SupplierService::new(db.clone(), store.clone())
        .create(CreateSupplier {
            name: "Agil Concreto".to_string(),
            contact: String::new(),
            rating: 5,
        })
        .await
        .unwrap();
    let mix = ConcreteTypeService::new(db.clone(), store.clone())
        .create(CreateConcreteType {
            name: "FCK 30".to_string(),
            description: "Bombeável".to_string(),
            characteristic_strength: dec!(30),
            ingredients: vec![],
        })
        .await
        .unwrap();
    let device = DeviceService::new(db.clone(), store.clone())
        .create(CreateDevice {
            device_type: "Tablet".to_string(),
            ua: "UA-07".to_string(),
            location_id: location,
        })
        .await
        .unwrap();

    Fixture {
        reports: ReportService::new(store.clone()),
        pours: PourService::new(db, store),
        location,
        device,
        supplier,
        mix,
    }
}

fn pour_on(fx: &Fixture, date: NaiveDate) -> CreatePour {
    CreatePour {
        date: Some(date),
        invoice_number: "NF-4412".to_string(),
        location_id: fx.location,
        device_id: Some(fx.device),
        supplier_id: fx.supplier,
        concrete_type_id: fx.mix,
        volume_delivered: dec!(8.5),
        truck_id: Some("ABC-1234".to_string()),
        notes: None,
        weather: Some(pour::Weather::Sunny),
    }
}

#[tokio::test]
async fn exports_are_a_no_op_for_an_empty_period() {
    let fx = fixture().await;
    fx.pours.create(pour_on(&fx, march(10))).await.unwrap();

    let empty = Period::new(march(20), march(25));
    assert!(fx.reports.export_xlsx(empty).await.unwrap().is_none());
    assert!(fx.reports.export_pdf(empty).await.unwrap().is_none());
}

#[tokio::test]
async fn period_bounds_are_inclusive() {
    let fx = fixture().await;
    fx.pours.create(pour_on(&fx, march(1))).await.unwrap();
    fx.pours.create(pour_on(&fx, march(31))).await.unwrap();
    fx.pours
        .create(pour_on(&fx, NaiveDate::from_ymd_opt(2024, 4, 1).unwrap()))
        .await
        .unwrap();

    let preview = fx.reports.preview(Period::new(march(1), march(31))).await;
    assert_eq!(preview.summary.count, 2);
    assert_eq!(preview.summary.total_volume, dec!(17.0));
}

#[tokio::test]
async fn spreadsheet_download_carries_the_range_in_its_name() {
    let fx = fixture().await;
    fx.pours.create(pour_on(&fx, march(15))).await.unwrap();

    let file = fx
        .reports
        .export_xlsx(Period::new(march(1), march(31)))
        .await
        .unwrap()
        .expect("file produced");

    assert_eq!(
        file.file_name,
        "Relatorio_Concretagem_2024-03-01_a_2024-03-31.xlsx"
    );
    assert_eq!(&file.bytes[..2], b"PK");

    // The bytes are a writable download.
    let mut tmp = tempfile::NamedTempFile::new().unwrap();
    tmp.write_all(&file.bytes).unwrap();
    assert!(tmp.path().metadata().unwrap().len() > 0);
}

#[tokio::test]
async fn pdf_download_renders_header_and_table() {
    let fx = fixture().await;
    for day in 1..=3 {
        fx.pours.create(pour_on(&fx, march(day))).await.unwrap();
    }

    let file = fx
        .reports
        .export_pdf(Period::new(march(1), march(31)))
        .await
        .unwrap()
        .expect("file produced");

    assert_eq!(
        file.file_name,
        "Relatorio_Concretagem_2024-03-01_a_2024-03-31.pdf"
    );
    assert_eq!(&file.bytes[..5], b"%PDF-");
}

#[tokio::test]
async fn preview_shows_five_rows_and_counts_the_rest() {
    let fx = fixture().await;
    for day in 1..=7 {
        fx.pours.create(pour_on(&fx, march(day))).await.unwrap();
    }

    let preview = fx.reports.preview(Period::new(march(1), march(31))).await;
    assert_eq!(preview.rows.len(), 5);
    assert_eq!(preview.remaining, 2);
    assert_eq!(preview.summary.count, 7);
    assert_eq!(preview.rows[0].location, "Bloco A - Laje 1");
    // Report dates render day-first.
    assert!(preview.rows[0].date.ends_with("/03/2024"));
}

#[tokio::test]
async fn dangling_references_fall_back_to_placeholders() {
    let db = test_db().await;
    let store = load_store(&db).await;
    let pours = PourService::new(db, store.clone());
    let reports = ReportService::new(store);

    // No registries at all: every reference in this pour dangles.
    pours
        .create(CreatePour {
            date: Some(march(12)),
            invoice_number: "NF-1".to_string(),
            location_id: Uuid::new_v4(),
            device_id: None,
            supplier_id: Uuid::new_v4(),
            concrete_type_id: Uuid::new_v4(),
            volume_delivered: dec!(6.0),
            truck_id: None,
            notes: None,
            weather: None,
        })
        .await
        .unwrap();

    let period = Period::new(march(1), march(31));
    let preview = reports.preview(period).await;
    assert_eq!(preview.rows[0].location, "-");

    // Both sinks still materialize, with placeholder labels inside.
    assert!(reports.export_xlsx(period).await.unwrap().is_some());
    assert!(reports.export_pdf(period).await.unwrap().is_some());
}
