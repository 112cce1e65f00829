mod common;

use common::{load_store, test_db};
use pourtrack_api::{
    entities::{
        concrete_type::RecipeIngredient,
        input::{self, Unit},
        location,
    },
    errors::ServiceError,
    services::{
        concrete_types::{ConcreteTypeService, CreateConcreteType},
        devices::{CreateDevice, DeviceService},
        inputs::{CreateInput, InputService, UpdateInput},
        locations::{CreateLocation, LocationService},
        suppliers::{CreateSupplier, SupplierService, UpdateSupplier},
    },
    store::RegistryStore,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sea_orm::{ActiveModelTrait, EntityTrait, Set};
use uuid::Uuid;

#[tokio::test]
async fn created_location_round_trips_through_store_and_database() {
    let db = test_db().await;
    let store = load_store(&db).await;
    let service = LocationService::new(db.clone(), store.clone());

    let id = service
        .create(CreateLocation {
            name: "Bloco A - Laje 1".to_string(),
            cost_center: "CC-101".to_string(),
        })
        .await
        .expect("create location");

    let listed = service.list().await;
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, id);
    assert_eq!(listed[0].name, "Bloco A - Laje 1");
    assert_eq!(listed[0].cost_center, "CC-101");

    // The write went through to the backing table, not only the snapshot.
    let persisted = location::Entity::find_by_id(id)
        .one(&*db)
        .await
        .unwrap()
        .expect("row persisted");
    assert_eq!(persisted.name, "Bloco A - Laje 1");
}

#[tokio::test]
async fn empty_location_name_is_rejected() {
    let db = test_db().await;
    let store = load_store(&db).await;
    let service = LocationService::new(db, store);

    let err = service
        .create(CreateLocation {
            name: "   ".to_string(),
            cost_center: String::new(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::ValidationError(_)));
}

#[tokio::test]
async fn supplier_update_merges_and_preserves_unset_fields() {
    let db = test_db().await;
    let store = load_store(&db).await;
    let service = SupplierService::new(db.clone(), store.clone());

    let id = service
        .create(CreateSupplier {
            name: "Agil Concreto".to_string(),
            contact: "(11) 98888-7777".to_string(),
            rating: 5,
        })
        .await
        .unwrap();

    service
        .update(
            id,
            UpdateSupplier {
                rating: Some(3),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let listed = service.list().await;
    assert_eq!(listed[0].rating, 3);
    assert_eq!(listed[0].name, "Agil Concreto");
    assert_eq!(listed[0].contact, "(11) 98888-7777");

    // A store rebuilt from the database sees the same merged record.
    let reloaded = RegistryStore::load(&db).await;
    let from_db = reloaded
        .read(|s| s.suppliers.first().cloned())
        .await
        .expect("supplier persisted");
    assert_eq!(from_db.rating, 3);
    assert_eq!(from_db.contact, "(11) 98888-7777");
}

#[tokio::test]
async fn deleting_a_record_leaves_the_others_in_order() {
    let db = test_db().await;
    let store = load_store(&db).await;
    let service = LocationService::new(db, store);

    let mut ids = Vec::new();
    for name in ["Bloco A", "Bloco B", "Bloco C"] {
        ids.push(
            service
                .create(CreateLocation {
                    name: name.to_string(),
                    cost_center: String::new(),
                })
                .await
                .unwrap(),
        );
    }

    service.delete(ids[1]).await.unwrap();

    let listed = service.list().await;
    let names: Vec<_> = listed.iter().map(|l| l.name.as_str()).collect();
    assert_eq!(names, vec!["Bloco A", "Bloco C"]);

    let missing = service.delete(ids[1]).await.unwrap_err();
    assert!(matches!(missing, ServiceError::NotFound(_)));
}

#[tokio::test]
async fn input_codes_continue_from_the_highest_existing_code() {
    let db = test_db().await;

    // Seed codes {1, 2, 5} directly; deletions in a previous session could
    // have left exactly this shape.
    for code in [1, 2, 5] {
        input::ActiveModel {
            id: Set(Uuid::new_v4()),
            code: Set(code),
            name: Set(format!("Material {code}")),
            unit: Set(Unit::Kilogram),
            price: Set(dec!(10.00)),
        }
        .insert(&*db)
        .await
        .unwrap();
    }

    let store = load_store(&db).await;
    let service = InputService::new(db, store);
    let id = service
        .create(CreateInput {
            name: "Cimento CP-II".to_string(),
            unit: Unit::Bag,
            price: dec!(42.90),
        })
        .await
        .unwrap();

    let created = service
        .list()
        .await
        .into_iter()
        .find(|i| i.id == id)
        .unwrap();
    assert_eq!(created.code, 6);
}

#[tokio::test]
async fn first_input_gets_code_one_and_code_survives_updates() {
    let db = test_db().await;
    let store = load_store(&db).await;
    let service = InputService::new(db, store);

    let id = service
        .create(CreateInput {
            name: "Brita 1".to_string(),
            unit: Unit::CubicMeter,
            price: dec!(95.00),
        })
        .await
        .unwrap();

    let updated = service
        .update(
            id,
            UpdateInput {
                price: Some(dec!(99.00)),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.code, 1);
    assert_eq!(updated.price, dec!(99.00));
    assert_eq!(updated.name, "Brita 1");
}

#[tokio::test]
async fn input_price_must_be_positive() {
    let db = test_db().await;
    let store = load_store(&db).await;
    let service = InputService::new(db, store);

    let err = service
        .create(CreateInput {
            name: "Areia".to_string(),
            unit: Unit::CubicMeter,
            price: Decimal::ZERO,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::ValidationError(_)));
}

#[tokio::test]
async fn inputs_list_ascending_by_code() {
    let db = test_db().await;
    for code in [7, 2, 4] {
        input::ActiveModel {
            id: Set(Uuid::new_v4()),
            code: Set(code),
            name: Set(format!("Material {code}")),
            unit: Set(Unit::Kilogram),
            price: Set(dec!(1.00)),
        }
        .insert(&*db)
        .await
        .unwrap();
    }

    let store = load_store(&db).await;
    let service = InputService::new(db, store);
    let codes: Vec<_> = service.list().await.iter().map(|i| i.code).collect();
    assert_eq!(codes, vec![2, 4, 7]);
}

#[tokio::test]
async fn device_requires_an_existing_location() {
    let db = test_db().await;
    let store = load_store(&db).await;
    let service = DeviceService::new(db, store);

    let err = service
        .create(CreateDevice {
            device_type: "Tablet".to_string(),
            ua: "UA-01".to_string(),
            location_id: Uuid::new_v4(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::ValidationError(_)));
}

#[tokio::test]
async fn devices_list_by_location_name_then_type() {
    let db = test_db().await;
    let store = load_store(&db).await;
    let locations = LocationService::new(db.clone(), store.clone());
    let devices = DeviceService::new(db, store);

    let zone_b = locations
        .create(CreateLocation {
            name: "Bloco B".to_string(),
            cost_center: String::new(),
        })
        .await
        .unwrap();
    let zone_a = locations
        .create(CreateLocation {
            name: "Bloco A".to_string(),
            cost_center: String::new(),
        })
        .await
        .unwrap();

    for (device_type, ua, loc) in [
        ("Tablet", "UA-03", zone_b),
        ("Sensor", "UA-02", zone_a),
        ("Tablet", "UA-01", zone_a),
    ] {
        devices
            .create(CreateDevice {
                device_type: device_type.to_string(),
                ua: ua.to_string(),
                location_id: loc,
            })
            .await
            .unwrap();
    }

    let listed = devices.list().await;
    let uas: Vec<_> = listed.iter().map(|d| d.ua.as_str()).collect();
    // Bloco A before Bloco B; Sensor before Tablet within Bloco A.
    assert_eq!(uas, vec!["UA-02", "UA-01", "UA-03"]);
}

#[tokio::test]
async fn recipe_keeps_submission_order_and_drops_zero_quantities() {
    let db = test_db().await;
    let store = load_store(&db).await;
    let service = ConcreteTypeService::new(db.clone(), store.clone());

    let cement = Uuid::new_v4();
    let sand = Uuid::new_v4();
    let ghost = Uuid::new_v4();

    let id = service
        .create(CreateConcreteType {
            name: "FCK 30".to_string(),
            description: "Concreto Bombeável".to_string(),
            characteristic_strength: dec!(30),
            ingredients: vec![
                RecipeIngredient {
                    input_id: cement,
                    quantity: dec!(320.0),
                },
                RecipeIngredient {
                    input_id: ghost,
                    quantity: Decimal::ZERO,
                },
                RecipeIngredient {
                    input_id: sand,
                    quantity: dec!(0.850),
                },
            ],
        })
        .await
        .unwrap();

    let listed = service.list().await;
    let mix = listed.iter().find(|t| t.id == id).unwrap();
    let input_ids: Vec<_> = mix.ingredients.0.iter().map(|i| i.input_id).collect();
    assert_eq!(input_ids, vec![cement, sand]);

    // The JSON column survives a round trip through the database.
    let reloaded = RegistryStore::load(&db).await;
    let from_db = reloaded
        .read(|s| s.concrete_types.first().cloned())
        .await
        .unwrap();
    assert_eq!(from_db.ingredients.0.len(), 2);
    assert_eq!(from_db.ingredients.0[0].quantity, dec!(320.0));
}

#[tokio::test]
async fn dangling_references_resolve_to_placeholder_lookups() {
    let db = test_db().await;
    let store = load_store(&db).await;
    let suppliers = SupplierService::new(db.clone(), store.clone());

    let id = suppliers
        .create(CreateSupplier {
            name: "Concreteira Norte".to_string(),
            contact: String::new(),
            rating: 4,
        })
        .await
        .unwrap();
    suppliers.delete(id).await.unwrap();

    // Lookup by the stale id yields no name; read surfaces fall back to
    // their placeholder labels instead of failing.
    let resolved = store.read(|s| s.supplier_name(id).map(str::to_string)).await;
    assert_eq!(resolved, None);
}
