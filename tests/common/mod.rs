use pourtrack_api::{
    db::{establish_connection_with_config, run_migrations, DbConfig, DbPool},
    store::RegistryStore,
};
use std::sync::Arc;

/// Fresh in-memory database with the full schema applied. A single pooled
/// connection keeps the database alive for the whole test.
pub async fn test_db() -> Arc<DbPool> {
    let config = DbConfig {
        url: "sqlite::memory:".to_string(),
        max_connections: 1,
        min_connections: 1,
        ..Default::default()
    };
    let pool = establish_connection_with_config(&config)
        .await
        .expect("failed to open in-memory sqlite");
    run_migrations(&pool).await.expect("failed to migrate");
    Arc::new(pool)
}

#[allow(dead_code)]
pub async fn load_store(db: &DbPool) -> Arc<RegistryStore> {
    Arc::new(RegistryStore::load(db).await)
}
