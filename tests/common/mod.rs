use subs_backend::config::DatabaseConfig;
use subs_backend::database::{DbPool, SubscriptionStore, create_pool, run_migrations};
use subs_backend::services::SubscriptionService;

/// In-memory SQLite with the real migrations applied.
///
/// A single pooled connection keeps every query on the same memory database.
pub async fn setup_pool() -> DbPool {
    let config = DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        max_connections: 1,
        min_connections: 1,
        connect_timeout_secs: 5,
    };
    let pool = create_pool(&config)
        .await
        .expect("failed to open in-memory database");
    run_migrations(&pool)
        .await
        .expect("failed to run migrations");
    pool
}

pub async fn setup_store() -> SubscriptionStore {
    SubscriptionStore::new(setup_pool().await)
}

#[allow(dead_code)]
pub async fn setup_service() -> SubscriptionService {
    SubscriptionService::new(setup_store().await)
}
