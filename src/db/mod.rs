//! Database initialization and migration runner.
//!
//! SYSTEM CONTEXT
//! ==============
//! Startup calls `init_pool` only when `DATABASE_URL` is set; the pool then
//! backs `store::PgStore`. Migrations run before the listener binds.

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use crate::config::env_parse;

const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;

/// Initialize the `PostgreSQL` connection pool and run migrations.
///
/// # Errors
///
/// Returns an error if the connection or migrations fail.
pub async fn init_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(env_parse("DB_MAX_CONNECTIONS", DEFAULT_DB_MAX_CONNECTIONS))
        .connect(database_url)
        .await?;

    sqlx::migrate!("src/db/migrations").run(&pool).await?;

    Ok(pool)
}
