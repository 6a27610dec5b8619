use diesel::connection::SimpleConnection;
use diesel::r2d2::{self, ConnectionManager, CustomizeConnection, PoolError};
use diesel::sqlite::SqliteConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use thiserror::Error;

use crate::config::AppConfig;

pub type DbPool = r2d2::Pool<ConnectionManager<SqliteConnection>>;
pub type DbConnection = r2d2::PooledConnection<ConnectionManager<SqliteConnection>>;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

#[derive(Debug, Error)]
pub enum DbError {
    #[error("failed to create database pool: {0}")]
    Pool(#[from] PoolError),

    #[error("failed to run database migrations: {0}")]
    Migration(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Per-connection SQLite settings, applied every time r2d2 opens a connection.
#[derive(Debug, Clone, Copy)]
struct SqlitePragmas;

impl CustomizeConnection<SqliteConnection, r2d2::Error> for SqlitePragmas {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), r2d2::Error> {
        conn.batch_execute("PRAGMA foreign_keys = ON; PRAGMA busy_timeout = 5000;")
            .map_err(r2d2::Error::QueryError)
    }
}

pub fn init_pool(config: &AppConfig) -> Result<DbPool, DbError> {
    let manager = ConnectionManager::<SqliteConnection>::new(&config.database_url);
    let pool = r2d2::Pool::builder()
        .max_size(config.pool_size)
        .connection_customizer(Box::new(SqlitePragmas))
        .build(manager)?;

    if config.run_migrations {
        run_migrations(&pool)?;
    }

    Ok(pool)
}

/// Apply any embedded migrations the database has not seen yet.
pub fn run_migrations(pool: &DbPool) -> Result<(), DbError> {
    let mut conn = pool.get()?;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(DbError::Migration)?;

    log::info!(
        "Database migrations completed successfully ({} applied)",
        applied.len()
    );

    Ok(())
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::models::{NewBakedGood, NewBakery};
    use crate::schema::{baked_goods, bakeries};
    use chrono::NaiveDateTime;
    use diesel::prelude::*;

    /// A migrated, single-connection in-memory database. SQLite gives every
    /// `:memory:` connection its own database, so the pool must never grow.
    pub fn memory_pool() -> DbPool {
        let manager = ConnectionManager::<SqliteConnection>::new(":memory:");
        let pool = r2d2::Pool::builder()
            .max_size(1)
            .connection_customizer(Box::new(SqlitePragmas))
            .build(manager)
            .unwrap();
        run_migrations(&pool).unwrap();
        pool
    }

    pub fn timestamp(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    pub fn insert_bakery(pool: &DbPool, name: &str, created_at: &str) -> i32 {
        let mut conn = pool.get().unwrap();
        diesel::insert_into(bakeries::table)
            .values(NewBakery {
                name,
                created_at: Some(timestamp(created_at)),
                updated_at: None,
            })
            .returning(bakeries::id)
            .get_result(&mut conn)
            .unwrap()
    }

    pub fn insert_baked_good(
        pool: &DbPool,
        bakery_id: i32,
        name: &str,
        price: f64,
        created_at: &str,
    ) -> i32 {
        let mut conn = pool.get().unwrap();
        diesel::insert_into(baked_goods::table)
            .values(NewBakedGood {
                name,
                price,
                bakery_id,
                created_at: Some(timestamp(created_at)),
                updated_at: None,
            })
            .returning(baked_goods::id)
            .get_result(&mut conn)
            .unwrap()
    }

    pub fn clear_bakery_created_at(pool: &DbPool, id: i32) {
        let mut conn = pool.get().unwrap();
        diesel::update(bakeries::table.find(id))
            .set(bakeries::created_at.eq(None::<NaiveDateTime>))
            .execute(&mut conn)
            .unwrap();
    }

    pub fn clear_baked_good_created_at(pool: &DbPool, id: i32) {
        let mut conn = pool.get().unwrap();
        diesel::update(baked_goods::table.find(id))
            .set(baked_goods::created_at.eq(None::<NaiveDateTime>))
            .execute(&mut conn)
            .unwrap();
    }
}
