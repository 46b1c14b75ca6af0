use crate::error::{AppError, Result};
use chrono::NaiveDateTime;
use sqlx::{Row, SqlitePool};
use tracing::{error, info};

/// Versioned schema for the bookings database.
///
/// Applying is idempotent: versions already recorded in `_migrations` are
/// skipped, and the table statements tolerate a pre-existing layout.
pub struct MigrationManager {
    pool: SqlitePool,
}

impl MigrationManager {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn run_migrations(&self) -> Result<usize> {
        info!("Ensuring database schema");

        self.create_migrations_table().await?;

        let current_version = self.get_current_version().await?;
        info!("Current migration version: {}", current_version);

        let mut applied_count = 0;

        for migration in migrations() {
            if migration.version > current_version {
                info!("Applying migration {}: {}", migration.version, migration.name);
                self.apply_migration(&migration).await?;
                applied_count += 1;
            }
        }

        if applied_count > 0 {
            info!("Applied {} migrations successfully", applied_count);
        } else {
            info!("No new migrations to apply");
        }

        Ok(applied_count)
    }

    async fn create_migrations_table(&self) -> Result<()> {
        sqlx::query(r#"
            CREATE TABLE IF NOT EXISTS _migrations (
                version INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                applied_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
                checksum TEXT NOT NULL
            )
        "#)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get_current_version(&self) -> Result<i64> {
        let row = sqlx::query("SELECT MAX(version) as version FROM _migrations")
            .fetch_one(&self.pool)
            .await?;

        let version: Option<i64> = row.try_get("version")?;
        Ok(version.unwrap_or(0))
    }

    async fn apply_migration(&self, migration: &Migration) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        for &statement in migration.sql_statements {
            if let Err(e) = sqlx::query(statement).execute(&mut *tx).await {
                error!("Failed to execute migration statement: {}", e);
                tx.rollback().await?;
                return Err(AppError::from(e));
            }
        }

        sqlx::query(r#"
            INSERT INTO _migrations (version, name, checksum)
            VALUES (?, ?, ?)
        "#)
        .bind(migration.version)
        .bind(migration.name)
        .bind(migration.checksum)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }

    pub async fn get_migration_history(&self) -> Result<Vec<MigrationRecord>> {
        let rows = sqlx::query(r#"
            SELECT version, name, applied_at, checksum
            FROM _migrations
            ORDER BY version
        "#)
        .fetch_all(&self.pool)
        .await?;

        let mut records = Vec::with_capacity(rows.len());
        for row in rows {
            records.push(MigrationRecord {
                version: row.try_get("version")?,
                name: row.try_get("name")?,
                applied_at: row.try_get("applied_at")?,
                checksum: row.try_get("checksum")?,
            });
        }

        Ok(records)
    }
}

#[derive(Debug, Clone)]
struct Migration {
    version: i64,
    name: &'static str,
    checksum: &'static str,
    sql_statements: &'static [&'static str],
}

fn migrations() -> Vec<Migration> {
    vec![
        Migration {
            version: 1,
            name: "create_bookings_table",
            checksum: "bookings_v1",
            sql_statements: &[
                r#"
                CREATE TABLE IF NOT EXISTS bookings (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    name TEXT NOT NULL,
                    email TEXT NOT NULL,
                    phone TEXT NOT NULL,
                    event_type TEXT NOT NULL,
                    event_date TEXT NOT NULL,
                    guests INTEGER NOT NULL,
                    special_requests TEXT
                )
                "#,
                r#"
                CREATE INDEX IF NOT EXISTS idx_bookings_name ON bookings(name)
                "#,
                r#"
                CREATE INDEX IF NOT EXISTS idx_bookings_email ON bookings(email)
                "#,
            ],
        },
        Migration {
            version: 2,
            name: "create_contacts_table",
            checksum: "contacts_v1",
            sql_statements: &[
                r#"
                CREATE TABLE IF NOT EXISTS contacts (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    name TEXT NOT NULL,
                    email TEXT NOT NULL,
                    message TEXT NOT NULL
                )
                "#,
                r#"
                CREATE INDEX IF NOT EXISTS idx_contacts_email ON contacts(email)
                "#,
            ],
        },
    ]
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct MigrationRecord {
    pub version: i64,
    pub name: String,
    pub applied_at: NaiveDateTime,
    pub checksum: String,
}

pub async fn run_migrations(pool: SqlitePool) -> Result<usize> {
    let migration_manager = MigrationManager::new(pool);
    migration_manager.run_migrations().await
}
