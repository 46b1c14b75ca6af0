use crate::error::{AppError, Result};
use crate::models::{Booking, Contact, CreateBookingRequest, CreateContactRequest};
use async_trait::async_trait;
use sqlx::{Row, Sqlite, SqlitePool, Transaction};
use tracing::error;

/// Append-only access to one table. There is deliberately no update or delete.
#[async_trait]
pub trait Repository<T> {
    type Id;
    type CreateInput;

    async fn create(&self, input: Self::CreateInput) -> Result<T>;
    async fn get_by_id(&self, id: Self::Id) -> Result<Option<T>>;
    async fn list(&self) -> Result<Vec<T>>;
    async fn count(&self) -> Result<i64>;
}

/// Commits `tx` when `outcome` succeeded, otherwise rolls it back before the
/// error is handed back to the caller.
async fn finish_transaction<T>(
    tx: Transaction<'_, Sqlite>,
    outcome: std::result::Result<T, sqlx::Error>,
) -> Result<T> {
    match outcome {
        Ok(value) => {
            tx.commit().await?;
            Ok(value)
        }
        Err(err) => {
            error!("Insert failed, rolling back transaction: {}", err);
            if let Err(rollback_err) = tx.rollback().await {
                error!("Rollback failed: {}", rollback_err);
            }
            Err(AppError::from(err))
        }
    }
}

async fn count_rows(pool: &SqlitePool, table: &str) -> Result<i64> {
    let row = sqlx::query(&format!("SELECT COUNT(*) as count FROM {}", table))
        .fetch_one(pool)
        .await?;

    Ok(row.try_get("count")?)
}

#[derive(Clone)]
pub struct BookingRepository {
    pool: SqlitePool,
}

impl BookingRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn begin_transaction(&self) -> Result<Transaction<'_, Sqlite>> {
        self.pool.begin().await.map_err(AppError::from)
    }
}

#[async_trait]
impl Repository<Booking> for BookingRepository {
    type Id = i64;
    type CreateInput = CreateBookingRequest;

    async fn create(&self, input: Self::CreateInput) -> Result<Booking> {
        let mut tx = self.begin_transaction().await?;

        let inserted = sqlx::query_as::<_, Booking>(r#"
            INSERT INTO bookings (name, email, phone, event_type, event_date, guests, special_requests)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            RETURNING id, name, email, phone, event_type, event_date, guests, special_requests
        "#)
        .bind(&input.name)
        .bind(&input.email)
        .bind(&input.phone)
        .bind(&input.event_type)
        .bind(&input.event_date)
        .bind(input.guests)
        .bind(&input.special_requests)
        .fetch_one(&mut *tx)
        .await;

        finish_transaction(tx, inserted).await
    }

    async fn get_by_id(&self, id: Self::Id) -> Result<Option<Booking>> {
        let booking = sqlx::query_as::<_, Booking>(r#"
            SELECT id, name, email, phone, event_type, event_date, guests, special_requests
            FROM bookings
            WHERE id = ?
        "#)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(booking)
    }

    async fn list(&self) -> Result<Vec<Booking>> {
        let bookings = sqlx::query_as::<_, Booking>(r#"
            SELECT id, name, email, phone, event_type, event_date, guests, special_requests
            FROM bookings
            ORDER BY id
        "#)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!("Failed to list bookings: {}", e);
            AppError::from(e)
        })?;

        Ok(bookings)
    }

    async fn count(&self) -> Result<i64> {
        count_rows(&self.pool, "bookings").await
    }
}

#[derive(Clone)]
pub struct ContactRepository {
    pool: SqlitePool,
}

impl ContactRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository<Contact> for ContactRepository {
    type Id = i64;
    type CreateInput = CreateContactRequest;

    async fn create(&self, input: Self::CreateInput) -> Result<Contact> {
        let mut tx = self.pool.begin().await?;

        let inserted = sqlx::query_as::<_, Contact>(r#"
            INSERT INTO contacts (name, email, message)
            VALUES (?, ?, ?)
            RETURNING id, name, email, message
        "#)
        .bind(&input.name)
        .bind(&input.email)
        .bind(&input.message)
        .fetch_one(&mut *tx)
        .await;

        finish_transaction(tx, inserted).await
    }

    async fn get_by_id(&self, id: Self::Id) -> Result<Option<Contact>> {
        let contact = sqlx::query_as::<_, Contact>(
            "SELECT id, name, email, message FROM contacts WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(contact)
    }

    async fn list(&self) -> Result<Vec<Contact>> {
        let contacts = sqlx::query_as::<_, Contact>(
            "SELECT id, name, email, message FROM contacts ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!("Failed to list contacts: {}", e);
            AppError::from(e)
        })?;

        Ok(contacts)
    }

    async fn count(&self) -> Result<i64> {
        count_rows(&self.pool, "contacts").await
    }
}
