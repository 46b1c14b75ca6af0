use crate::{
    config::DatabaseConfig,
    database::{
        get_database_pool, BookingRepository, ContactRepository, DatabaseManager,
        MigrationManager, Repository,
    },
    error::{AppError, Result},
    models::{Booking, Contact, CreateBookingRequest, CreateContactRequest},
    validation::{ContextValidatable, ValidationContext},
};
use serde::Serialize;
use sqlx::SqlitePool;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StoreStats {
    pub bookings: i64,
    pub contacts: i64,
}

/// Persists bookings and contact messages and serves them back.
///
/// Every operation borrows a pooled connection for its own duration only, so
/// a store can be cloned freely into request handlers.
#[derive(Clone)]
pub struct BookingStore {
    db_manager: DatabaseManager,
    bookings: BookingRepository,
    contacts: ContactRepository,
    validation: ValidationContext,
}

impl BookingStore {
    pub async fn open(config: &DatabaseConfig, validation: ValidationContext) -> Result<Self> {
        let pool = get_database_pool(config).await?;
        Self::from_pool(pool, validation).await
    }

    pub async fn from_pool(pool: SqlitePool, validation: ValidationContext) -> Result<Self> {
        let store = Self {
            db_manager: DatabaseManager::new(pool.clone()),
            bookings: BookingRepository::new(pool.clone()),
            contacts: ContactRepository::new(pool),
            validation,
        };

        store.ensure_schema().await?;
        Ok(store)
    }

    pub async fn ensure_schema(&self) -> Result<()> {
        MigrationManager::new(self.db_manager.pool().clone())
            .run_migrations()
            .await?;
        Ok(())
    }

    pub async fn close(&self) {
        self.db_manager.close().await;
    }

    pub fn database(&self) -> &DatabaseManager {
        &self.db_manager
    }

    pub async fn create_booking(&self, request: CreateBookingRequest) -> Result<Booking> {
        let validation = request.validate_with_context(&self.validation);
        if !validation.is_valid {
            debug!(fields = ?validation.failed_fields(), "Rejected booking");
            return Err(AppError::Validation(validation));
        }

        let booking = self.bookings.create(request).await?;
        info!(id = booking.id, event_type = %booking.event_type, "Booking created");
        Ok(booking)
    }

    pub async fn get_booking(&self, id: i64) -> Result<Booking> {
        check_id(id, "Booking")?;

        self.bookings
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))
    }

    pub async fn list_bookings(&self) -> Result<Vec<Booking>> {
        self.bookings.list().await
    }

    pub async fn create_contact(&self, request: CreateContactRequest) -> Result<Contact> {
        let validation = request.validate_with_context(&self.validation);
        if !validation.is_valid {
            debug!(fields = ?validation.failed_fields(), "Rejected contact message");
            return Err(AppError::Validation(validation));
        }

        let contact = self.contacts.create(request).await?;
        info!(id = contact.id, "Contact message stored");
        Ok(contact)
    }

    pub async fn get_contact(&self, id: i64) -> Result<Contact> {
        check_id(id, "Contact")?;

        self.contacts
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Contact not found".to_string()))
    }

    pub async fn list_contacts(&self) -> Result<Vec<Contact>> {
        self.contacts.list().await
    }

    pub async fn stats(&self) -> Result<StoreStats> {
        Ok(StoreStats {
            bookings: self.bookings.count().await?,
            contacts: self.contacts.count().await?,
        })
    }
}

fn check_id(id: i64, entity: &str) -> Result<()> {
    if id <= 0 {
        return Err(AppError::BadRequest(format!(
            "{} id must be a positive integer",
            entity
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn setup_store(validation: ValidationContext) -> (TempDir, BookingStore) {
        let dir = TempDir::new().unwrap();
        let config = DatabaseConfig {
            url: format!("sqlite:{}", dir.path().join("store.db").display()),
            ..DatabaseConfig::default()
        };

        let store = BookingStore::open(&config, validation).await.unwrap();
        (dir, store)
    }

    fn ada() -> CreateBookingRequest {
        CreateBookingRequest {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            phone: "5551234567".to_string(),
            event_type: "wedding".to_string(),
            event_date: "2025-06-01".to_string(),
            guests: 50,
            special_requests: None,
        }
    }

    #[tokio::test]
    async fn test_create_then_get_round_trip() {
        let (_dir, store) = setup_store(ValidationContext::default()).await;

        let created = store.create_booking(ada()).await.unwrap();
        assert_eq!(created.id, 1);

        let fetched = store.get_booking(1).await.unwrap();
        assert_eq!(fetched, created);
        assert_eq!(fetched.name, "Ada");
        assert_eq!(fetched.email, "ada@example.com");
        assert_eq!(fetched.phone, "5551234567");
        assert_eq!(fetched.event_type, "wedding");
        assert_eq!(fetched.event_date, "2025-06-01");
        assert_eq!(fetched.guests, 50);
        assert_eq!(fetched.special_requests, None);
    }

    #[tokio::test]
    async fn test_unknown_and_invalid_ids() {
        let (_dir, store) = setup_store(ValidationContext::default()).await;

        assert!(matches!(store.get_booking(42).await, Err(AppError::NotFound(_))));
        assert!(matches!(store.get_contact(42).await, Err(AppError::NotFound(_))));
        assert!(matches!(store.get_booking(0).await, Err(AppError::BadRequest(_))));
        assert!(matches!(store.get_booking(-1).await, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_invalid_booking_creates_no_row() {
        let (_dir, store) = setup_store(ValidationContext::default()).await;

        let empty_name = CreateBookingRequest {
            name: String::new(),
            ..ada()
        };
        let bad_email = CreateBookingRequest {
            email: "ada.example.com".to_string(),
            ..ada()
        };

        for request in [empty_name, bad_email] {
            let result = store.create_booking(request).await;
            assert!(matches!(result, Err(AppError::Validation(_))));
        }

        assert!(store.list_bookings().await.unwrap().is_empty());
        assert_eq!(store.create_booking(ada()).await.unwrap().id, 1);
    }

    #[tokio::test]
    async fn test_list_counts() {
        let (_dir, store) = setup_store(ValidationContext::default()).await;
        assert!(store.list_bookings().await.unwrap().is_empty());
        assert!(store.list_contacts().await.unwrap().is_empty());

        for n in 0..5 {
            store
                .create_booking(CreateBookingRequest {
                    guests: n,
                    ..ada()
                })
                .await
                .unwrap();
        }

        let bookings = store.list_bookings().await.unwrap();
        assert_eq!(bookings.len(), 5);
        assert_eq!(
            bookings.iter().map(|b| b.guests).collect::<Vec<_>>(),
            vec![0, 1, 2, 3, 4]
        );
        assert_eq!(
            store.stats().await.unwrap(),
            StoreStats { bookings: 5, contacts: 0 }
        );
    }

    #[tokio::test]
    async fn test_ids_increase_per_entity_type() {
        let (_dir, store) = setup_store(ValidationContext::default()).await;

        let mut booking_ids = Vec::new();
        let mut contact_ids = Vec::new();

        for i in 0..4 {
            booking_ids.push(store.create_booking(ada()).await.unwrap().id);
            contact_ids.push(
                store
                    .create_contact(CreateContactRequest {
                        name: format!("Visitor {}", i),
                        email: "visitor@example.com".to_string(),
                        message: "hello".to_string(),
                    })
                    .await
                    .unwrap()
                    .id,
            );
        }

        assert!(booking_ids.windows(2).all(|w| w[0] < w[1]));
        assert!(contact_ids.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(booking_ids, vec![1, 2, 3, 4]);
        assert_eq!(contact_ids, vec![1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn test_contact_with_bad_email_rejected() {
        let (_dir, store) = setup_store(ValidationContext::default()).await;

        let result = store
            .create_contact(CreateContactRequest {
                name: "Bob".to_string(),
                email: "not-an-email".to_string(),
                message: "hi".to_string(),
            })
            .await;

        match result {
            Err(AppError::Validation(validation)) => {
                assert_eq!(validation.failed_fields(), vec!["email"]);
            }
            other => panic!("expected validation error, got {:?}", other),
        }
        assert!(store.list_contacts().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_phone_length_rule_from_context() {
        let (_dir, store) = setup_store(ValidationContext::with_phone_length(10, 15)).await;

        let short_phone = CreateBookingRequest {
            phone: "12345".to_string(),
            ..ada()
        };
        assert!(matches!(
            store.create_booking(short_phone).await,
            Err(AppError::Validation(_))
        ));
        assert!(store.create_booking(ada()).await.is_ok());
    }

    #[tokio::test]
    async fn test_operations_fail_after_close() {
        let (_dir, store) = setup_store(ValidationContext::default()).await;
        store.close().await;

        assert!(matches!(store.create_booking(ada()).await, Err(AppError::Database(_))));
        assert!(matches!(store.list_bookings().await, Err(AppError::Database(_))));
    }
}
