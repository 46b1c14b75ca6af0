use booking_core::{
    config::DatabaseConfig, AppError, BookingStore, CreateBookingRequest, CreateContactRequest,
    ValidationContext,
};
use std::collections::HashSet;
use tempfile::TempDir;

fn database_config(dir: &TempDir, file: &str) -> DatabaseConfig {
    DatabaseConfig {
        url: format!("sqlite:{}", dir.path().join(file).display()),
        ..DatabaseConfig::default()
    }
}

fn booking(name: &str) -> CreateBookingRequest {
    CreateBookingRequest {
        name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase()),
        phone: "5551234567".to_string(),
        event_type: "wedding".to_string(),
        event_date: "2025-06-01".to_string(),
        guests: 50,
        special_requests: None,
    }
}

#[tokio::test]
async fn test_concurrent_creates_get_unique_ids() {
    let dir = TempDir::new().unwrap();
    let store = BookingStore::open(&database_config(&dir, "concurrent.db"), ValidationContext::default())
        .await
        .unwrap();

    let mut handles = Vec::new();
    for i in 0..20 {
        let store = store.clone();
        handles.push(tokio::spawn(async move {
            store.create_booking(booking(&format!("Guest{}", i))).await
        }));
    }

    let mut ids = HashSet::new();
    for handle in handles {
        let created = handle.await.unwrap().unwrap();
        assert!(created.id > 0);
        assert!(ids.insert(created.id), "duplicate id {}", created.id);
    }

    assert_eq!(ids.len(), 20);
    assert_eq!(store.list_bookings().await.unwrap().len(), 20);

    store.close().await;
}

#[tokio::test]
async fn test_records_survive_reopen_without_id_reuse() {
    let dir = TempDir::new().unwrap();
    let config = database_config(&dir, "reopen.db");

    let store = BookingStore::open(&config, ValidationContext::default()).await.unwrap();
    let first = store.create_booking(booking("Ada")).await.unwrap();
    store
        .create_contact(CreateContactRequest {
            name: "Bob".to_string(),
            email: "bob@example.com".to_string(),
            message: "hi".to_string(),
        })
        .await
        .unwrap();
    store.close().await;

    let reopened = BookingStore::open(&config, ValidationContext::default()).await.unwrap();
    assert_eq!(reopened.get_booking(first.id).await.unwrap(), first);
    assert_eq!(reopened.list_contacts().await.unwrap().len(), 1);

    let second = reopened.create_booking(booking("Grace")).await.unwrap();
    assert!(second.id > first.id);

    let stats = reopened.stats().await.unwrap();
    assert_eq!(stats.bookings, 2);
    assert_eq!(stats.contacts, 1);

    reopened.close().await;
}

#[tokio::test]
async fn test_rejected_booking_leaves_listing_unchanged() {
    let dir = TempDir::new().unwrap();
    let store = BookingStore::open(&database_config(&dir, "rejected.db"), ValidationContext::default())
        .await
        .unwrap();

    store.create_booking(booking("Ada")).await.unwrap();
    let before = store.list_bookings().await.unwrap();

    let mut invalid = booking("Grace");
    invalid.email = "grace-at-example".to_string();
    invalid.event_date = "June 1st".to_string();

    match store.create_booking(invalid).await {
        Err(AppError::Validation(result)) => {
            assert_eq!(result.failed_fields(), vec!["email", "event_date"]);
        }
        other => panic!("expected validation error, got {:?}", other),
    }

    assert_eq!(store.list_bookings().await.unwrap(), before);
}

#[tokio::test]
async fn test_bookings_and_contacts_number_independently() {
    let dir = TempDir::new().unwrap();
    let store = BookingStore::open(&database_config(&dir, "ids.db"), ValidationContext::default())
        .await
        .unwrap();

    let booking = store.create_booking(booking("Ada")).await.unwrap();
    let contact = store
        .create_contact(CreateContactRequest {
            name: "Bob".to_string(),
            email: "bob@example.com".to_string(),
            message: "Do you cater?".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(booking.id, 1);
    assert_eq!(contact.id, 1);
    assert_eq!(store.get_contact(contact.id).await.unwrap(), contact);
    assert!(matches!(store.get_contact(2).await, Err(AppError::NotFound(_))));
}
