//! Route table for the booking service

use crate::{
    handlers::{bookings, contacts, health},
    AppState,
};
use axum::{extract::State, response::IntoResponse, routing::get, Json, Router};

pub fn create_routes() -> Router<AppState> {
    // Collections answer with and without the trailing slash.
    Router::new()
        .route("/", get(handle_root))
        .route("/health", get(health::handle_health))
        .route(
            "/bookings",
            get(bookings::handle_list_bookings).post(bookings::handle_create_booking),
        )
        .route(
            "/bookings/",
            get(bookings::handle_list_bookings).post(bookings::handle_create_booking),
        )
        .route("/bookings/:id", get(bookings::handle_get_booking))
        .route(
            "/contacts",
            get(contacts::handle_list_contacts).post(contacts::handle_create_contact),
        )
        .route(
            "/contacts/",
            get(contacts::handle_list_contacts).post(contacts::handle_create_contact),
        )
        .route("/contacts/:id", get(contacts::handle_get_contact))
}

async fn handle_root(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "app": state.app_name,
        "version": state.version,
        "endpoints": {
            "health": "GET /health",
            "bookings": {
                "list": "GET /bookings/",
                "create": "POST /bookings/",
                "get": "GET /bookings/{id}"
            },
            "contacts": {
                "list": "GET /contacts/",
                "create": "POST /contacts/",
                "get": "GET /contacts/{id}"
            }
        }
    }))
}
