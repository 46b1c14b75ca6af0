//! Booking endpoints

use crate::{
    error::Result,
    extractors::{ApiJson, ApiPath},
    models::{Booking, CreateBookingRequest, CreatedResponse},
    AppState,
};
use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tracing::info;

pub async fn handle_create_booking(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<CreateBookingRequest>,
) -> Result<impl IntoResponse> {
    info!("POST /bookings - event_type: {}, date: {}", payload.event_type, payload.event_date);

    let booking = state.store.create_booking(payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse::new(booking.id, "Booking created successfully")),
    ))
}

pub async fn handle_get_booking(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<Booking>> {
    info!("GET /bookings/{}", id);

    let booking = state.store.get_booking(id).await?;
    Ok(Json(booking))
}

pub async fn handle_list_bookings(State(state): State<AppState>) -> Result<Json<Vec<Booking>>> {
    let bookings = state.store.list_bookings().await?;
    info!("GET /bookings - {} bookings", bookings.len());

    Ok(Json(bookings))
}
