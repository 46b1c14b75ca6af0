//! Contact message endpoints

use crate::{
    error::Result,
    extractors::{ApiJson, ApiPath},
    models::{Contact, CreateContactRequest, CreatedResponse},
    AppState,
};
use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tracing::info;

pub async fn handle_create_contact(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<CreateContactRequest>,
) -> Result<impl IntoResponse> {
    info!("POST /contacts - from: {}", payload.name);

    let contact = state.store.create_contact(payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse::new(
            contact.id,
            "Contact message submitted successfully",
        )),
    ))
}

pub async fn handle_get_contact(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<Contact>> {
    info!("GET /contacts/{}", id);

    Ok(Json(state.store.get_contact(id).await?))
}

pub async fn handle_list_contacts(State(state): State<AppState>) -> Result<Json<Vec<Contact>>> {
    let contacts = state.store.list_contacts().await?;
    info!("GET /contacts - {} contacts", contacts.len());

    Ok(Json(contacts))
}
