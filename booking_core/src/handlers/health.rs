//! Health check handler

use crate::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use tracing::warn;

pub async fn handle_health(State(state): State<AppState>) -> impl IntoResponse {
    let mut health_info = serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().timestamp(),
        "version": state.version,
    });

    let status_code = match state.store.database().health_check().await {
        Ok(()) => {
            health_info["database_status"] = "healthy".into();
            StatusCode::OK
        }
        Err(e) => {
            warn!("Database health check failed: {}", e);
            health_info["status"] = "unhealthy".into();
            health_info["database_status"] = "unhealthy".into();
            health_info["database_error"] = e.to_string().into();
            StatusCode::SERVICE_UNAVAILABLE
        }
    };

    if status_code == StatusCode::OK {
        match state.store.stats().await {
            Ok(stats) => {
                health_info["bookings"] = stats.bookings.into();
                health_info["contacts"] = stats.contacts.into();
            }
            Err(e) => warn!("Failed to collect store stats: {}", e),
        }
    }

    (status_code, Json(health_info))
}
