use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use std::sync::Arc;

/// Which optional providers this process was started with
#[derive(Debug, Clone, Serialize)]
pub struct ProviderReadiness {
    pub telephony: bool,
    pub translation: bool,
    pub synthesis: Option<String>,
    pub publishing: bool,
}

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

/// Always ready: a missing provider degrades its feature instead of the service
pub async fn health_ready(State(readiness): State<Arc<ProviderReadiness>>) -> impl IntoResponse {
    let status = |configured: bool| if configured { "configured" } else { "disabled" };

    (
        StatusCode::OK,
        Json(serde_json::json!({
            "status": "ready",
            "telephony": status(readiness.telephony),
            "translation": status(readiness.translation),
            "synthesis": readiness.synthesis.as_deref().unwrap_or("disabled"),
            "publishing": status(readiness.publishing),
        })),
    )
}
