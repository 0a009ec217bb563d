use axum::{
    extract::{Path, State},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use std::sync::Arc;

use crate::error::BookingError;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/catalog/sections", get(list_sections))
        .route("/catalog/sections/{id}", get(get_section))
        .route("/catalog/packages", get(list_packages))
}

// GET /api/catalog/sections
async fn list_sections(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.catalog.sections().to_vec())
}

// GET /api/catalog/sections/{id}
async fn get_section(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, BookingError> {
    let section = state
        .catalog
        .section(&id)
        .cloned()
        .ok_or(BookingError::UnknownOffering(id))?;
    Ok(Json(section))
}

// GET /api/catalog/packages
async fn list_packages(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(serde_json::json!(state.catalog.packages()))
}
