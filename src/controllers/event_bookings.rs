use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::controllers::extract::{ApiJson, ApiPath};
use crate::error::BookingError;
use crate::models::{BookingReceipt, EventBooking, EventDetails, EventStep, Offering};
use crate::services::EventAction;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/event-bookings", post(create_event_booking))
        .route(
            "/event-bookings/{id}",
            get(get_event_booking).delete(delete_event_booking),
        )
        .route("/event-bookings/{id}/events", post(apply_action))
}

#[derive(Debug, Serialize)]
struct EventBookingResponse {
    id: Uuid,
    current_step: EventStep,
    /// Options shown on the current step.
    options: Vec<Offering>,
    selected_offering: Option<Offering>,
    details: EventDetails,
    missing_fields: Vec<&'static str>,
    total_price: u32,
    can_submit: bool,
    can_go_back: bool,
    submitted_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    receipt: Option<BookingReceipt>,
}

impl EventBookingResponse {
    fn new(state: &AppState, id: Uuid, booking: &EventBooking, receipt: Option<BookingReceipt>) -> Self {
        let options = match booking.current_step {
            EventStep::Platinum => state.catalog.platinum_options().to_vec(),
            EventStep::Performance => state.catalog.performance_options().to_vec(),
            _ => Vec::new(),
        };
        let missing_fields = if booking.current_step == EventStep::Details {
            booking.details.missing_fields().into_iter().map(|f| f.label()).collect()
        } else {
            Vec::new()
        };

        Self {
            id,
            current_step: booking.current_step,
            options,
            selected_offering: booking.selected_offering().cloned(),
            details: booking.details.clone(),
            missing_fields,
            total_price: booking.total_price(),
            can_submit: booking.can_submit(),
            can_go_back: booking.can_go_back(),
            submitted_at: booking.submitted_at,
            receipt,
        }
    }
}

// POST /api/event-bookings
async fn create_event_booking(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let booking = EventBooking::new();
    let id = state.event_sessions.create(booking.clone()).await;
    tracing::debug!("event booking session {} created", id);
    (
        StatusCode::CREATED,
        Json(EventBookingResponse::new(&state, id, &booking, None)),
    )
}

// GET /api/event-bookings/{id}
async fn get_event_booking(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<impl IntoResponse, BookingError> {
    let booking = state
        .event_sessions
        .get(id)
        .await
        .ok_or(BookingError::SessionNotFound(id))?;
    Ok(Json(EventBookingResponse::new(&state, id, &booking, None)))
}

// POST /api/event-bookings/{id}/events
async fn apply_action(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(action): ApiJson<EventAction>,
) -> Result<impl IntoResponse, BookingError> {
    let wizard = &state.event_wizard;
    let booking = state
        .event_sessions
        .apply(id, |current| wizard.apply(current, &action))
        .await?;

    // запрос принят -> отправляем квитанцию (реального платежа нет)
    let receipt = if action == EventAction::Submit {
        let receipt = BookingReceipt::for_event(id, &booking);
        state.submitter.dispatch(receipt.clone());
        Some(receipt)
    } else {
        None
    };

    Ok(Json(EventBookingResponse::new(&state, id, &booking, receipt)))
}

// DELETE /api/event-bookings/{id}
async fn delete_event_booking(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<impl IntoResponse, BookingError> {
    if !state.event_sessions.remove(id).await {
        return Err(BookingError::SessionNotFound(id));
    }
    Ok(StatusCode::NO_CONTENT)
}
