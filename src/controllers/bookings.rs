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
use crate::models::{BookingReceipt, Offering, SeatBooking, SeatStatus, SeatStep};
use crate::services::SeatEvent;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/bookings", post(create_booking))
        .route("/bookings/{id}", get(get_booking).delete(delete_booking))
        .route("/bookings/{id}/events", post(apply_event))
}

/* ---------- views ---------- */

#[derive(Debug, Serialize)]
struct SeatView {
    id: String,
    row: String,
    number: u32,
    status: SeatStatus,
    price: u32,
    selected: bool,
}

#[derive(Debug, Serialize)]
struct SeatBookingResponse {
    id: Uuid,
    current_step: SeatStep,
    selected_offering: Option<Offering>,
    seats: Vec<SeatView>,
    selected_seats: Vec<String>,
    total_price: u32,
    can_checkout: bool,
    can_go_back: bool,
    submitted_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    receipt: Option<BookingReceipt>,
}

impl SeatBookingResponse {
    fn new(id: Uuid, booking: &SeatBooking, receipt: Option<BookingReceipt>) -> Self {
        let seats = booking
            .seat_map()
            .iter()
            .map(|seat| SeatView {
                id: seat.id.clone(),
                row: seat.row.clone(),
                number: seat.number,
                status: seat.status,
                price: seat.price,
                selected: booking.is_selected(&seat.id),
            })
            .collect();

        Self {
            id,
            current_step: booking.current_step,
            selected_offering: booking.selected_offering.clone(),
            seats,
            selected_seats: booking.selected_seats.clone(),
            total_price: booking.total_price(),
            can_checkout: booking.can_checkout(),
            can_go_back: booking.can_go_back(),
            submitted_at: booking.submitted_at,
            receipt,
        }
    }
}

/* ---------- handlers ---------- */

// POST /api/bookings
async fn create_booking(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let booking = SeatBooking::new();
    let id = state.seat_sessions.create(booking.clone()).await;
    tracing::debug!("seat booking session {} created", id);
    (StatusCode::CREATED, Json(SeatBookingResponse::new(id, &booking, None)))
}

// GET /api/bookings/{id}
async fn get_booking(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<impl IntoResponse, BookingError> {
    let booking = state
        .seat_sessions
        .get(id)
        .await
        .ok_or(BookingError::SessionNotFound(id))?;
    Ok(Json(SeatBookingResponse::new(id, &booking, None)))
}

// POST /api/bookings/{id}/events
async fn apply_event(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(event): ApiJson<SeatEvent>,
) -> Result<impl IntoResponse, BookingError> {
    let wizard = &state.seat_wizard;
    let booking = state
        .seat_sessions
        .apply(id, |current| wizard.apply(current, &event))
        .await?;

    // checkout прошёл -> бронь оформлена, отдаём квитанцию
    let receipt = if event == SeatEvent::Checkout {
        let receipt = BookingReceipt::for_seats(id, &booking);
        state.submitter.dispatch(receipt.clone());
        Some(receipt)
    } else {
        None
    };

    Ok(Json(SeatBookingResponse::new(id, &booking, receipt)))
}

// DELETE /api/bookings/{id}
async fn delete_booking(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<impl IntoResponse, BookingError> {
    if !state.seat_sessions.remove(id).await {
        return Err(BookingError::SessionNotFound(id));
    }
    Ok(StatusCode::NO_CONTENT)
}
