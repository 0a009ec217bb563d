use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{EventBooking, EventDetails, SeatBooking};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingFlow {
    Seats,
    Event,
}

/// What gets handed to the submission sink once a booking reaches the payment step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingReceipt {
    pub reference: Uuid,
    pub session_id: Uuid,
    pub flow: BookingFlow,
    pub offering_id: Option<String>,
    pub offering_name: Option<String>,
    pub seat_ids: Vec<String>,
    pub total_price: u32,
    pub details: Option<EventDetails>,
    pub submitted_at: DateTime<Utc>,
}

impl BookingReceipt {
    pub fn for_seats(session_id: Uuid, booking: &SeatBooking) -> Self {
        let offering = booking.selected_offering.as_ref();
        BookingReceipt {
            reference: Uuid::new_v4(),
            session_id,
            flow: BookingFlow::Seats,
            offering_id: offering.map(|o| o.id.clone()),
            offering_name: offering.map(|o| o.name.clone()),
            seat_ids: booking.selected_seats.clone(),
            total_price: booking.total_price(),
            details: None,
            submitted_at: booking.submitted_at.unwrap_or_else(Utc::now),
        }
    }

    pub fn for_event(session_id: Uuid, booking: &EventBooking) -> Self {
        let offering = booking.selected_offering();
        BookingReceipt {
            reference: Uuid::new_v4(),
            session_id,
            flow: BookingFlow::Event,
            offering_id: offering.map(|o| o.id.clone()),
            offering_name: offering.map(|o| o.name.clone()),
            seat_ids: Vec::new(),
            total_price: booking.total_price(),
            details: Some(booking.details.clone()),
            submitted_at: booking.submitted_at.unwrap_or_else(Utc::now),
        }
    }
}
