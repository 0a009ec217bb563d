//! seat_wizard.rs
//!
//! Мастер бронирования по местам: `section → seats → payment`.
//!
//! Вся логика переходов собрана в редьюсере [`SeatWizard::apply`], который
//! берёт текущее состояние и событие и возвращает новое состояние либо
//! типизированную ошибку. При ошибке вызывающий код оставляет старое
//! состояние как есть, поэтому отклонённое событие ничего не меняет.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

use crate::catalog::Catalog;
use crate::error::BookingError;
use crate::models::{SeatBooking, SeatStep};
use crate::services::seat_generator::{AvailabilityProvider, SeatGenerator};

/// User intent in the seat flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SeatEvent {
    SelectSection { section_id: String },
    ToggleSeat { seat_id: String },
    Checkout,
    Back,
    Reset,
}

#[derive(Clone)]
pub struct SeatWizard {
    catalog: Arc<Catalog>,
    generator: SeatGenerator,
    availability: Arc<dyn AvailabilityProvider>,
}

impl SeatWizard {
    pub fn new(
        catalog: Arc<Catalog>,
        generator: SeatGenerator,
        availability: Arc<dyn AvailabilityProvider>,
    ) -> Self {
        Self {
            catalog,
            generator,
            availability,
        }
    }

    pub fn apply(&self, state: &SeatBooking, event: &SeatEvent) -> Result<SeatBooking, BookingError> {
        let next = match event {
            SeatEvent::SelectSection { section_id } => self.select_section(state, section_id),
            SeatEvent::ToggleSeat { seat_id } => Self::toggle_seat(state, seat_id),
            SeatEvent::Checkout => Self::checkout(state),
            SeatEvent::Back => Self::back(state),
            SeatEvent::Reset => Ok(state.cleared()),
        }?;

        debug!("seat flow: {} -> {} ({:?})", state.current_step, next.current_step, event);
        Ok(next)
    }

    // section -> seats
    fn select_section(&self, state: &SeatBooking, section_id: &str) -> Result<SeatBooking, BookingError> {
        if state.current_step != SeatStep::Section {
            return Err(BookingError::invalid(state.current_step, "select a section"));
        }

        let offering = self
            .catalog
            .section(section_id)
            .ok_or_else(|| BookingError::UnknownOffering(section_id.to_string()))?;
        if !offering.is_bookable() {
            return Err(BookingError::OfferingUnavailable(offering.id.clone()));
        }
        let grid = offering
            .grid
            .ok_or_else(|| BookingError::OfferingUnavailable(offering.id.clone()))?;

        let mut next = state.clone();
        next.seat_maps.entry(offering.id.clone()).or_insert_with(|| {
            self.generator.generate(
                &offering.id,
                grid.rows,
                grid.seats_per_row,
                offering.price,
                self.availability.as_ref(),
            )
        });
        next.selected_offering = Some(offering.clone());
        next.selected_seats.clear();
        next.current_step = SeatStep::Seats;
        Ok(next)
    }

    fn toggle_seat(state: &SeatBooking, seat_id: &str) -> Result<SeatBooking, BookingError> {
        if state.current_step != SeatStep::Seats {
            return Err(BookingError::invalid(state.current_step, "pick seats"));
        }

        let seat = state
            .seat(seat_id)
            .ok_or_else(|| BookingError::UnknownSeat(seat_id.to_string()))?;
        if seat.is_taken() {
            return Err(BookingError::SeatTaken(seat.id.clone()));
        }

        let mut next = state.clone();
        if let Some(pos) = next.selected_seats.iter().position(|id| id == seat_id) {
            next.selected_seats.remove(pos);
        } else {
            next.selected_seats.push(seat.id.clone());
        }
        Ok(next)
    }

    // seats -> payment
    fn checkout(state: &SeatBooking) -> Result<SeatBooking, BookingError> {
        if state.current_step != SeatStep::Seats {
            return Err(BookingError::invalid(state.current_step, "check out"));
        }
        if state.selected_seats.is_empty() {
            return Err(BookingError::NoSeatsSelected);
        }

        let mut next = state.clone();
        next.current_step = SeatStep::Payment;
        next.submitted_at = Some(Utc::now());
        Ok(next)
    }

    fn back(state: &SeatBooking) -> Result<SeatBooking, BookingError> {
        match state.current_step {
            SeatStep::Section => Err(BookingError::AlreadyAtStart),
            // Leaving seats lands on the top step, which starts over.
            // Leaving the success screen does the same.
            SeatStep::Seats | SeatStep::Payment => Ok(state.cleared()),
        }
    }
}
