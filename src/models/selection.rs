//! selection.rs
//!
//! Эфемерное состояние одной попытки бронирования. Значения сериализуемы и
//! передаются через редьюсеры мастеров `(state, event) -> state`, никаких
//! скрытых изменяемых полей.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::{EventDetails, Offering, Seat};

/* ---------- SEAT FLOW ---------- */

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeatStep {
    #[default]
    Section,
    Seats,
    Payment,
}

impl fmt::Display for SeatStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SeatStep::Section => "section",
            SeatStep::Seats => "seats",
            SeatStep::Payment => "payment",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SeatBooking {
    pub current_step: SeatStep,
    pub selected_offering: Option<Offering>,
    /// Seat ids in the order they were picked.
    pub selected_seats: Vec<String>,
    /// Seat maps generated during this session, keyed by section id.
    /// Picking the same section again reuses its map.
    pub seat_maps: BTreeMap<String, Vec<Seat>>,
    pub submitted_at: Option<DateTime<Utc>>,
}

impl SeatBooking {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seat map of the currently selected section (empty before a section is picked).
    pub fn seat_map(&self) -> &[Seat] {
        self.selected_offering
            .as_ref()
            .and_then(|offering| self.seat_maps.get(&offering.id))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn seat(&self, seat_id: &str) -> Option<&Seat> {
        self.seat_map().iter().find(|seat| seat.id == seat_id)
    }

    pub fn is_selected(&self, seat_id: &str) -> bool {
        self.selected_seats.iter().any(|id| id == seat_id)
    }

    pub fn selected(&self) -> impl Iterator<Item = &Seat> + '_ {
        self.selected_seats.iter().filter_map(|id| self.seat(id))
    }

    pub fn total_price(&self) -> u32 {
        self.selected().fold(0u32, |total, seat| total.saturating_add(seat.price))
    }

    pub fn can_checkout(&self) -> bool {
        self.current_step == SeatStep::Seats && !self.selected_seats.is_empty()
    }

    pub fn can_go_back(&self) -> bool {
        self.current_step != SeatStep::Section
    }

    /// Back to the first step with nothing selected. Generated maps survive.
    pub fn cleared(&self) -> Self {
        SeatBooking {
            seat_maps: self.seat_maps.clone(),
            ..SeatBooking::default()
        }
    }
}

/* ---------- EVENT PACKAGE FLOW ---------- */

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventStep {
    #[default]
    Initial,
    Platinum,
    Performance,
    Details,
    Payment,
}

impl fmt::Display for EventStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EventStep::Initial => "initial",
            EventStep::Platinum => "platinum",
            EventStep::Performance => "performance",
            EventStep::Details => "details",
            EventStep::Payment => "payment",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EventBooking {
    pub current_step: EventStep,
    /// Option picked under platinum: DJ set or live performance.
    pub branch: Option<Offering>,
    /// Band size picked on the performance step (live branch only).
    pub performance: Option<Offering>,
    pub details: EventDetails,
    pub submitted_at: Option<DateTime<Utc>>,
}

impl EventBooking {
    pub fn new() -> Self {
        Self::default()
    }

    /// The package actually being booked: the band size if one was chosen,
    /// otherwise the platinum option.
    pub fn selected_offering(&self) -> Option<&Offering> {
        self.performance.as_ref().or(self.branch.as_ref())
    }

    pub fn total_price(&self) -> u32 {
        self.selected_offering().map(|o| o.price).unwrap_or(0)
    }

    pub fn can_submit(&self) -> bool {
        self.current_step == EventStep::Details && self.details.missing_fields().is_empty()
    }

    pub fn can_go_back(&self) -> bool {
        self.current_step != EventStep::Initial
    }
}
