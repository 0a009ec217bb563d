use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OfferingKind {
    /// Ticket tier with seat-level selection.
    Section,
    /// Performance package booked as a whole.
    Package,
}

/// Shape of the seat map rendered for a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatGrid {
    pub rows: u32,
    pub seats_per_row: u32,
}

impl SeatGrid {
    pub fn seat_count(&self) -> u32 {
        self.rows * self.seats_per_row
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Offering {
    pub id: String,
    pub name: String,
    pub kind: OfferingKind,
    pub price: u32,
    pub perks: Vec<String>,
    pub description: Option<String>,
    pub total_seats: u32,
    pub available_seats: u32,
    pub available: bool,
    pub grid: Option<SeatGrid>,
}

impl Offering {
    pub fn is_bookable(&self) -> bool {
        self.available && self.available_seats > 0
    }
}
