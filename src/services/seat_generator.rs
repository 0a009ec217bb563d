//! seat_generator.rs
//!
//! Генерация схемы зала для выбранной секции.
//!
//! Форма сетки детерминирована (`rows * seats_per_row` мест, ряды `A, B, C, …`),
//! а занятость каждого места берётся у [`AvailabilityProvider`]. В проде это
//! случайная заглушка вместо настоящего сервиса остатков, в тестах -
//! фиксированный набор занятых мест.

use rand::Rng;
use std::collections::HashSet;

use crate::models::{Seat, SeatStatus};

/// Source of truth for whether a seat is already sold.
pub trait AvailabilityProvider: Send + Sync {
    fn is_taken(&self, seat_id: &str) -> bool;
}

/// Independent random draw per seat. Not seeded, not reproducible.
#[derive(Debug, Clone)]
pub struct RandomAvailability {
    taken_probability: f64,
}

impl RandomAvailability {
    pub fn new(taken_probability: f64) -> Self {
        Self {
            taken_probability: taken_probability.clamp(0.0, 1.0),
        }
    }
}

impl AvailabilityProvider for RandomAvailability {
    fn is_taken(&self, _seat_id: &str) -> bool {
        rand::thread_rng().gen_bool(self.taken_probability)
    }
}

/// Deterministic fixture: exactly the listed seat ids are taken.
#[derive(Debug, Clone, Default)]
pub struct FixedAvailability {
    taken: HashSet<String>,
}

impl FixedAvailability {
    pub fn new<I, S>(taken: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            taken: taken.into_iter().map(Into::into).collect(),
        }
    }

    pub fn all_available() -> Self {
        Self::default()
    }
}

impl AvailabilityProvider for FixedAvailability {
    fn is_taken(&self, seat_id: &str) -> bool {
        self.taken.contains(seat_id)
    }
}

/// Row label for a zero-based row index: `A..Z`, then `AA, AB, …`.
pub fn row_label(index: u32) -> String {
    let mut index = index;
    let mut letters = Vec::new();
    loop {
        letters.push(char::from(b'A' + (index % 26) as u8));
        if index < 26 {
            break;
        }
        index = index / 26 - 1;
    }
    letters.iter().rev().collect()
}

/// Inverse of [`row_label`].
pub fn row_index(label: &str) -> Option<u32> {
    if label.is_empty() {
        return None;
    }
    let mut n: u32 = 0;
    for c in label.chars() {
        if !c.is_ascii_uppercase() {
            return None;
        }
        n = n.checked_mul(26)?.checked_add(c as u32 - 'A' as u32 + 1)?;
    }
    Some(n - 1)
}

#[derive(Debug, Clone, Copy)]
pub struct SeatGenerator {
    row_premium: u32,
}

impl Default for SeatGenerator {
    fn default() -> Self {
        Self { row_premium: 10 }
    }
}

impl SeatGenerator {
    pub fn new(row_premium: u32) -> Self {
        Self { row_premium }
    }

    /// Price of a seat: front rows cost more, by `row_premium` per row.
    /// Saturates at `u32::MAX` instead of wrapping.
    pub fn seat_price(&self, base_price: u32, rows: u32, row_index: u32) -> u32 {
        rows.saturating_sub(row_index)
            .checked_mul(self.row_premium)
            .and_then(|premium| base_price.checked_add(premium))
            .unwrap_or(u32::MAX)
    }

    /// Builds the seat map row by row, seat numbers starting at 1.
    pub fn generate(
        &self,
        section_id: &str,
        rows: u32,
        seats_per_row: u32,
        base_price: u32,
        availability: &dyn AvailabilityProvider,
    ) -> Vec<Seat> {
        let mut seats = Vec::with_capacity((rows * seats_per_row) as usize);

        for r in 0..rows {
            let row = row_label(r);
            let price = self.seat_price(base_price, rows, r);

            for number in 1..=seats_per_row {
                let id = Seat::make_id(section_id, &row, number);
                let status = if availability.is_taken(&id) {
                    SeatStatus::Taken
                } else {
                    SeatStatus::Available
                };
                seats.push(Seat {
                    id,
                    section_id: section_id.to_string(),
                    row: row.clone(),
                    number,
                    status,
                    price,
                });
            }
        }

        tracing::debug!(
            "Generated {} seats for section {} ({} taken)",
            seats.len(),
            section_id,
            seats.iter().filter(|s| s.is_taken()).count()
        );
        seats
    }
}
