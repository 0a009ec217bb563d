use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeatStatus {
    Available,
    Taken,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seat {
    pub id: String,
    pub section_id: String,
    pub row: String,
    pub number: u32,
    pub status: SeatStatus,
    pub price: u32,
}

impl Seat {
    pub fn is_taken(&self) -> bool {
        self.status == SeatStatus::Taken
    }

    pub fn make_id(section_id: &str, row: &str, number: u32) -> String {
        format!("{}-{}{}", section_id, row, number)
    }
}
