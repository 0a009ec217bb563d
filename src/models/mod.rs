pub mod offering;
pub mod seat;
pub mod selection;
pub mod event_details;
pub mod receipt;

pub use offering::{Offering, OfferingKind, SeatGrid};
pub use seat::{Seat, SeatStatus};
pub use selection::{EventBooking, EventStep, SeatBooking, SeatStep};
pub use event_details::{DetailsField, EventDetails};
pub use receipt::{BookingFlow, BookingReceipt};
