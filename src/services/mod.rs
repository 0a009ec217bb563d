pub mod cleanup;
pub mod event_wizard;
pub mod seat_generator;
pub mod seat_wizard;
pub mod sessions;
pub mod submission;

pub use event_wizard::{EventAction, EventWizard};
pub use seat_generator::{AvailabilityProvider, FixedAvailability, RandomAvailability, SeatGenerator};
pub use seat_wizard::{SeatEvent, SeatWizard};
pub use sessions::SessionStore;
pub use submission::BookingSubmitter;
