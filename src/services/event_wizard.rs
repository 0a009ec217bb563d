//! event_wizard.rs
//!
//! Мастер заказа выступления: `initial → platinum → [performance] → details → payment`.
//! Ветка "LIVE PERFORMANCE" добавляет шаг выбора состава, "DJING SET" сразу
//! переходит к форме.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

use crate::catalog::{packages::LIVE_OPTION_ID, Catalog};
use crate::error::BookingError;
use crate::models::{DetailsField, EventBooking, EventStep, Offering};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventAction {
    OpenPlatinum,
    ChooseOption { option_id: String },
    ChoosePerformance { option_id: String },
    UpdateField { field: DetailsField, value: String },
    Submit,
    Back,
    Reset,
}

#[derive(Clone)]
pub struct EventWizard {
    catalog: Arc<Catalog>,
}

fn bookable(offering: Option<&Offering>, id: &str) -> Result<Offering, BookingError> {
    let offering = offering.ok_or_else(|| BookingError::UnknownOffering(id.to_string()))?;
    if !offering.is_bookable() {
        return Err(BookingError::OfferingUnavailable(offering.id.clone()));
    }
    Ok(offering.clone())
}

impl EventWizard {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    pub fn apply(&self, state: &EventBooking, action: &EventAction) -> Result<EventBooking, BookingError> {
        let step = state.current_step;
        let mut next = state.clone();

        match action {
            EventAction::OpenPlatinum => {
                if step != EventStep::Initial {
                    return Err(BookingError::invalid(step, "open the platinum options"));
                }
                next.current_step = EventStep::Platinum;
            }
            EventAction::ChooseOption { option_id } => {
                if step != EventStep::Platinum {
                    return Err(BookingError::invalid(step, "choose a platinum option"));
                }
                let option = bookable(self.catalog.platinum_option(option_id), option_id)?;
                next.current_step = if option.id == LIVE_OPTION_ID {
                    EventStep::Performance
                } else {
                    EventStep::Details
                };
                next.branch = Some(option);
                next.performance = None;
            }
            EventAction::ChoosePerformance { option_id } => {
                if step != EventStep::Performance {
                    return Err(BookingError::invalid(step, "choose a band size"));
                }
                let option = bookable(self.catalog.performance_option(option_id), option_id)?;
                next.performance = Some(option);
                next.current_step = EventStep::Details;
            }
            EventAction::UpdateField { field, value } => {
                if step != EventStep::Details {
                    return Err(BookingError::invalid(step, "edit event details"));
                }
                next.details.set(*field, value.clone());
            }
            EventAction::Submit => {
                if step != EventStep::Details {
                    return Err(BookingError::invalid(step, "submit the request"));
                }
                let missing = state.details.missing_fields();
                if !missing.is_empty() {
                    return Err(BookingError::IncompleteForm {
                        missing: missing.iter().map(|f| f.label().to_string()).collect(),
                    });
                }
                // Local success, nothing is charged.
                next.current_step = EventStep::Payment;
                next.submitted_at = Some(Utc::now());
            }
            EventAction::Back => next = Self::back(state)?,
            EventAction::Reset => next = EventBooking::new(),
        }

        debug!("event flow: {} -> {} ({:?})", step, next.current_step, action);
        Ok(next)
    }

    fn back(state: &EventBooking) -> Result<EventBooking, BookingError> {
        let mut next = state.clone();
        match state.current_step {
            EventStep::Initial => return Err(BookingError::AlreadyAtStart),
            EventStep::Platinum => {
                next.current_step = EventStep::Initial;
                next.branch = None;
                next.performance = None;
            }
            EventStep::Performance => {
                next.current_step = EventStep::Platinum;
                next.branch = None;
                next.performance = None;
            }
            EventStep::Details => {
                if next.performance.take().is_some() {
                    next.current_step = EventStep::Performance;
                } else {
                    next.current_step = EventStep::Platinum;
                    next.branch = None;
                }
            }
            EventStep::Payment => next = EventBooking::new(),
        }
        Ok(next)
    }
}
