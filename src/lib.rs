pub mod catalog;
pub mod config;
pub mod controllers;
pub mod error;
pub mod models;
pub mod services;

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use services::{
    AvailabilityProvider, BookingSubmitter, EventWizard, RandomAvailability, SeatGenerator,
    SeatWizard, SessionStore,
};

// Shared state для всего приложения
pub struct AppState {
    pub config: config::Config,
    pub catalog: Arc<catalog::Catalog>,
    pub seat_wizard: SeatWizard,
    pub event_wizard: EventWizard,
    pub seat_sessions: SessionStore<models::SeatBooking>,
    pub event_sessions: SessionStore<models::EventBooking>,
    pub submitter: BookingSubmitter,
}

impl AppState {
    /// Seat availability is drawn at random, as on the live site.
    pub fn new(config: config::Config) -> anyhow::Result<Arc<Self>> {
        let availability = Arc::new(RandomAvailability::new(config.wizard.taken_probability));
        Self::with_availability(config, availability)
    }

    pub fn with_availability(
        config: config::Config,
        availability: Arc<dyn AvailabilityProvider>,
    ) -> anyhow::Result<Arc<Self>> {
        let submitter = BookingSubmitter::from_config(&config)?;
        Ok(Self::with_parts(config, availability, submitter))
    }

    pub fn with_parts(
        config: config::Config,
        availability: Arc<dyn AvailabilityProvider>,
        submitter: BookingSubmitter,
    ) -> Arc<Self> {
        let catalog = Arc::new(catalog::Catalog::new());
        let generator = SeatGenerator::new(config.wizard.row_premium);

        Arc::new(Self {
            seat_wizard: SeatWizard::new(catalog.clone(), generator, availability),
            event_wizard: EventWizard::new(catalog.clone()),
            seat_sessions: SessionStore::new(),
            event_sessions: SessionStore::new(),
            catalog,
            submitter,
            config,
        })
    }
}

/// Full HTTP surface: health routes plus the `/api` tree.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(|| async { "Max Kate Booking API v1.0" }))
        .route("/health", get(|| async { "OK" }))
        .nest("/api", controllers::routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
