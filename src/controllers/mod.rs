pub mod catalog;
pub mod bookings;
pub mod event_bookings;
pub mod extract;

use axum::Router;
use std::sync::Arc;

pub fn routes() -> Router<Arc<crate::AppState>> {
    Router::new()
        .merge(catalog::routes())
        .merge(bookings::routes())
        .merge(event_bookings::routes())
}
