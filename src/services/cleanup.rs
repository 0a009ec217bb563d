use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

use crate::AppState;

/// Evicts abandoned wizard sessions.
pub struct CleanupService {
    state: Arc<AppState>,
}

impl CleanupService {
    pub fn new(state: Arc<AppState>) -> Self {
        Self { state }
    }

    fn ttl(&self) -> Duration {
        Duration::from_secs(self.state.config.sessions.ttl_seconds)
    }

    /// Один проход очистки по обоим мастерам
    pub async fn run_once(&self) -> usize {
        let ttl = self.ttl();
        let seats = self.state.seat_sessions.purge_idle(ttl).await;
        let events = self.state.event_sessions.purge_idle(ttl).await;

        if seats + events > 0 {
            info!("🧹 Evicted {} seat sessions and {} event sessions", seats, events);
        } else {
            debug!("🧹 No idle sessions to evict");
        }
        seats + events
    }

    /// Бесконечный цикл для фоновой задачи
    pub async fn run(self) {
        let interval = Duration::from_secs(self.state.config.sessions.cleanup_interval_seconds);
        loop {
            tokio::time::sleep(interval).await;
            self.run_once().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::models::{EventBooking, SeatBooking};

    #[tokio::test]
    async fn evicts_idle_sessions_from_both_flows() {
        let mut config = Config::default();
        config.sessions.ttl_seconds = 0;
        let state = AppState::new(config).unwrap();

        state.seat_sessions.create(SeatBooking::new()).await;
        state.event_sessions.create(EventBooking::new()).await;

        let cleanup = CleanupService::new(state.clone());
        assert_eq!(cleanup.run_once().await, 2);
        assert!(state.seat_sessions.is_empty().await);
        assert!(state.event_sessions.is_empty().await);
    }

    #[tokio::test]
    async fn keeps_fresh_sessions() {
        let state = AppState::new(Config::default()).unwrap();
        state.seat_sessions.create(SeatBooking::new()).await;

        assert_eq!(CleanupService::new(state.clone()).run_once().await, 0);
        assert_eq!(state.seat_sessions.len().await, 1);
    }
}
