//! submission.rs
//!
//! Приёмник подтверждённых бронирований.
//!
//! Ключевые компоненты:
//! 1.  **CircuitBreaker**: "автоматический выключатель", который перестаёт дёргать
//!     внешний вебхук после серии сбоев и через таймаут пропускает пробный запрос.
//! 2.  **WebhookClient**: отправка квитанции JSON-ом на `BOOKING_WEBHOOK_URL`.
//! 3.  **BookingSubmitter**: всегда пишет квитанцию в лог и, если вебхук настроен,
//!     пересылает её. Ошибки пересылки не доходят до пользователя: бронирование
//!     для него всегда успешно.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex, RwLock};
use std::time::{Duration, Instant};
use tracing::{error, info, warn};

use crate::config::Config;
use crate::models::BookingReceipt;

/// Состояния выключателя.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CircuitState {
    /// Нормальный режим, запросы разрешены.
    Closed,
    /// Запросы заблокированы после серии сбоев.
    Open,
    /// Таймаут истёк, пропускаем пробный запрос.
    HalfOpen,
}

#[derive(Debug)]
pub struct CircuitBreaker {
    state: RwLock<CircuitState>,
    failure_count: AtomicU32,
    opened_at: Mutex<Option<Instant>>,
    failure_threshold: u32,
    timeout: Duration,
}

impl CircuitBreaker {
    pub fn new(failure_threshold: u32, timeout_seconds: u64) -> Self {
        Self {
            state: RwLock::new(CircuitState::Closed),
            failure_count: AtomicU32::new(0),
            opened_at: Mutex::new(None),
            failure_threshold: failure_threshold.max(1),
            timeout: Duration::from_secs(timeout_seconds),
        }
    }

    fn set_state(&self, next: CircuitState) {
        *self.state.write().unwrap_or_else(|e| e.into_inner()) = next;
    }

    fn open(&self) {
        self.set_state(CircuitState::Open);
        *self.opened_at.lock().unwrap_or_else(|e| e.into_inner()) = Some(Instant::now());
    }

    /// Можно ли выполнить следующий запрос.
    pub fn can_execute(&self) -> bool {
        match self.get_state() {
            CircuitState::Closed | CircuitState::HalfOpen => true,
            CircuitState::Open => {
                let opened_at = *self.opened_at.lock().unwrap_or_else(|e| e.into_inner());
                let expired = opened_at.map_or(true, |at| at.elapsed() >= self.timeout);
                if expired {
                    self.set_state(CircuitState::HalfOpen);
                    info!("Circuit breaker transitioning to HalfOpen state");
                }
                expired
            }
        }
    }

    pub fn record_success(&self) {
        self.failure_count.store(0, Ordering::Relaxed);
        if self.get_state() == CircuitState::HalfOpen {
            self.set_state(CircuitState::Closed);
            info!("Circuit breaker recovered - transitioning to Closed state");
        }
    }

    pub fn record_failure(&self) {
        let failures = self.failure_count.fetch_add(1, Ordering::Relaxed) + 1;
        match self.get_state() {
            CircuitState::Closed if failures >= self.failure_threshold => {
                self.open();
                error!(
                    "Circuit breaker OPENED - {} failures reached threshold {}",
                    failures, self.failure_threshold
                );
            }
            CircuitState::HalfOpen => {
                self.open();
                warn!("Circuit breaker test failed - returning to Open state");
            }
            _ => {}
        }
    }

    pub fn get_state(&self) -> CircuitState {
        *self.state.read().unwrap_or_else(|e| e.into_inner())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("circuit breaker is open - booking webhook temporarily unavailable")]
    CircuitOpen,
    #[error("booking webhook request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("booking webhook rejected the receipt with status {0}")]
    Rejected(u16),
}

#[derive(Clone)]
pub struct WebhookClient {
    url: String,
    http_client: reqwest::Client,
    circuit_breaker: Arc<CircuitBreaker>,
}

impl WebhookClient {
    pub fn new(url: String, timeout: Duration, circuit_breaker: CircuitBreaker) -> anyhow::Result<Self> {
        let http_client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            url,
            http_client,
            circuit_breaker: Arc::new(circuit_breaker),
        })
    }

    pub fn circuit_state(&self) -> CircuitState {
        self.circuit_breaker.get_state()
    }

    pub async fn send(&self, receipt: &BookingReceipt) -> Result<(), SubmitError> {
        if !self.circuit_breaker.can_execute() {
            warn!("Circuit breaker is OPEN - skipping booking webhook");
            return Err(SubmitError::CircuitOpen);
        }

        let result = match self.http_client.post(&self.url).json(receipt).send().await {
            Ok(response) if response.status().is_success() => Ok(()),
            Ok(response) => Err(SubmitError::Rejected(response.status().as_u16())),
            Err(e) => Err(SubmitError::Http(e)),
        };

        match &result {
            Ok(()) => self.circuit_breaker.record_success(),
            Err(e) => {
                error!("Booking webhook failed for {}: {}", receipt.reference, e);
                self.circuit_breaker.record_failure();
            }
        }
        result
    }
}

#[derive(Clone, Default)]
pub struct BookingSubmitter {
    webhook: Option<WebhookClient>,
}

impl BookingSubmitter {
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let webhook = match &config.submission.webhook_url {
            Some(url) => {
                info!("Booking receipts will be forwarded to {}", url);
                Some(WebhookClient::new(
                    url.clone(),
                    Duration::from_secs(config.submission.timeout_seconds),
                    CircuitBreaker::new(
                        config.circuit_breaker.failure_threshold,
                        config.circuit_breaker.timeout_seconds,
                    ),
                )?)
            }
            None => None,
        };
        Ok(Self { webhook })
    }

    pub fn log_only() -> Self {
        Self { webhook: None }
    }

    pub fn with_webhook(webhook: WebhookClient) -> Self {
        Self { webhook: Some(webhook) }
    }

    pub async fn submit(&self, receipt: &BookingReceipt) -> Result<(), SubmitError> {
        info!(
            reference = %receipt.reference,
            flow = ?receipt.flow,
            offering = receipt.offering_id.as_deref().unwrap_or("-"),
            seats = receipt.seat_ids.len(),
            total = receipt.total_price,
            "Booking submitted"
        );

        match &self.webhook {
            Some(webhook) => webhook.send(receipt).await,
            None => Ok(()),
        }
    }

    /// Fire-and-forget: the booking already succeeded for the user.
    pub fn dispatch(&self, receipt: BookingReceipt) {
        let submitter = self.clone();
        tokio::spawn(async move {
            if let Err(e) = submitter.submit(&receipt).await {
                warn!("Receipt {} was not forwarded: {}", receipt.reference, e);
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opens_after_threshold() {
        let breaker = CircuitBreaker::new(2, 60);
        assert!(breaker.can_execute());

        breaker.record_failure();
        assert_eq!(breaker.get_state(), CircuitState::Closed);
        breaker.record_failure();
        assert_eq!(breaker.get_state(), CircuitState::Open);
        assert!(!breaker.can_execute());
    }

    #[test]
    fn half_open_after_timeout_then_recovers() {
        let breaker = CircuitBreaker::new(1, 0);
        breaker.record_failure();
        assert_eq!(breaker.get_state(), CircuitState::Open);

        assert!(breaker.can_execute());
        assert_eq!(breaker.get_state(), CircuitState::HalfOpen);

        breaker.record_success();
        assert_eq!(breaker.get_state(), CircuitState::Closed);
    }

    #[test]
    fn failed_trial_call_reopens() {
        let breaker = CircuitBreaker::new(1, 0);
        breaker.record_failure();
        assert!(breaker.can_execute());

        breaker.record_failure();
        assert_eq!(breaker.get_state(), CircuitState::Open);
    }

    #[test]
    fn success_resets_failure_count() {
        let breaker = CircuitBreaker::new(2, 60);
        breaker.record_failure();
        breaker.record_success();
        breaker.record_failure();
        assert_eq!(breaker.get_state(), CircuitState::Closed);
    }
}
