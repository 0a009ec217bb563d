use anyhow::{bail, Context};
use serde::Deserialize;
use std::env;
use std::str::FromStr;

/// Upper bound for `ROW_PREMIUM`: keeps the priciest seat of the largest
/// catalog grid, and a full-section selection, well inside `u32`.
pub const MAX_ROW_PREMIUM: u32 = 10_000;

// Главная структура конфигурации - контейнер для всех настроек
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub wizard: WizardConfig,
    pub sessions: SessionConfig,
    pub submission: SubmissionConfig,
    pub circuit_breaker: CircuitBreakerConfig,
}

// Настройки приложения
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub environment: String,
    pub rust_log: String,
}

// Настройки генерации схемы зала
#[derive(Debug, Clone, Deserialize)]
pub struct WizardConfig {
    /// Вероятность того, что место уже занято при генерации.
    pub taken_probability: f64,
    /// Надбавка за каждый ряд ближе к сцене.
    pub row_premium: u32,
}

// Настройки хранения сессий мастера
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    pub ttl_seconds: u64,
    pub cleanup_interval_seconds: u64,
}

// Куда отправлять подтверждённые бронирования
#[derive(Debug, Clone, Deserialize)]
pub struct SubmissionConfig {
    pub webhook_url: Option<String>,
    pub timeout_seconds: u64,
}

// Настройки Circuit Breaker
#[derive(Debug, Clone, Deserialize)]
pub struct CircuitBreakerConfig {
    pub failure_threshold: u32,
    pub timeout_seconds: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            app: AppConfig {
                host: "0.0.0.0".to_string(),
                port: 8000,
                environment: "development".to_string(),
                rust_log: "booking_wizard=debug,tower_http=debug".to_string(),
            },
            wizard: WizardConfig {
                taken_probability: 0.3,
                row_premium: 10,
            },
            sessions: SessionConfig {
                ttl_seconds: 1800,
                cleanup_interval_seconds: 60,
            },
            submission: SubmissionConfig {
                webhook_url: None,
                timeout_seconds: 10,
            },
            circuit_breaker: CircuitBreakerConfig {
                failure_threshold: 5,
                timeout_seconds: 60,
            },
        }
    }
}

impl Config {
    /// Reads the configuration from the environment, keeping defaults for unset keys.
    pub fn from_env() -> anyhow::Result<Self> {
        let defaults = Config::default();

        let config = Config {
            app: AppConfig {
                host: env::var("HOST").unwrap_or(defaults.app.host),
                port: parse_var("PORT", defaults.app.port)?,
                environment: env::var("ENVIRONMENT").unwrap_or(defaults.app.environment),
                rust_log: env::var("RUST_LOG").unwrap_or(defaults.app.rust_log),
            },
            wizard: WizardConfig {
                taken_probability: parse_var("SEAT_TAKEN_PROBABILITY", defaults.wizard.taken_probability)?,
                row_premium: parse_var("ROW_PREMIUM", defaults.wizard.row_premium)?,
            },
            sessions: SessionConfig {
                ttl_seconds: parse_var("SESSION_TTL_SECONDS", defaults.sessions.ttl_seconds)?,
                cleanup_interval_seconds: parse_var(
                    "SESSION_CLEANUP_INTERVAL_SECONDS",
                    defaults.sessions.cleanup_interval_seconds,
                )?,
            },
            submission: SubmissionConfig {
                webhook_url: env::var("BOOKING_WEBHOOK_URL")
                    .ok()
                    .filter(|url| !url.trim().is_empty()),
                timeout_seconds: parse_var(
                    "BOOKING_WEBHOOK_TIMEOUT_SECONDS",
                    defaults.submission.timeout_seconds,
                )?,
            },
            circuit_breaker: CircuitBreakerConfig {
                failure_threshold: parse_var(
                    "CIRCUIT_BREAKER_FAILURE_THRESHOLD",
                    defaults.circuit_breaker.failure_threshold,
                )?,
                timeout_seconds: parse_var(
                    "CIRCUIT_BREAKER_TIMEOUT_SECONDS",
                    defaults.circuit_breaker.timeout_seconds,
                )?,
            },
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        let p = self.wizard.taken_probability;
        if !(0.0..=1.0).contains(&p) {
            bail!("SEAT_TAKEN_PROBABILITY must be within 0..=1, got {}", p);
        }
        if self.wizard.row_premium > MAX_ROW_PREMIUM {
            bail!(
                "ROW_PREMIUM must be <= {}, got {}",
                MAX_ROW_PREMIUM,
                self.wizard.row_premium
            );
        }
        if self.sessions.cleanup_interval_seconds == 0 {
            bail!("SESSION_CLEANUP_INTERVAL_SECONDS must be > 0");
        }
        Ok(())
    }
}

fn parse_var<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} must be a valid value, got {:?}", key, raw)),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.wizard.row_premium, 10);
        assert!((config.wizard.taken_probability - 0.3).abs() < f64::EPSILON);
        assert!(config.submission.webhook_url.is_none());
    }

    #[test]
    fn probability_out_of_range_is_rejected() {
        let mut config = Config::default();
        config.wizard.taken_probability = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn oversized_row_premium_is_rejected() {
        let mut config = Config::default();
        config.wizard.row_premium = 500_000_000;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("ROW_PREMIUM"));

        config.wizard.row_premium = MAX_ROW_PREMIUM;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn unset_variable_falls_back_to_default() {
        let value: u32 = parse_var("BOOKING_WIZARD_SURELY_UNSET_VAR", 42).unwrap();
        assert_eq!(value, 42);
    }
}
