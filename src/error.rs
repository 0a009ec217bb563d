use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use uuid::Uuid;

/// Typed rejection of a wizard transition.
///
/// Every guard that the UI shows as a disabled control ends up here, so the
/// caller always gets an explicit reason instead of a silent no-op.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "error", content = "detail", rename_all = "snake_case")]
pub enum BookingError {
    #[error("select at least one seat before checking out")]
    NoSeatsSelected,

    #[error("required fields are empty: {}", .missing.join(", "))]
    IncompleteForm { missing: Vec<String> },

    #[error("offering {0} is not available")]
    OfferingUnavailable(String),

    #[error("offering {0} does not exist")]
    UnknownOffering(String),

    #[error("seat {0} does not exist in the selected section")]
    UnknownSeat(String),

    #[error("seat {0} is already taken")]
    SeatTaken(String),

    #[error("cannot {action} while on step {step}")]
    InvalidTransition { step: String, action: String },

    #[error("already at the first step")]
    AlreadyAtStart,

    #[error("booking session {0} not found")]
    SessionNotFound(Uuid),

    #[error("malformed request: {0}")]
    MalformedRequest(String),
}

impl BookingError {
    pub fn invalid(step: impl std::fmt::Display, action: &str) -> Self {
        BookingError::InvalidTransition {
            step: step.to_string(),
            action: action.to_string(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            BookingError::UnknownOffering(_)
            | BookingError::UnknownSeat(_)
            | BookingError::SessionNotFound(_) => StatusCode::NOT_FOUND,
            BookingError::IncompleteForm { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            BookingError::MalformedRequest(_) => StatusCode::BAD_REQUEST,
            BookingError::NoSeatsSelected
            | BookingError::OfferingUnavailable(_)
            | BookingError::SeatTaken(_)
            | BookingError::InvalidTransition { .. }
            | BookingError::AlreadyAtStart => StatusCode::CONFLICT,
        }
    }
}

impl From<JsonRejection> for BookingError {
    fn from(rejection: JsonRejection) -> Self {
        BookingError::MalformedRequest(rejection.body_text())
    }
}

impl From<PathRejection> for BookingError {
    fn from(rejection: PathRejection) -> Self {
        BookingError::MalformedRequest(rejection.body_text())
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    #[serde(flatten)]
    error: &'a BookingError,
    message: String,
}

impl IntoResponse for BookingError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_client_error() && status != StatusCode::NOT_FOUND {
            tracing::debug!("transition rejected: {}", self);
        }
        let body = ErrorBody {
            message: self.to_string(),
            error: &self,
        };
        (status, Json(body)).into_response()
    }
}
