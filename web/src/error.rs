use shared_types::ErrorBody;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// Non-2xx response. `message` and `code` come from the JSON error body
    /// when the backend sent one.
    #[error("Request failed ({status}): {}", .message.as_deref().unwrap_or("no message"))]
    Backend {
        status: u16,
        message: Option<String>,
        code: Option<String>,
    },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Unexpected response: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn from_response_body(status: u16, body: &str) -> Self {
        let parsed = serde_json::from_str::<ErrorBody>(body).unwrap_or_default();
        ApiError::Backend {
            status,
            message: parsed.message.filter(|m| !m.trim().is_empty()),
            code: parsed.code,
        }
    }

    pub fn code(&self) -> Option<&str> {
        match self {
            ApiError::Backend { code, .. } => code.as_deref(),
            _ => None,
        }
    }

    /// The string shown to the user: the backend's own message when it sent
    /// one, otherwise the caller's fallback.
    pub fn display_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Backend {
                message: Some(message),
                ..
            } => message.clone(),
            _ => fallback.to_string(),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

/// Why a booking could not be created, in terms the form can act on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingFailure {
    SlotTaken,
    MissingFields,
    InvalidDetails,
    DateNotInFuture,
    Other(String),
}

const FALLBACK_BOOKING_MESSAGE: &str = "Failed to create booking. Please try again.";

impl BookingFailure {
    /// Prefers the backend's error code; older backends only send prose, so
    /// the message text is sniffed as a fallback.
    pub fn from_api_error(err: &ApiError) -> Self {
        if let Some(failure) = err.code().and_then(Self::from_code) {
            return failure;
        }
        Self::from_message(&err.display_message(FALLBACK_BOOKING_MESSAGE))
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "SLOT_ALREADY_BOOKED" => Some(BookingFailure::SlotTaken),
            "MISSING_FIELDS" => Some(BookingFailure::MissingFields),
            "VALIDATION_ERROR" => Some(BookingFailure::InvalidDetails),
            "DATE_NOT_IN_FUTURE" => Some(BookingFailure::DateNotInFuture),
            _ => None,
        }
    }

    pub fn from_message(message: &str) -> Self {
        let lower = message.to_lowercase();
        if lower.contains("already booked") {
            BookingFailure::SlotTaken
        } else if lower.contains("required") {
            BookingFailure::MissingFields
        } else if lower.contains("invalid") {
            BookingFailure::InvalidDetails
        } else if lower.contains("future") {
            BookingFailure::DateNotInFuture
        } else {
            BookingFailure::Other(message.to_string())
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            BookingFailure::SlotTaken => {
                "This time slot is already booked. Please select a different time.".to_string()
            }
            BookingFailure::MissingFields => "Please fill in all required fields.".to_string(),
            BookingFailure::InvalidDetails => {
                "Some booking details are invalid. Please check and try again.".to_string()
            }
            BookingFailure::DateNotInFuture => {
                "Please select a future date and time for your appointment.".to_string()
            }
            BookingFailure::Other(message) if message.trim().is_empty() => {
                FALLBACK_BOOKING_MESSAGE.to_string()
            }
            BookingFailure::Other(message) => message.clone(),
        }
    }
}
