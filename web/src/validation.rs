use std::sync::OnceLock;

use regex::Regex;
use shared_types::ConsultationType;
use thiserror::Error;

const MIN_PHONE_DIGITS: usize = 10;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter patient name.")]
    MissingName,

    #[error("Please enter a valid phone number (at least 10 digits).")]
    InvalidPhone,

    #[error("Please enter a valid email address.")]
    InvalidEmail,
}

/// Contact details collected by the booking modal.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BookingForm {
    pub patient_name: String,
    pub phone: String,
    pub email: String,
    pub consultation_type: ConsultationType,
    pub notes: String,
}

impl BookingForm {
    /// Checks fields in display order and reports the first problem.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.patient_name.trim().is_empty() {
            return Err(ValidationError::MissingName);
        }
        if !is_valid_phone(&self.phone) {
            return Err(ValidationError::InvalidPhone);
        }
        if !is_valid_email(&self.email) {
            return Err(ValidationError::InvalidEmail);
        }
        Ok(())
    }

    /// Copy with surrounding whitespace stripped, as sent to the backend.
    pub fn trimmed(&self) -> Self {
        Self {
            patient_name: self.patient_name.trim().to_string(),
            phone: self.phone.trim().to_string(),
            email: self.email.trim().to_string(),
            consultation_type: self.consultation_type,
            notes: self.notes.trim().to_string(),
        }
    }
}

fn phone_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\+?[0-9\s\-()]{10,}$").expect("phone pattern compiles"))
}

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"))
}

pub fn is_valid_phone(phone: &str) -> bool {
    let phone = phone.trim();
    let digits = phone.chars().filter(char::is_ascii_digit).count();
    digits >= MIN_PHONE_DIGITS && phone_pattern().is_match(phone)
}

pub fn is_valid_email(email: &str) -> bool {
    email_pattern().is_match(email.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> BookingForm {
        BookingForm {
            patient_name: "Ana Souza".into(),
            phone: "(555) 123-4567".into(),
            email: "ana@example.com".into(),
            consultation_type: ConsultationType::Video,
            notes: String::new(),
        }
    }

    #[test]
    fn complete_form_passes() {
        assert_eq!(form().validate(), Ok(()));
    }

    #[test]
    fn blank_name_is_rejected_first() {
        let mut f = form();
        f.patient_name = "   ".into();
        f.email = "broken".into();
        let err = f.validate().unwrap_err();
        assert_eq!(err, ValidationError::MissingName);
        assert_eq!(err.to_string(), "Please enter patient name.");
    }

    #[test]
    fn phone_needs_ten_digits() {
        assert!(is_valid_phone("+55 11 98765-4321"));
        assert!(is_valid_phone("5551234567"));
        assert!(!is_valid_phone("555-1234"));
        assert!(!is_valid_phone("(555) ---- ----"));
        assert!(!is_valid_phone("555123456x7"));
    }

    #[test]
    fn email_shape_is_checked() {
        assert!(is_valid_email("a.b@clinic.co"));
        assert!(!is_valid_email("a.b@clinic"));
        assert!(!is_valid_email("a b@clinic.co"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn trimmed_strips_whitespace() {
        let mut f = form();
        f.patient_name = "  Ana  ".into();
        f.notes = " first visit ".into();
        let t = f.trimmed();
        assert_eq!(t.patient_name, "Ana");
        assert_eq!(t.notes, "first visit");
    }
}
