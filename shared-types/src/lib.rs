use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Envelope used by every backend endpoint: `{ "data": ... }`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ApiResponse<T> {
    pub data: T,
}

/// A single bookable time of day. `time` is shown exactly as the backend sends it.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Slot {
    pub time: String,
    pub available: bool,
}

/// Response of `GET /bookings/available-slots`.
///
/// `data` is the legacy list of open times, `all_slots` carries every slot
/// with its availability flag.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct AvailableSlotsResponse {
    #[serde(default)]
    pub data: Vec<String>,
    #[serde(default)]
    pub all_slots: Vec<Slot>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct DayAvailability {
    pub has_slots: bool,
    #[serde(default)]
    pub slots_count: u32,
}

/// Per-day aggregate keyed by local calendar date (`YYYY-MM-DD`).
pub type DateAvailability = BTreeMap<String, DayAvailability>;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    #[default]
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
            BookingStatus::Completed => "completed",
        }
    }

    /// Cancelled and completed bookings accept no further transitions.
    pub fn is_final(&self) -> bool {
        matches!(self, BookingStatus::Cancelled | BookingStatus::Completed)
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ConsultationType {
    #[default]
    InPerson,
    Video,
    Phone,
    #[serde(other)]
    Other,
}

impl ConsultationType {
    pub const SELECTABLE: [ConsultationType; 3] = [
        ConsultationType::InPerson,
        ConsultationType::Video,
        ConsultationType::Phone,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ConsultationType::InPerson => "in-person",
            ConsultationType::Video => "video",
            ConsultationType::Phone => "phone",
            ConsultationType::Other => "other",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ConsultationType::InPerson => "In-person visit",
            ConsultationType::Video => "Video consultation",
            ConsultationType::Phone => "Phone consultation",
            ConsultationType::Other => "Consultation",
        }
    }

    pub fn from_value(value: &str) -> Self {
        match value {
            "in-person" => ConsultationType::InPerson,
            "video" => ConsultationType::Video,
            "phone" => ConsultationType::Phone,
            _ => ConsultationType::Other,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DoctorSummary {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub specialty: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub location: Option<String>,
    pub doctor: DoctorSummary,
    #[serde(default)]
    pub consultation_types: Vec<ConsultationType>,
}

/// The `listing` field of a booking is either a bare id or the populated listing.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum ListingRef {
    Id(String),
    Populated {
        #[serde(rename = "_id")]
        id: String,
        title: String,
    },
}

impl ListingRef {
    pub fn id(&self) -> &str {
        match self {
            ListingRef::Id(id) => id,
            ListingRef::Populated { id, .. } => id,
        }
    }

    pub fn title(&self) -> Option<&str> {
        match self {
            ListingRef::Id(_) => None,
            ListingRef::Populated { title, .. } => Some(title),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    #[serde(rename = "_id")]
    pub id: String,
    pub doctor_id: String,
    pub listing: ListingRef,
    pub date: String,
    pub time: String,
    pub consultation_type: ConsultationType,
    pub patient_name: String,
    pub phone: String,
    pub email: String,
    #[serde(default)]
    pub notes: String,
    pub status: BookingStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
}

/// Payload of `POST /bookings`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewBooking {
    pub doctor_id: String,
    pub listing: String,
    pub date: String,
    pub time: String,
    pub consultation_type: ConsultationType,
    pub patient_name: String,
    pub phone: String,
    pub email: String,
    pub notes: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct StatusUpdate {
    pub status: BookingStatus,
}

/// Optional filters for `GET /bookings/doctor/:doctorId`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
pub struct BookingFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<BookingStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

/// Error body returned by the backend on non-2xx responses.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_availability_map() {
        let body = r#"{"data":{"2024-03-11":{"hasSlots":true,"slotsCount":3},"2024-03-12":{"hasSlots":false}}}"#;
        let parsed: ApiResponse<DateAvailability> = serde_json::from_str(body).unwrap();

        assert_eq!(
            parsed.data["2024-03-11"],
            DayAvailability {
                has_slots: true,
                slots_count: 3
            }
        );
        assert!(!parsed.data["2024-03-12"].has_slots);
        assert_eq!(parsed.data["2024-03-12"].slots_count, 0);
    }

    #[test]
    fn decodes_booking_with_populated_listing() {
        let body = r#"{
            "_id": "b1",
            "doctorId": "d1",
            "listing": {"_id": "l1", "title": "General practice"},
            "date": "2024-03-11T00:00:00.000Z",
            "time": "09:30",
            "consultationType": "video",
            "patientName": "Ana",
            "phone": "5551234567",
            "email": "ana@example.com",
            "status": "confirmed"
        }"#;
        let booking: Booking = serde_json::from_str(body).unwrap();

        assert_eq!(booking.listing.id(), "l1");
        assert_eq!(booking.listing.title(), Some("General practice"));
        assert_eq!(booking.consultation_type, ConsultationType::Video);
        assert_eq!(booking.status, BookingStatus::Confirmed);
        assert_eq!(booking.notes, "");
        assert_eq!(booking.amount, None);
    }

    #[test]
    fn unknown_consultation_type_maps_to_other() {
        let parsed: ConsultationType = serde_json::from_str(r#""home-visit""#).unwrap();
        assert_eq!(parsed, ConsultationType::Other);
    }

    #[test]
    fn new_booking_serializes_camel_case_without_missing_amount() {
        let booking = NewBooking {
            doctor_id: "d1".into(),
            listing: "l1".into(),
            date: "2024-03-11".into(),
            time: "09:30".into(),
            consultation_type: ConsultationType::InPerson,
            patient_name: "Ana".into(),
            phone: "5551234567".into(),
            email: "ana@example.com".into(),
            notes: String::new(),
            amount: None,
        };
        let value = serde_json::to_value(&booking).unwrap();

        assert_eq!(value["doctorId"], "d1");
        assert_eq!(value["consultationType"], "in-person");
        assert!(value.get("amount").is_none());
    }
}
