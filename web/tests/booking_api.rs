use std::sync::Arc;

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use booking_web::api::{AvailabilityQuery, BookingApi, BookingsClient, SlotQuery, StaticToken};
use booking_web::error::{ApiError, BookingFailure};
use shared_types::{BookingFilter, BookingStatus};

fn client(server: &MockServer, token: Option<&str>) -> BookingsClient {
    BookingsClient::new(
        server.uri(),
        Arc::new(StaticToken(token.map(str::to_string))),
    )
}

fn booking_json(id: &str, status: &str) -> serde_json::Value {
    json!({
        "_id": id,
        "doctorId": "doc-1",
        "listing": "listing-1",
        "date": "2030-03-11T00:00:00.000Z",
        "time": "09:30",
        "consultationType": "in-person",
        "patientName": "Ana Silva",
        "phone": "5551234567",
        "email": "ana@example.com",
        "status": status,
        "amount": 120.0
    })
}

#[tokio::test]
async fn available_slots_sends_bearer_token_and_camel_case_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/bookings/available-slots"))
        .and(header("Authorization", "Bearer secret-token"))
        .and(query_param("listingId", "listing-1"))
        .and(query_param("doctorId", "doc-1"))
        .and(query_param("date", "2030-03-11"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": ["09:00"],
            "allSlots": [
                {"time": "09:00", "available": true},
                {"time": "09:30", "available": false}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let api = client(&server, Some("secret-token"));
    let response = api
        .available_slots(&SlotQuery {
            listing_id: "listing-1".into(),
            doctor_id: "doc-1".into(),
            date: "2030-03-11".into(),
        })
        .await
        .unwrap();

    assert_eq!(response.data, vec!["09:00".to_string()]);
    assert_eq!(response.all_slots.len(), 2);
    assert!(!response.all_slots[1].available);
}

#[tokio::test]
async fn check_availability_unwraps_data_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/bookings/check-availability"))
        .and(query_param("doctorId", "doc-1"))
        .and(query_param("startDate", "2030-02-22"))
        .and(query_param("endDate", "2030-04-07"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "2030-03-11": {"hasSlots": true, "slotsCount": 4},
                "2030-03-12": {"hasSlots": false, "slotsCount": 0}
            }
        })))
        .mount(&server)
        .await;

    let availability = client(&server, None)
        .check_availability(&AvailabilityQuery {
            doctor_id: "doc-1".into(),
            start_date: "2030-02-22".into(),
            end_date: "2030-04-07".into(),
        })
        .await
        .unwrap();

    assert_eq!(availability.len(), 2);
    assert_eq!(availability["2030-03-11"].slots_count, 4);
    assert!(!availability["2030-03-12"].has_slots);
}

#[tokio::test]
async fn backend_error_body_keeps_message_and_code() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/bookings"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "message": "Time slot already booked",
            "code": "SLOT_ALREADY_BOOKED"
        })))
        .mount(&server)
        .await;

    let booking = shared_types::NewBooking {
        doctor_id: "doc-1".into(),
        listing: "listing-1".into(),
        date: "2030-03-11".into(),
        time: "09:30".into(),
        consultation_type: shared_types::ConsultationType::Video,
        patient_name: "Ana Silva".into(),
        phone: "5551234567".into(),
        email: "ana@example.com".into(),
        notes: String::new(),
        amount: None,
    };
    let err = client(&server, Some("t")).create_booking(&booking).await.unwrap_err();

    assert_eq!(
        err,
        ApiError::Backend {
            status: 409,
            message: Some("Time slot already booked".into()),
            code: Some("SLOT_ALREADY_BOOKED".into()),
        }
    );
    assert_eq!(BookingFailure::from_api_error(&err), BookingFailure::SlotTaken);
}

#[tokio::test]
async fn error_without_json_body_falls_back_to_caller_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/bookings/user"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let err = client(&server, None).user_bookings().await.unwrap_err();

    assert_eq!(err.code(), None);
    assert_eq!(err.display_message("Failed to fetch bookings"), "Failed to fetch bookings");
}

#[tokio::test]
async fn status_update_patches_with_json_body() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/bookings/b-1/status"))
        .and(body_json(json!({"status": "confirmed"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"data": booking_json("b-1", "confirmed")})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let updated = client(&server, Some("t"))
        .update_booking_status("b-1", BookingStatus::Confirmed)
        .await
        .unwrap();

    assert_eq!(updated.status, BookingStatus::Confirmed);
    assert_eq!(updated.amount, Some(120.0));
}

#[tokio::test]
async fn doctor_bookings_forwards_filter_as_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/bookings/doctor/doc-1"))
        .and(query_param("status", "pending"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [booking_json("b-1", "pending"), booking_json("b-2", "pending")]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let bookings = client(&server, Some("t"))
        .doctor_bookings(
            "doc-1",
            &BookingFilter {
                status: Some(BookingStatus::Pending),
                date: None,
            },
        )
        .await
        .unwrap();

    assert_eq!(bookings.len(), 2);
    assert_eq!(bookings[1].id, "b-2");
}

#[tokio::test]
async fn fetch_listing_reads_doctor_and_consultation_types() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/listings/listing-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "_id": "listing-1",
                "title": "General consultation",
                "description": "Routine check-ups.",
                "price": 80.0,
                "doctor": {"_id": "doc-1", "name": "Dr. Rivera", "specialty": "Family medicine"},
                "consultationTypes": ["in-person", "video"]
            }
        })))
        .mount(&server)
        .await;

    let listing = client(&server, None).fetch_listing("listing-1").await.unwrap();

    assert_eq!(listing.doctor.id, "doc-1");
    assert_eq!(listing.consultation_types.len(), 2);
    assert_eq!(listing.location, None);
}

#[tokio::test]
async fn unreachable_backend_is_a_network_error() {
    // Nothing listens on the discard port.
    let api = BookingsClient::new("http://127.0.0.1:9", Arc::new(StaticToken(None)));
    let err = api.user_bookings().await.unwrap_err();

    assert!(matches!(err, ApiError::Network(_)));
}

#[tokio::test]
async fn missing_token_sends_no_authorization_header() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/bookings/user"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .expect(1)
        .mount(&server)
        .await;

    let bookings = client(&server, None).user_bookings().await.unwrap();
    assert!(bookings.is_empty());

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(!requests[0].headers.contains_key("authorization"));
}
