//! Async store operations. Each one marks its tracker as loading, awaits the
//! backend and commits the outcome, mirroring pending/fulfilled/rejected.

use shared_types::{Booking, BookingFilter, BookingStatus, DateAvailability, NewBooking};

use crate::api::{AvailabilityQuery, BookingApi, SlotQuery};
use crate::error::ApiError;
use crate::store::{BookingStore, RequestId, StateHandle};

pub const SLOTS_FALLBACK: &str = "Failed to fetch available slots";
pub const AVAILABILITY_FALLBACK: &str = "Failed to check date availability";
pub const CREATE_FALLBACK: &str = "Failed to create booking";
pub const CANCEL_FALLBACK: &str = "Failed to cancel booking";
pub const STATUS_FALLBACK: &str = "Failed to update booking status";
pub const LIST_FALLBACK: &str = "Failed to fetch bookings";

pub async fn get_available_slots<A, S>(api: &A, store: &S, query: SlotQuery) -> Result<(), ApiError>
where
    A: BookingApi + ?Sized,
    S: StateHandle<BookingStore>,
{
    let Some(id) = store.dispatch(|s| s.slots.begin()) else {
        return Ok(());
    };

    match api.available_slots(&query).await {
        Ok(response) => {
            if store.dispatch(|s| s.fulfill_slots(id, response)) != Some(true) {
                leptos::logging::log!("dropping stale slots for {}", query.date);
            }
            Ok(())
        }
        Err(err) => {
            let message = err.display_message(SLOTS_FALLBACK);
            leptos::logging::error!("available slots for {}: {}", query.date, err);
            store.dispatch(|s| s.reject_slots(id, message));
            Err(err)
        }
    }
}

pub async fn check_date_availability<A, S>(
    api: &A,
    store: &S,
    query: AvailabilityQuery,
) -> Result<(), ApiError>
where
    A: BookingApi + ?Sized,
    S: StateHandle<BookingStore>,
{
    let Some(id) = store.dispatch(|s| s.availability.begin()) else {
        return Ok(());
    };

    match api.check_availability(&query).await {
        Ok(availability) => {
            commit_availability(store, id, availability, &query);
            Ok(())
        }
        Err(err) => {
            let message = err.display_message(AVAILABILITY_FALLBACK);
            leptos::logging::error!(
                "availability {}..{}: {}",
                query.start_date,
                query.end_date,
                err
            );
            store.dispatch(|s| s.reject_availability(id, message));
            Err(err)
        }
    }
}

fn commit_availability<S: StateHandle<BookingStore>>(
    store: &S,
    id: RequestId,
    availability: DateAvailability,
    query: &AvailabilityQuery,
) {
    if store.dispatch(|s| s.fulfill_availability(id, availability)) != Some(true) {
        leptos::logging::log!(
            "dropping stale availability for {}..{}",
            query.start_date,
            query.end_date
        );
    }
}

pub async fn create_booking<A, S>(api: &A, store: &S, booking: NewBooking) -> Result<Booking, ApiError>
where
    A: BookingApi + ?Sized,
    S: StateHandle<BookingStore>,
{
    let id = store.dispatch(|s| s.create.begin());

    match api.create_booking(&booking).await {
        Ok(created) => {
            if let Some(id) = id {
                store.dispatch(|s| s.fulfill_create(id, created.clone()));
            }
            Ok(created)
        }
        Err(err) => {
            leptos::logging::error!("create booking: {}", err);
            if let Some(id) = id {
                let message = err.display_message(CREATE_FALLBACK);
                store.dispatch(|s| s.reject_create(id, message));
            }
            Err(err)
        }
    }
}

pub async fn cancel_booking<A, S>(api: &A, store: &S, booking_id: &str) -> Result<Booking, ApiError>
where
    A: BookingApi + ?Sized,
    S: StateHandle<BookingStore>,
{
    let id = store.dispatch(|s| s.update.begin());
    let result = api.cancel_booking(booking_id).await;
    commit_update(store, id, result, CANCEL_FALLBACK)
}

pub async fn update_booking_status<A, S>(
    api: &A,
    store: &S,
    booking_id: &str,
    status: BookingStatus,
) -> Result<Booking, ApiError>
where
    A: BookingApi + ?Sized,
    S: StateHandle<BookingStore>,
{
    let id = store.dispatch(|s| s.update.begin());
    let result = api.update_booking_status(booking_id, status).await;
    commit_update(store, id, result, STATUS_FALLBACK)
}

fn commit_update<S: StateHandle<BookingStore>>(
    store: &S,
    id: Option<RequestId>,
    result: Result<Booking, ApiError>,
    fallback: &str,
) -> Result<Booking, ApiError> {
    match (&result, id) {
        (Ok(booking), Some(id)) => {
            store.dispatch(|s| s.fulfill_update(id, booking));
        }
        (Err(err), Some(id)) => {
            leptos::logging::error!("{}: {}", fallback, err);
            let message = err.display_message(fallback);
            store.dispatch(|s| s.reject_update(id, message));
        }
        _ => {}
    }
    result
}

pub async fn fetch_user_bookings<A, S>(api: &A, store: &S) -> Result<(), ApiError>
where
    A: BookingApi + ?Sized,
    S: StateHandle<BookingStore>,
{
    let Some(id) = store.dispatch(|s| s.bookings_list.begin()) else {
        return Ok(());
    };

    match api.user_bookings().await {
        Ok(bookings) => {
            store.dispatch(|s| s.fulfill_user_bookings(id, bookings));
            Ok(())
        }
        Err(err) => {
            leptos::logging::error!("user bookings: {}", err);
            let message = err.display_message(LIST_FALLBACK);
            store.dispatch(|s| s.reject_bookings_list(id, message));
            Err(err)
        }
    }
}

pub async fn fetch_doctor_bookings<A, S>(
    api: &A,
    store: &S,
    doctor_id: &str,
    filter: BookingFilter,
) -> Result<(), ApiError>
where
    A: BookingApi + ?Sized,
    S: StateHandle<BookingStore>,
{
    let Some(id) = store.dispatch(|s| s.bookings_list.begin()) else {
        return Ok(());
    };

    match api.doctor_bookings(doctor_id, &filter).await {
        Ok(bookings) => {
            store.dispatch(|s| s.fulfill_provider_bookings(id, bookings));
            Ok(())
        }
        Err(err) => {
            leptos::logging::error!("bookings for doctor {}: {}", doctor_id, err);
            let message = err.display_message(LIST_FALLBACK);
            store.dispatch(|s| s.reject_bookings_list(id, message));
            Err(err)
        }
    }
}
