//! Client-side booking state.
//!
//! Each async operation owns a [`RequestTracker`]. A request is started with
//! `begin`, which hands out a [`RequestId`]; the response is only applied if
//! that id is still the latest one for the tracker, so a slow response for an
//! old date or month cannot overwrite newer data.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use shared_types::{
    AvailableSlotsResponse, Booking, BookingStatus, DateAvailability, Slot,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    Idle,
    Loading,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(u64);

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RequestTracker {
    pub status: Status,
    pub error: Option<String>,
    latest: u64,
}

impl RequestTracker {
    pub fn begin(&mut self) -> RequestId {
        self.latest += 1;
        self.status = Status::Loading;
        self.error = None;
        RequestId(self.latest)
    }

    pub fn is_current(&self, id: RequestId) -> bool {
        id.0 == self.latest
    }

    pub fn is_loading(&self) -> bool {
        self.status == Status::Loading
    }

    /// Marks the request fulfilled. Returns false for a superseded request.
    fn succeed(&mut self, id: RequestId) -> bool {
        if !self.is_current(id) {
            return false;
        }
        self.status = Status::Succeeded;
        self.error = None;
        true
    }

    fn fail(&mut self, id: RequestId, message: String) -> bool {
        if !self.is_current(id) {
            return false;
        }
        self.status = Status::Failed;
        self.error = Some(message);
        true
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct BookingStore {
    /// Legacy list of open times for the selected date.
    pub available_slots: Vec<String>,
    pub all_slots: Vec<Slot>,
    pub date_availability: DateAvailability,
    pub bookings: Vec<Booking>,
    pub user_bookings: Vec<Booking>,
    pub provider_bookings: Vec<Booking>,
    pub current_booking: Option<Booking>,

    pub slots: RequestTracker,
    pub availability: RequestTracker,
    pub create: RequestTracker,
    pub bookings_list: RequestTracker,
    pub update: RequestTracker,
}

impl BookingStore {
    pub fn fulfill_slots(&mut self, id: RequestId, response: AvailableSlotsResponse) -> bool {
        if !self.slots.succeed(id) {
            return false;
        }
        self.available_slots = response.data;
        self.all_slots = response.all_slots;
        true
    }

    /// Prior slots stay on screen until explicitly cleared.
    pub fn reject_slots(&mut self, id: RequestId, message: String) -> bool {
        self.slots.fail(id, message)
    }

    pub fn clear_slots(&mut self) {
        self.available_slots.clear();
        self.all_slots.clear();
    }

    /// Replaces the whole map; months are never merged.
    pub fn fulfill_availability(&mut self, id: RequestId, availability: DateAvailability) -> bool {
        if !self.availability.succeed(id) {
            return false;
        }
        self.date_availability = availability;
        true
    }

    pub fn reject_availability(&mut self, id: RequestId, message: String) -> bool {
        self.availability.fail(id, message)
    }

    pub fn clear_date_availability(&mut self) {
        self.date_availability.clear();
    }

    /// New bookings go to the front of the generic and user lists. Slots and
    /// availability are left alone until the next fetch.
    ///
    /// The booking exists on the server either way, so it is always added;
    /// the returned flag only says whether the tracker followed this request.
    pub fn fulfill_create(&mut self, id: RequestId, booking: Booking) -> bool {
        let current = self.create.succeed(id);
        self.bookings.insert(0, booking.clone());
        self.user_bookings.insert(0, booking.clone());
        if current {
            self.current_booking = Some(booking);
        }
        current
    }

    pub fn reject_create(&mut self, id: RequestId, message: String) -> bool {
        self.create.fail(id, message)
    }

    pub fn fulfill_user_bookings(&mut self, id: RequestId, bookings: Vec<Booking>) -> bool {
        if !self.bookings_list.succeed(id) {
            return false;
        }
        self.user_bookings = bookings;
        true
    }

    pub fn fulfill_provider_bookings(&mut self, id: RequestId, bookings: Vec<Booking>) -> bool {
        if !self.bookings_list.succeed(id) {
            return false;
        }
        self.provider_bookings = bookings;
        true
    }

    pub fn reject_bookings_list(&mut self, id: RequestId, message: String) -> bool {
        self.bookings_list.fail(id, message)
    }

    /// Applies a status change returned by cancel or status update. Updates
    /// for different bookings may overlap, so a confirmed change is always
    /// patched in; only the tracker status is limited to the latest request.
    pub fn fulfill_update(&mut self, id: RequestId, booking: &Booking) -> bool {
        let current = self.update.succeed(id);
        self.patch_status(&booking.id, booking.status);
        current
    }

    pub fn reject_update(&mut self, id: RequestId, message: String) -> bool {
        self.update.fail(id, message)
    }

    /// Patches the booking in every list that holds it. Each list is searched
    /// on its own; a list without the booking is left untouched.
    pub fn patch_status(&mut self, booking_id: &str, status: BookingStatus) {
        for list in [
            &mut self.bookings,
            &mut self.user_bookings,
            &mut self.provider_bookings,
        ] {
            if let Some(index) = list.iter().position(|b| b.id == booking_id) {
                list[index].status = status;
            }
        }
        if let Some(current) = self
            .current_booking
            .as_mut()
            .filter(|b| b.id == booking_id)
        {
            current.status = status;
        }
    }

    pub fn clear_errors(&mut self) {
        for tracker in [
            &mut self.slots,
            &mut self.availability,
            &mut self.create,
            &mut self.bookings_list,
            &mut self.update,
        ] {
            tracker.error = None;
        }
    }
}

/// Read/write access to a piece of state, whether it lives in a reactive
/// signal (in the browser) or a plain cell (in tests).
pub trait StateHandle<T>: Clone {
    fn dispatch<R>(&self, f: impl FnOnce(&mut T) -> R) -> Option<R>;

    fn select<R>(&self, f: impl FnOnce(&T) -> R) -> Option<R>;
}

impl<T: Send + Sync + 'static> StateHandle<T> for RwSignal<T> {
    fn dispatch<R>(&self, f: impl FnOnce(&mut T) -> R) -> Option<R> {
        self.try_update(f)
    }

    fn select<R>(&self, f: impl FnOnce(&T) -> R) -> Option<R> {
        self.try_with_untracked(f)
    }
}

impl<T> StateHandle<T> for Rc<RefCell<T>> {
    fn dispatch<R>(&self, f: impl FnOnce(&mut T) -> R) -> Option<R> {
        Some(f(&mut self.borrow_mut()))
    }

    fn select<R>(&self, f: impl FnOnce(&T) -> R) -> Option<R> {
        Some(f(&self.borrow()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::{ConsultationType, DayAvailability, ListingRef};

    fn booking(id: &str, status: BookingStatus) -> Booking {
        Booking {
            id: id.to_string(),
            doctor_id: "d1".into(),
            listing: ListingRef::Id("l1".into()),
            date: "2024-03-11T00:00:00.000Z".into(),
            time: "09:00".into(),
            consultation_type: ConsultationType::InPerson,
            patient_name: "Ana".into(),
            phone: "5551234567".into(),
            email: "ana@example.com".into(),
            notes: String::new(),
            status,
            amount: None,
        }
    }

    fn slots(times: &[&str]) -> AvailableSlotsResponse {
        AvailableSlotsResponse {
            data: times.iter().map(|t| t.to_string()).collect(),
            all_slots: times
                .iter()
                .map(|t| Slot {
                    time: t.to_string(),
                    available: true,
                })
                .collect(),
        }
    }

    #[test]
    fn slot_failure_keeps_previous_slots() {
        let mut store = BookingStore::default();
        let first = store.slots.begin();
        assert!(store.slots.is_loading());
        assert!(store.fulfill_slots(first, slots(&["09:00", "09:30"])));

        let second = store.slots.begin();
        assert!(store.reject_slots(second, "Failed to fetch available slots".into()));

        assert_eq!(store.slots.status, Status::Failed);
        assert_eq!(store.available_slots, vec!["09:00", "09:30"]);
        assert_eq!(store.all_slots.len(), 2);
    }

    #[test]
    fn stale_slot_response_is_dropped() {
        let mut store = BookingStore::default();
        let old = store.slots.begin();
        let new = store.slots.begin();

        assert!(store.fulfill_slots(new, slots(&["14:00"])));
        assert!(!store.fulfill_slots(old, slots(&["09:00"])));
        assert!(!store.reject_slots(old, "late failure".into()));

        assert_eq!(store.available_slots, vec!["14:00"]);
        assert_eq!(store.slots.status, Status::Succeeded);
        assert_eq!(store.slots.error, None);
    }

    #[test]
    fn availability_is_replaced_not_merged() {
        let mut store = BookingStore::default();
        let march = store.availability.begin();
        store.fulfill_availability(
            march,
            [(
                "2024-03-11".to_string(),
                DayAvailability {
                    has_slots: true,
                    slots_count: 3,
                },
            )]
            .into(),
        );

        let april = store.availability.begin();
        store.fulfill_availability(
            april,
            [(
                "2024-04-08".to_string(),
                DayAvailability {
                    has_slots: true,
                    slots_count: 1,
                },
            )]
            .into(),
        );

        assert_eq!(store.date_availability.len(), 1);
        assert!(store.date_availability.contains_key("2024-04-08"));
    }

    #[test]
    fn created_booking_is_prepended_without_touching_slots() {
        let mut store = BookingStore::default();
        let load = store.slots.begin();
        store.fulfill_slots(load, slots(&["09:00"]));
        store.user_bookings.push(booking("old", BookingStatus::Confirmed));

        let id = store.create.begin();
        assert!(store.fulfill_create(id, booking("new", BookingStatus::Pending)));

        assert_eq!(store.bookings[0].id, "new");
        assert_eq!(store.user_bookings[0].id, "new");
        assert_eq!(store.user_bookings.len(), 2);
        assert_eq!(store.available_slots, vec!["09:00"]);
        assert_eq!(store.current_booking.as_ref().map(|b| b.id.as_str()), Some("new"));
    }

    #[test]
    fn status_patch_reaches_every_list_holding_the_booking() {
        let mut store = BookingStore {
            bookings: vec![booking("a", BookingStatus::Pending)],
            user_bookings: vec![
                booking("b", BookingStatus::Pending),
                booking("a", BookingStatus::Pending),
            ],
            provider_bookings: vec![booking("c", BookingStatus::Confirmed)],
            ..Default::default()
        };

        let id = store.update.begin();
        assert!(store.fulfill_update(id, &booking("a", BookingStatus::Cancelled)));

        assert_eq!(store.bookings[0].status, BookingStatus::Cancelled);
        assert_eq!(store.user_bookings[1].status, BookingStatus::Cancelled);
        assert_eq!(store.user_bookings[0].status, BookingStatus::Pending);
        assert_eq!(store.provider_bookings[0].status, BookingStatus::Confirmed);
    }

    #[test]
    fn overlapping_updates_both_reach_the_lists() {
        let mut store = BookingStore {
            user_bookings: vec![
                booking("a", BookingStatus::Pending),
                booking("b", BookingStatus::Pending),
            ],
            ..Default::default()
        };

        let first = store.update.begin();
        let second = store.update.begin();
        assert!(store.fulfill_update(second, &booking("b", BookingStatus::Cancelled)));
        assert!(!store.fulfill_update(first, &booking("a", BookingStatus::Cancelled)));

        assert_eq!(store.user_bookings[0].status, BookingStatus::Cancelled);
        assert_eq!(store.user_bookings[1].status, BookingStatus::Cancelled);
        assert_eq!(store.update.status, Status::Succeeded);
    }

    #[test]
    fn late_create_is_still_listed() {
        let mut store = BookingStore::default();
        let first = store.create.begin();
        let second = store.create.begin();
        assert!(store.reject_create(second, "Time slot already booked".into()));

        assert!(!store.fulfill_create(first, booking("late", BookingStatus::Pending)));

        assert_eq!(store.user_bookings[0].id, "late");
        assert_eq!(store.bookings[0].id, "late");
        assert_eq!(store.current_booking, None);
        assert_eq!(store.create.status, Status::Failed);
    }

    #[test]
    fn clear_slots_empties_both_slot_lists() {
        let mut store = BookingStore::default();
        let id = store.slots.begin();
        store.fulfill_slots(id, slots(&["09:00", "09:30"]));

        store.clear_slots();

        assert!(store.available_slots.is_empty());
        assert!(store.all_slots.is_empty());
    }

    #[test]
    fn clear_errors_resets_every_tracker() {
        let mut store = BookingStore::default();
        let a = store.slots.begin();
        let b = store.create.begin();
        store.reject_slots(a, "x".into());
        store.reject_create(b, "y".into());

        store.clear_errors();

        assert_eq!(store.slots.error, None);
        assert_eq!(store.create.error, None);
        assert_eq!(store.slots.status, Status::Failed);
    }

    #[test]
    fn cell_handle_reads_and_writes() {
        let handle = Rc::new(RefCell::new(BookingStore::default()));
        let id = handle.dispatch(|s| s.slots.begin()).unwrap();
        handle.dispatch(|s| s.fulfill_slots(id, slots(&["10:00"])));
        assert_eq!(
            handle.select(|s| s.available_slots.clone()),
            Some(vec!["10:00".to_string()])
        );
    }
}
