//! Page logic for the doctor profile: which fetch fires on which
//! interaction, the booking modal, and what the user is told afterwards.

use std::sync::Arc;

use chrono::NaiveDate;
use shared_types::{Booking, Listing, NewBooking};

use crate::actions;
use crate::api::{AvailabilityQuery, BookingApi, SlotQuery};
use crate::calendar::{date_key, MonthView};
use crate::error::BookingFailure;
use crate::format::long_date;
use crate::store::{BookingStore, StateHandle, Status};
use crate::validation::{BookingForm, ValidationError};

pub const PROFILE_FALLBACK: &str = "Failed to load profile";
pub const BOOKING_CREATED: &str = "Booking created successfully!";
pub const PICK_DATE_AND_TIME: &str = "Please select a date and time slot first.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub message: String,
}

/// What the confirmation modal shows after a booking is created.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingSummary {
    pub reference: String,
    pub doctor_name: String,
    pub date_label: String,
    pub time: String,
    pub consultation: String,
    pub patient_name: String,
    pub email: String,
    pub amount: Option<f64>,
}

impl BookingSummary {
    fn new(booking: &Booking, listing: &Listing, date: NaiveDate) -> Self {
        Self {
            reference: booking.id.clone(),
            doctor_name: listing.doctor.name.clone(),
            date_label: long_date(date),
            time: booking.time.clone(),
            consultation: booking.consultation_type.label().to_string(),
            patient_name: booking.patient_name.clone(),
            email: booking.email.clone(),
            amount: booking.amount,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProfilePage {
    pub listing: Option<Listing>,
    pub listing_status: Status,
    pub listing_error: Option<String>,
    pub selected_date: NaiveDate,
    pub selected_time: Option<String>,
    pub displayed_month: Option<MonthView>,
    pub booking_modal_open: bool,
    pub submitting: bool,
    pub confirmation: Option<BookingSummary>,
    pub toasts: Vec<Toast>,
    next_toast: u64,
}

impl ProfilePage {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            listing: None,
            listing_status: Status::Idle,
            listing_error: None,
            selected_date: today,
            selected_time: None,
            displayed_month: None,
            booking_modal_open: false,
            submitting: false,
            confirmation: None,
            toasts: Vec::new(),
            next_toast: 0,
        }
    }

    pub fn push_toast(&mut self, kind: ToastKind, message: impl Into<String>) -> u64 {
        self.next_toast += 1;
        self.toasts.push(Toast {
            id: self.next_toast,
            kind,
            message: message.into(),
        });
        self.next_toast
    }

    pub fn dismiss_toast(&mut self, id: u64) {
        self.toasts.retain(|toast| toast.id != id);
    }

    fn booking_target(&self) -> Option<(String, String)> {
        self.listing
            .as_ref()
            .map(|listing| (listing.id.clone(), listing.doctor.id.clone()))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Invalid(ValidationError),
    NotReady,
    Created(Booking),
    Failed(BookingFailure),
}

pub struct BookingOrchestrator<A: ?Sized, S, P> {
    api: Arc<A>,
    store: S,
    page: P,
}

impl<A: ?Sized, S: Clone, P: Clone> Clone for BookingOrchestrator<A, S, P> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
            store: self.store.clone(),
            page: self.page.clone(),
        }
    }
}

impl<A, S, P> BookingOrchestrator<A, S, P>
where
    A: BookingApi + ?Sized,
    S: StateHandle<BookingStore>,
    P: StateHandle<ProfilePage>,
{
    pub fn new(api: Arc<A>, store: S, page: P) -> Self {
        Self { api, store, page }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    fn toast(&self, kind: ToastKind, message: impl Into<String>) {
        let message = message.into();
        self.page.dispatch(|p| p.push_toast(kind, message));
    }

    /// Fetches the listing, then slots for the selected date and
    /// availability for the displayed month.
    pub async fn load_profile(&self, listing_id: &str) {
        // Slots from a previously shown profile must not be offered here.
        self.store.dispatch(|s| s.clear_slots());
        self.page.dispatch(|p| {
            p.listing_status = Status::Loading;
            p.listing_error = None;
            p.selected_time = None;
        });

        match self.api.fetch_listing(listing_id).await {
            Ok(listing) => {
                self.page.dispatch(|p| {
                    p.listing = Some(listing);
                    p.listing_status = Status::Succeeded;
                });
                self.refresh().await;
            }
            Err(err) => {
                leptos::logging::error!("listing {}: {}", listing_id, err);
                let message = err.display_message(PROFILE_FALLBACK);
                self.page.dispatch(|p| {
                    p.listing_status = Status::Failed;
                    p.listing_error = Some(message.clone());
                    p.push_toast(ToastKind::Error, message);
                });
            }
        }
    }

    async fn refresh(&self) {
        let Some((date, month)) = self.page.select(|p| {
            let month = p
                .displayed_month
                .unwrap_or_else(|| MonthView::of(p.selected_date));
            (p.selected_date, month)
        }) else {
            return;
        };

        self.page.dispatch(|p| p.displayed_month = Some(month));
        self.fetch_slots(date).await;
        self.load_month(month).await;
    }

    /// Every selection refetches, including picking the same date again.
    pub async fn select_date(&self, date: NaiveDate) {
        self.page.dispatch(|p| {
            p.selected_date = date;
            p.selected_time = None;
        });
        self.fetch_slots(date).await;
    }

    async fn fetch_slots(&self, date: NaiveDate) {
        let Some((listing_id, doctor_id)) = self.page.select(|p| p.booking_target()).flatten()
        else {
            leptos::logging::log!("no listing loaded yet, skipping slot fetch");
            return;
        };

        let query = SlotQuery {
            listing_id,
            doctor_id,
            date: date_key(date),
        };
        if let Err(err) = actions::get_available_slots(&*self.api, &self.store, query).await {
            self.toast(
                ToastKind::Error,
                err.display_message(actions::SLOTS_FALLBACK),
            );
        }
    }

    /// Fetches availability when the displayed month actually changes.
    pub async fn change_month(&self, month: MonthView) {
        let changed = self
            .page
            .dispatch(|p| {
                if p.displayed_month == Some(month) {
                    false
                } else {
                    p.displayed_month = Some(month);
                    true
                }
            })
            .unwrap_or(false);

        if changed {
            self.load_month(month).await;
        }
    }

    async fn load_month(&self, month: MonthView) {
        // Old dots must not linger while the new month loads.
        self.store.dispatch(|s| s.clear_date_availability());

        let Some((_, doctor_id)) = self.page.select(|p| p.booking_target()).flatten() else {
            return;
        };

        let (start, end) = month.padded_range();
        let query = AvailabilityQuery {
            doctor_id,
            start_date: date_key(start),
            end_date: date_key(end),
        };
        if let Err(err) = actions::check_date_availability(&*self.api, &self.store, query).await {
            self.toast(
                ToastKind::Error,
                err.display_message(actions::AVAILABILITY_FALLBACK),
            );
        }
    }

    /// Opens the booking modal for an open slot. Returns false when the slot
    /// is not offered for the selected date.
    pub fn select_slot(&self, time: &str) -> bool {
        let open = self
            .store
            .select(|s| {
                s.all_slots
                    .iter()
                    .any(|slot| slot.time == time && slot.available)
                    || (s.all_slots.is_empty() && s.available_slots.iter().any(|t| t == time))
            })
            .unwrap_or(false);

        if open {
            self.page.dispatch(|p| {
                p.selected_time = Some(time.to_string());
                p.booking_modal_open = true;
            });
        }
        open
    }

    pub fn close_booking_modal(&self) {
        self.page.dispatch(|p| {
            p.booking_modal_open = false;
            p.submitting = false;
        });
    }

    pub fn dismiss_confirmation(&self) {
        self.page.dispatch(|p| {
            p.confirmation = None;
            p.selected_time = None;
        });
    }

    pub fn dismiss_toast(&self, id: u64) {
        self.page.dispatch(|p| p.dismiss_toast(id));
    }

    pub async fn submit_booking(&self, form: BookingForm) -> SubmitOutcome {
        if let Err(err) = form.validate() {
            self.toast(ToastKind::Error, err.to_string());
            return SubmitOutcome::Invalid(err);
        }

        let context = self
            .page
            .select(|p| {
                Some((
                    p.listing.clone()?,
                    p.selected_date,
                    p.selected_time.clone()?,
                ))
            })
            .flatten();
        let Some((listing, date, time)) = context else {
            self.toast(ToastKind::Error, PICK_DATE_AND_TIME);
            return SubmitOutcome::NotReady;
        };

        let form = form.trimmed();
        let booking = NewBooking {
            doctor_id: listing.doctor.id.clone(),
            listing: listing.id.clone(),
            date: date_key(date),
            time,
            consultation_type: form.consultation_type,
            patient_name: form.patient_name,
            phone: form.phone,
            email: form.email,
            notes: form.notes,
            amount: listing.price,
        };

        self.page.dispatch(|p| p.submitting = true);

        match actions::create_booking(&*self.api, &self.store, booking).await {
            Ok(created) => {
                let summary = BookingSummary::new(&created, &listing, date);
                self.page.dispatch(|p| {
                    p.submitting = false;
                    p.booking_modal_open = false;
                    p.confirmation = Some(summary);
                    p.push_toast(ToastKind::Success, BOOKING_CREATED);
                });
                SubmitOutcome::Created(created)
            }
            Err(err) => {
                let failure = BookingFailure::from_api_error(&err);
                let message = failure.user_message();
                self.page.dispatch(|p| {
                    p.submitting = false;
                    p.push_toast(ToastKind::Error, message);
                });
                SubmitOutcome::Failed(failure)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toasts_get_unique_ids_and_can_be_dismissed() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 11).unwrap();
        let mut page = ProfilePage::new(today);
        let first = page.push_toast(ToastKind::Info, "one");
        let second = page.push_toast(ToastKind::Error, "two");
        assert_ne!(first, second);

        page.dismiss_toast(first);
        assert_eq!(page.toasts.len(), 1);
        assert_eq!(page.toasts[0].message, "two");
    }

    #[test]
    fn new_page_starts_on_today_without_selection() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 11).unwrap();
        let page = ProfilePage::new(today);
        assert_eq!(page.selected_date, today);
        assert_eq!(page.selected_time, None);
        assert!(!page.booking_modal_open);
        assert_eq!(page.booking_target(), None);
    }
}
