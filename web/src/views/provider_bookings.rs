use leptos::leptos_dom::helpers::event_target_value;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_params_map;
use shared_types::{BookingFilter, BookingStatus};
use thaw::*;

use crate::actions;
use crate::app::AppContext;
use crate::components::{BookingCard, ErrorView, LoadingView};

const STATUS_FILTERS: [BookingStatus; 4] = [
    BookingStatus::Pending,
    BookingStatus::Confirmed,
    BookingStatus::Completed,
    BookingStatus::Cancelled,
];

/// Transitions a provider may apply from a given status.
fn next_statuses(status: BookingStatus) -> &'static [(BookingStatus, &'static str)] {
    match status {
        BookingStatus::Pending => &[
            (BookingStatus::Confirmed, "Confirm"),
            (BookingStatus::Cancelled, "Decline"),
        ],
        BookingStatus::Confirmed => &[
            (BookingStatus::Completed, "Mark completed"),
            (BookingStatus::Cancelled, "Cancel"),
        ],
        BookingStatus::Cancelled | BookingStatus::Completed => &[],
    }
}

fn parse_status_filter(value: &str) -> Option<BookingStatus> {
    STATUS_FILTERS
        .iter()
        .copied()
        .find(|status| status.as_str() == value)
}

#[component]
pub fn ProviderBookings() -> impl IntoView {
    let params = use_params_map();
    let ctx = expect_context::<AppContext>();
    let store = ctx.store;
    let api = StoredValue::new(ctx.api.clone());

    let doctor_id = Memo::new(move |_| params.read().get("doctor_id").unwrap_or_default());
    let status_filter = RwSignal::new(None::<BookingStatus>);

    let load = move || {
        let id = doctor_id.get_untracked();
        if id.is_empty() {
            return;
        }
        let filter = BookingFilter {
            status: status_filter.get_untracked(),
            date: None,
        };
        let api = api.get_value();
        spawn_local(async move {
            let _ = actions::fetch_doctor_bookings(&*api, &store, &id, filter).await;
        });
    };

    Effect::new(move |_| {
        doctor_id.track();
        status_filter.track();
        load();
    });

    let set_status = move |booking_id: String, status: BookingStatus| {
        let api = api.get_value();
        spawn_local(async move {
            let _ = actions::update_booking_status(&*api, &store, &booking_id, status).await;
        });
    };

    view! {
        <div class="provider-bookings-container">
            <div class="provider-bookings-header">
                <h1>"Appointments"</h1>
                <select
                    class="form-select"
                    on:change=move |ev| status_filter.set(parse_status_filter(&event_target_value(&ev)))
                >
                    <option value="">"All statuses"</option>
                    {STATUS_FILTERS
                        .iter()
                        .map(|status| view! { <option value=status.as_str()>{status.as_str()}</option> })
                        .collect::<Vec<_>>()}
                </select>
            </div>

            {move || {
                store
                    .with(|s| s.update.error.clone())
                    .map(|error| view! { <MessageBar intent=MessageBarIntent::Error>{error}</MessageBar> })
            }}

            {move || {
                let (loading, error, bookings) = store.with(|s| {
                    (s.bookings_list.is_loading(), s.bookings_list.error.clone(), s.provider_bookings.clone())
                });

                if loading && bookings.is_empty() {
                    return view! { <LoadingView message="Loading appointments..."/> }.into_any();
                }
                if let Some(error) = error {
                    return view! { <ErrorView message=error on_retry=load/> }.into_any();
                }
                if bookings.is_empty() {
                    return view! {
                        <p class="provider-bookings-empty">"No appointments match this filter."</p>
                    }
                    .into_any();
                }

                view! {
                    <div class="booking-list">
                        {bookings
                            .into_iter()
                            .map(|booking| {
                                let booking_id = booking.id.clone();
                                let transitions = next_statuses(booking.status);
                                view! {
                                    <BookingCard booking=booking>
                                        {transitions
                                            .iter()
                                            .map(|(status, label)| {
                                                let status = *status;
                                                let booking_id = booking_id.clone();
                                                view! {
                                                    <Button
                                                        appearance=if status == BookingStatus::Cancelled {
                                                            ButtonAppearance::Secondary
                                                        } else {
                                                            ButtonAppearance::Primary
                                                        }
                                                        disabled=Signal::derive(move || store.with(|s| s.update.is_loading()))
                                                        on_click=move |_| set_status(booking_id.clone(), status)
                                                    >
                                                        {*label}
                                                    </Button>
                                                }
                                            })
                                            .collect::<Vec<_>>()}
                                    </BookingCard>
                                }
                            })
                            .collect::<Vec<_>>()}
                    </div>
                }
                .into_any()
            }}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn final_statuses_offer_no_actions() {
        assert!(next_statuses(BookingStatus::Cancelled).is_empty());
        assert!(next_statuses(BookingStatus::Completed).is_empty());
        assert_eq!(next_statuses(BookingStatus::Pending)[0].0, BookingStatus::Confirmed);
    }

    #[test]
    fn status_filter_parses_known_values_only() {
        assert_eq!(parse_status_filter("confirmed"), Some(BookingStatus::Confirmed));
        assert_eq!(parse_status_filter(""), None);
        assert_eq!(parse_status_filter("archived"), None);
    }
}
