use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::actions;
use crate::app::AppContext;
use crate::components::{BookingCard, ErrorView, LoadingView};

#[component]
pub fn MyBookings() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let store = ctx.store;
    let api = StoredValue::new(ctx.api.clone());

    let load = move || {
        let api = api.get_value();
        spawn_local(async move {
            let _ = actions::fetch_user_bookings(&*api, &store).await;
        });
    };

    Effect::new(move |_| load());

    let cancel = move |booking_id: String| {
        let api = api.get_value();
        spawn_local(async move {
            let _ = actions::cancel_booking(&*api, &store, &booking_id).await;
        });
    };

    view! {
        <div class="my-bookings-container">
            <h1>"My Bookings"</h1>

            {move || {
                store
                    .with(|s| s.update.error.clone())
                    .map(|error| view! { <MessageBar intent=MessageBarIntent::Error>{error}</MessageBar> })
            }}

            {move || {
                let (loading, error, bookings) = store.with(|s| {
                    (s.bookings_list.is_loading(), s.bookings_list.error.clone(), s.user_bookings.clone())
                });

                if loading && bookings.is_empty() {
                    return view! { <LoadingView message="Loading your bookings..."/> }.into_any();
                }
                if let Some(error) = error {
                    return view! { <ErrorView message=error on_retry=load/> }.into_any();
                }
                if bookings.is_empty() {
                    return view! {
                        <p class="my-bookings-empty">"You have no bookings yet."</p>
                    }
                    .into_any();
                }

                view! {
                    <div class="booking-list">
                        {bookings
                            .into_iter()
                            .map(|booking| {
                                let booking_id = booking.id.clone();
                                let can_cancel = !booking.status.is_final();
                                view! {
                                    <BookingCard booking=booking>
                                        {can_cancel
                                            .then(|| {
                                                view! {
                                                    <Button
                                                        appearance=ButtonAppearance::Secondary
                                                        disabled=Signal::derive(move || store.with(|s| s.update.is_loading()))
                                                        on_click=move |_| cancel(booking_id.clone())
                                                    >
                                                        "Cancel booking"
                                                    </Button>
                                                }
                                            })}
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
