use chrono::NaiveDate;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_params_map;

use crate::app::AppContext;
use crate::calendar::{today_local, MonthView};
use crate::components::{
    BookingCalendar, BookingModal, ConfirmationModal, ErrorView, LoadingView, TimeSlotPicker,
    ToastStack,
};
use crate::format::{format_amount, long_date, truncate_description, DESCRIPTION_PREVIEW_CHARS};
use crate::orchestrator::{BookingOrchestrator, ProfilePage};
use crate::store::Status;
use crate::validation::BookingForm;

#[component]
pub fn DoctorProfile() -> impl IntoView {
    let params = use_params_map();
    let ctx = expect_context::<AppContext>();
    let store = ctx.store;
    let rules = ctx.config.rules.clone();
    let toast_duration = ctx.config.toast_duration;

    let today = today_local();
    let page = RwSignal::new(ProfilePage::new(today));
    let displayed_month = RwSignal::new(MonthView::of(today));
    let flow = StoredValue::new(BookingOrchestrator::new(ctx.api.clone(), store, page));

    let listing_id = Memo::new(move |_| params.read().get("id").unwrap_or_default());

    let load = move || {
        let id = listing_id.get_untracked();
        if id.is_empty() {
            return;
        }
        let flow = flow.get_value();
        spawn_local(async move {
            flow.load_profile(&id).await;
        });
    };

    Effect::new(move |_| {
        listing_id.track();
        load();
    });

    // Only a different year-month key reaches the orchestrator.
    let month_key = Memo::new(move |_| displayed_month.get());
    Effect::new(move |_| {
        let month = month_key.get();
        let flow = flow.get_value();
        spawn_local(async move {
            flow.change_month(month).await;
        });
    });

    let on_date_change = move |date: NaiveDate| {
        let flow = flow.get_value();
        spawn_local(async move {
            flow.select_date(date).await;
        });
    };

    let on_slot_selected = move |time: String| {
        flow.with_value(|flow| {
            flow.select_slot(&time);
        });
    };

    let on_submit = move |form: BookingForm| {
        let flow = flow.get_value();
        spawn_local(async move {
            flow.submit_booking(form).await;
        });
    };

    let selected_date = Signal::derive(move || page.with(|p| p.selected_date));
    let selected_time = Signal::derive(move || page.with(|p| p.selected_time.clone()));
    let date_label = Signal::derive(move || long_date(selected_date.get()));
    let date_availability = Signal::derive(move || store.with(|s| s.date_availability.clone()));
    let checking = Signal::derive(move || store.with(|s| s.availability.is_loading()));
    let slots = Signal::derive(move || store.with(|s| s.all_slots.clone()));
    let slots_loading = Signal::derive(move || store.with(|s| s.slots.is_loading()));
    let doctor_name = Signal::derive(move || {
        page.with(|p| {
            p.listing
                .as_ref()
                .map(|listing| listing.doctor.name.clone())
                .unwrap_or_default()
        })
    });
    let consultation_types = Signal::derive(move || {
        page.with(|p| {
            p.listing
                .as_ref()
                .map(|listing| listing.consultation_types.clone())
                .unwrap_or_default()
        })
    });

    view! {
        <div class="doctor-profile-container">
            {move || {
                let (status, error) = page.with(|p| (p.listing_status, p.listing_error.clone()));
                match status {
                    Status::Failed => view! {
                        <ErrorView
                            message=error.unwrap_or_else(|| "Failed to load profile".to_string())
                            on_retry=load
                        />
                    }
                    .into_any(),
                    Status::Succeeded => page
                        .with(|p| p.listing.clone())
                        .map(|listing| {
                            view! {
                                <div class="doctor-profile-header">
                                    <h1>{listing.doctor.name.clone()}</h1>
                                    {listing
                                        .doctor
                                        .specialty
                                        .clone()
                                        .map(|specialty| view! { <p class="doctor-specialty">{specialty}</p> })}
                                    <h2 class="listing-title">{listing.title.clone()}</h2>
                                    <p class="listing-description">
                                        {truncate_description(&listing.description, DESCRIPTION_PREVIEW_CHARS)}
                                    </p>
                                    <div class="listing-meta">
                                        {listing.location.clone().map(|location| view! { <span>{location}</span> })}
                                        <span class="listing-price">{format_amount(listing.price)}</span>
                                    </div>
                                </div>
                            }
                            .into_any()
                        })
                        .unwrap_or_else(|| view! {}.into_any()),
                    _ => view! { <LoadingView message="Loading profile..."/> }.into_any(),
                }
            }}

            <div class="doctor-profile-booking">
                <BookingCalendar
                    selected_date=selected_date
                    displayed_month=displayed_month
                    date_availability=date_availability
                    is_checking_availability=checking
                    rules=rules
                    on_date_change=on_date_change
                />

                <TimeSlotPicker
                    date_label=date_label
                    slots=slots
                    loading=slots_loading
                    selected_time=selected_time
                    on_slot_selected=on_slot_selected
                />
            </div>

            <BookingModal
                show=Signal::derive(move || page.with(|p| p.booking_modal_open))
                doctor_name=doctor_name
                date_label=date_label
                selected_time=selected_time
                consultation_types=consultation_types
                submitting=Signal::derive(move || page.with(|p| p.submitting))
                on_submit=on_submit
                on_close=move || flow.with_value(|flow| flow.close_booking_modal())
            />

            <ConfirmationModal
                summary=Signal::derive(move || page.with(|p| p.confirmation.clone()))
                on_close=move || flow.with_value(|flow| flow.dismiss_confirmation())
            />

            <ToastStack
                toasts=Signal::derive(move || page.with(|p| p.toasts.clone()))
                duration=toast_duration
                on_dismiss=move |id: u64| flow.with_value(|flow| flow.dismiss_toast(id))
            />
        </div>
    }
}
