use leptos::prelude::*;
use shared_types::Booking;

use crate::format::{booking_date_label, format_amount};

#[component]
pub fn BookingCard(booking: Booking, #[prop(optional)] children: Option<Children>) -> impl IntoView {
    let status_class = format!("booking-status booking-status--{}", booking.status);
    let listing_title = booking
        .listing
        .title()
        .map(str::to_string)
        .unwrap_or_else(|| "Consultation".to_string());

    view! {
        <div class="booking-card">
            <div class="booking-card-header">
                <h3>{listing_title}</h3>
                <span class=status_class>{booking.status.as_str()}</span>
            </div>
            <div class="booking-card-body">
                <p>{format!("{} at {}", booking_date_label(&booking.date), booking.time)}</p>
                <p>{format!("{} · {}", booking.consultation_type.label(), booking.patient_name)}</p>
                <p class="booking-card-contact">{format!("{} · {}", booking.phone, booking.email)}</p>
                {(!booking.notes.is_empty()).then(|| view! { <p class="booking-card-notes">{booking.notes.clone()}</p> })}
                <p class="booking-card-amount">{format_amount(booking.amount)}</p>
            </div>
            <div class="booking-card-actions">
                {children.map(|children| children())}
            </div>
        </div>
    }
}
