use leptos::prelude::*;
use thaw::*;

use crate::format::format_amount;
use crate::orchestrator::BookingSummary;

#[component]
pub fn ConfirmationModal(
    #[prop(into)] summary: Signal<Option<BookingSummary>>,
    on_close: impl Fn() + 'static + Copy + Send + Sync,
) -> impl IntoView {
    view! {
        <div class=move || if summary.with(Option::is_some) { "booking-modal-overlay show" } else { "booking-modal-overlay" }>
            <div class="booking-modal confirmation-step">
                {move || {
                    summary
                        .get()
                        .map(|summary| {
                            view! {
                                <div class="success-icon">"✓"</div>
                                <h3>"Booking Confirmed!"</h3>
                                <p class="confirmation-text">
                                    "Your appointment request has been sent. A confirmation email will follow shortly."
                                </p>
                                <div class="booking-details">
                                    <p class="booking-id">{format!("Reference: #{}", summary.reference)}</p>
                                    <dl class="booking-details-list">
                                        <dt>"Doctor"</dt>
                                        <dd>{summary.doctor_name}</dd>
                                        <dt>"Date"</dt>
                                        <dd>{summary.date_label}</dd>
                                        <dt>"Time"</dt>
                                        <dd>{summary.time}</dd>
                                        <dt>"Consultation"</dt>
                                        <dd>{summary.consultation}</dd>
                                        <dt>"Patient"</dt>
                                        <dd>{format!("{} ({})", summary.patient_name, summary.email)}</dd>
                                        <dt>"Amount"</dt>
                                        <dd>{format_amount(summary.amount)}</dd>
                                    </dl>
                                </div>
                            }
                        })
                }}
                <div class="confirmation-actions">
                    <Button appearance=ButtonAppearance::Primary on_click=move |_| on_close()>
                        "Done"
                    </Button>
                </div>
            </div>
        </div>
    }
}
