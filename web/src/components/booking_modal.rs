use leptos::leptos_dom::helpers::event_target_value;
use leptos::prelude::*;
use shared_types::ConsultationType;
use thaw::*;

use crate::validation::BookingForm;

/// Collects patient contact details for the chosen slot. Validation and
/// submission belong to the caller; the form is cleared whenever it closes.
#[component]
pub fn BookingModal(
    #[prop(into)] show: Signal<bool>,
    #[prop(into)] doctor_name: Signal<String>,
    #[prop(into)] date_label: Signal<String>,
    #[prop(into)] selected_time: Signal<Option<String>>,
    #[prop(into)] consultation_types: Signal<Vec<ConsultationType>>,
    #[prop(into)] submitting: Signal<bool>,
    on_submit: impl Fn(BookingForm) + 'static + Copy + Send + Sync,
    on_close: impl Fn() + 'static + Copy + Send + Sync,
) -> impl IntoView {
    let patient_name = RwSignal::new(String::new());
    let phone = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let notes = RwSignal::new(String::new());
    let consultation_type = RwSignal::new(ConsultationType::InPerson);

    let reset_form = move || {
        patient_name.set(String::new());
        phone.set(String::new());
        email.set(String::new());
        notes.set(String::new());
        consultation_type.set(ConsultationType::InPerson);
    };

    Effect::new(move |_| {
        if !show.get() {
            reset_form();
        }
    });

    let offered_types = move || {
        let offered = consultation_types.get();
        if offered.is_empty() {
            ConsultationType::SELECTABLE.to_vec()
        } else {
            offered
        }
    };

    let handle_submit = move || {
        on_submit(BookingForm {
            patient_name: patient_name.get_untracked(),
            phone: phone.get_untracked(),
            email: email.get_untracked(),
            consultation_type: consultation_type.get_untracked(),
            notes: notes.get_untracked(),
        });
    };

    view! {
        <div class=move || if show.get() { "booking-modal-overlay show" } else { "booking-modal-overlay" }>
            <div class="booking-modal">
                <div class="modal-header">
                    <h2>"Book Appointment"</h2>
                    <Button
                        appearance=ButtonAppearance::Subtle
                        on_click=move |_| on_close()
                        class="close-button"
                    >
                        "×"
                    </Button>
                </div>

                <div class="modal-content">
                    <div class="booking-summary">
                        <h3>{move || format!("Book with {}", doctor_name.get())}</h3>
                        <p class="booking-summary-when">
                            {move || format!(
                                "{} at {}",
                                date_label.get(),
                                selected_time.get().unwrap_or_default(),
                            )}
                        </p>
                    </div>

                    <form class="booking-form-content" on:submit=move |ev| {
                        ev.prevent_default();
                        if !submitting.get_untracked() {
                            handle_submit();
                        }
                    }>
                        <div class="form-section">
                            <h4>"Patient Information"</h4>
                            <div class="form-group">
                                <label for="patient-name">"Full Name *"</label>
                                <Input
                                    id="patient-name"
                                    placeholder="Patient full name"
                                    value=patient_name
                                />
                            </div>
                            <div class="form-row">
                                <div class="form-group">
                                    <label for="patient-phone">"Phone Number *"</label>
                                    <Input
                                        id="patient-phone"
                                        input_type=InputType::Tel
                                        placeholder="(555) 123-4567"
                                        value=phone
                                    />
                                </div>
                                <div class="form-group">
                                    <label for="patient-email">"Email Address *"</label>
                                    <Input
                                        id="patient-email"
                                        input_type=InputType::Email
                                        placeholder="patient@email.com"
                                        value=email
                                    />
                                </div>
                            </div>
                        </div>

                        <div class="form-section">
                            <h4>"Consultation"</h4>
                            <div class="form-group">
                                <label for="consultation-type">"Consultation Type"</label>
                                <select
                                    id="consultation-type"
                                    class="form-select"
                                    on:change=move |ev| {
                                        consultation_type.set(ConsultationType::from_value(&event_target_value(&ev)));
                                    }
                                >
                                    {move || {
                                        let current = consultation_type.get();
                                        offered_types()
                                            .into_iter()
                                            .map(|kind| {
                                                view! {
                                                    <option value=kind.as_str() selected=kind == current>
                                                        {kind.label()}
                                                    </option>
                                                }
                                            })
                                            .collect::<Vec<_>>()
                                    }}
                                </select>
                            </div>
                            <div class="form-group">
                                <label for="booking-notes">"Notes"</label>
                                <Textarea
                                    id="booking-notes"
                                    placeholder="Symptoms, questions, or anything the doctor should know..."
                                    value=notes
                                />
                            </div>
                        </div>

                        <div class="form-actions">
                            <Button
                                appearance=ButtonAppearance::Secondary
                                on_click=move |_| on_close()
                            >
                                "Cancel"
                            </Button>
                            <Button
                                button_type=ButtonType::Submit
                                appearance=ButtonAppearance::Primary
                                disabled=submitting
                                loading=submitting
                            >
                                {move || if submitting.get() { "Booking..." } else { "Confirm Booking" }}
                            </Button>
                        </div>
                    </form>
                </div>
            </div>
        </div>
    }
}
