use leptos::prelude::*;
use shared_types::Slot;
use thaw::*;

#[component]
pub fn TimeSlotPicker(
    #[prop(into)] date_label: Signal<String>,
    #[prop(into)] slots: Signal<Vec<Slot>>,
    #[prop(into)] loading: Signal<bool>,
    #[prop(into)] selected_time: Signal<Option<String>>,
    on_slot_selected: impl Fn(String) + 'static + Copy + Send + Sync,
) -> impl IntoView {
    view! {
        <div class="time-slot-picker">
            <div class="time-slot-picker-header">
                <h4>"Available Time Slots"</h4>
                <p class="time-slot-picker-subtitle">
                    {move || format!("Appointments for {}", date_label.get())}
                </p>
            </div>

            <div class="time-slot-picker-content">
                {move || {
                    if loading.get() {
                        return view! {
                            <div class="time-slot-picker-loading">
                                <Spinner size=SpinnerSize::Small />
                                <p>"Loading available time slots..."</p>
                            </div>
                        }
                        .into_any();
                    }

                    let slots = slots.get();
                    if slots.is_empty() {
                        view! {
                            <div class="time-slot-picker-empty">
                                <p>"No time slots for this date."</p>
                                <p class="time-slot-picker-suggestion">"Please pick another day from the calendar."</p>
                            </div>
                        }
                        .into_any()
                    } else if slots.iter().all(|slot| !slot.available) {
                        view! {
                            <div class="time-slot-picker-empty">
                                <p>"All time slots are booked for this date."</p>
                                <p class="time-slot-picker-suggestion">"Please try selecting a different date."</p>
                            </div>
                        }
                        .into_any()
                    } else {
                        let selected = selected_time.get();
                        view! {
                            <div class="time-slot-picker-grid">
                                {slots
                                    .into_iter()
                                    .map(|slot| {
                                        let is_selected = selected.as_deref() == Some(slot.time.as_str());
                                        let available = slot.available;
                                        let time = slot.time.clone();

                                        view! {
                                            <Button
                                                class=if is_selected { "time-slot-button selected" } else { "time-slot-button" }
                                                appearance=if is_selected {
                                                    ButtonAppearance::Primary
                                                } else {
                                                    ButtonAppearance::Secondary
                                                }
                                                disabled=!available
                                                on_click=move |_| {
                                                    if available {
                                                        on_slot_selected(time.clone());
                                                    }
                                                }
                                            >
                                                <div class="time-slot-button-content">
                                                    <span class="time-slot-time">{slot.time}</span>
                                                    <span class="time-slot-label">
                                                        {if available { "Available" } else { "Booked" }}
                                                    </span>
                                                </div>
                                            </Button>
                                        }
                                    })
                                    .collect::<Vec<_>>()}
                            </div>
                        }
                        .into_any()
                    }
                }}
            </div>
        </div>
    }
}
