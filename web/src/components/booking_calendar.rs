use chrono::NaiveDate;
use leptos::prelude::*;
use shared_types::DateAvailability;
use thaw::*;

use crate::calendar::{build_cells, today_local, MonthView, WEEKDAY_LABELS};
use crate::config::BusinessRules;

/// Month grid for picking a booking date.
///
/// Navigating months only moves `displayed_month`; fetching availability for
/// the new month is left to whoever owns that signal.
#[component]
pub fn BookingCalendar(
    #[prop(into)] selected_date: Signal<NaiveDate>,
    displayed_month: RwSignal<MonthView>,
    #[prop(into)] date_availability: Signal<DateAvailability>,
    #[prop(into)] is_checking_availability: Signal<bool>,
    rules: BusinessRules,
    on_date_change: impl Fn(NaiveDate) + 'static + Copy + Send + Sync,
) -> impl IntoView {
    let rules = StoredValue::new(rules);

    let cells = Memo::new(move |_| {
        let month = displayed_month.get();
        let selected = selected_date.get();
        date_availability.with(|availability| {
            rules.with_value(|rules| {
                build_cells(month, today_local(), Some(selected), availability, rules)
            })
        })
    });

    view! {
        <div class="booking-calendar">
            <div class="booking-calendar-header">
                <Button
                    appearance=ButtonAppearance::Subtle
                    size=ButtonSize::Small
                    on_click=move |_| displayed_month.update(|m| *m = m.prev())
                >
                    "←"
                </Button>

                <h3 class="booking-calendar-month">
                    {move || displayed_month.get().label()}
                </h3>

                <Button
                    appearance=ButtonAppearance::Subtle
                    size=ButtonSize::Small
                    on_click=move |_| displayed_month.update(|m| *m = m.next())
                >
                    "→"
                </Button>
            </div>

            <div class="booking-calendar-weekdays">
                {WEEKDAY_LABELS
                    .iter()
                    .map(|label| view! { <div class="booking-calendar-weekday">{*label}</div> })
                    .collect::<Vec<_>>()}
            </div>

            <div class="booking-calendar-body">
                <div class="booking-calendar-days">
                    {move || {
                        cells
                            .get()
                            .into_iter()
                            .map(|cell| {
                                let date = cell.date;
                                let clickable = cell.clickable;
                                let title = if cell.has_slots {
                                    format!("{} slots available", cell.slots_count)
                                } else {
                                    String::new()
                                };

                                view! {
                                    <button
                                        class=cell.css_class()
                                        disabled=!clickable
                                        title=title
                                        on:click=move |_| {
                                            if clickable {
                                                on_date_change(date);
                                            }
                                        }
                                    >
                                        <span class="day-number">{cell.day()}</span>
                                        {if cell.is_weekend {
                                            view! { <span class="day-dot day-dot--closed"></span> }.into_any()
                                        } else if cell.has_slots {
                                            view! { <span class="day-dot day-dot--open"></span> }.into_any()
                                        } else {
                                            view! {}.into_any()
                                        }}
                                    </button>
                                }
                            })
                            .collect::<Vec<_>>()
                    }}
                </div>

                <Show when=move || is_checking_availability.get()>
                    <div class="booking-calendar-overlay">
                        <Spinner size=SpinnerSize::Small />
                        <p>"Checking availability..."</p>
                    </div>
                </Show>
            </div>

            <div class="booking-calendar-legend">
                <div class="legend-item">
                    <span class="day-dot day-dot--open"></span>
                    <span>"Available"</span>
                </div>
                <div class="legend-item">
                    <span class="day-dot day-dot--closed"></span>
                    <span>"Closed"</span>
                </div>
            </div>
        </div>
    }
}
