//! Month grid model behind the booking calendar.
//!
//! Everything here is plain date arithmetic so the view stays a thin
//! rendering of [`DayCell`]s.

use chrono::{Datelike, Duration, NaiveDate};
use shared_types::DateAvailability;

use crate::config::BusinessRules;

pub const GRID_CELLS: usize = 42;
pub const RANGE_PADDING_DAYS: i64 = 7;

pub const WEEKDAY_LABELS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthView {
    pub year: i32,
    pub month: u32,
}

impl MonthView {
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    pub fn last_day(&self) -> NaiveDate {
        self.next().first_day() - Duration::days(1)
    }

    pub fn prev(&self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// `YYYY-MM`, used to tell whether the displayed month really changed.
    pub fn key(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }

    pub fn label(&self) -> String {
        let name = MONTH_NAMES
            .get(self.month.saturating_sub(1) as usize)
            .copied()
            .unwrap_or("Unknown");
        format!("{} {}", name, self.year)
    }

    /// Month bounds widened by a week on each side, so the leading and
    /// trailing cells of the grid get availability too.
    pub fn padded_range(&self) -> (NaiveDate, NaiveDate) {
        (
            self.first_day() - Duration::days(RANGE_PADDING_DAYS),
            self.last_day() + Duration::days(RANGE_PADDING_DAYS),
        )
    }
}

/// Local calendar key, never shifted through UTC.
pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn parse_date_key(key: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(key, "%Y-%m-%d").ok()
}

pub fn is_date_past(date: NaiveDate, today: NaiveDate) -> bool {
    date < today
}

/// Monday-first offset of the 1st of the month: `(day_from_sunday + 6) % 7`.
pub fn leading_offset(month: MonthView) -> u32 {
    (month.first_day().weekday().num_days_from_sunday() + 6) % 7
}

/// The 42 dates shown for a month, starting on the Monday of the week that
/// contains the 1st.
pub fn month_grid(month: MonthView) -> [NaiveDate; GRID_CELLS] {
    let start = month.first_day() - Duration::days(leading_offset(month) as i64);
    std::array::from_fn(|i| start + Duration::days(i as i64))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayCell {
    pub date: NaiveDate,
    pub key: String,
    pub in_month: bool,
    pub is_past: bool,
    pub is_today: bool,
    pub is_selected: bool,
    pub is_weekend: bool,
    pub has_slots: bool,
    pub slots_count: u32,
    pub clickable: bool,
}

impl DayCell {
    pub fn classify(
        date: NaiveDate,
        month: MonthView,
        today: NaiveDate,
        selected: Option<NaiveDate>,
        availability: &DateAvailability,
        rules: &BusinessRules,
    ) -> Self {
        let key = date_key(date);
        let day = availability.get(&key).copied().unwrap_or_default();
        let is_past = is_date_past(date, today);
        let is_weekend = rules.is_closed(date.weekday());

        Self {
            in_month: MonthView::of(date) == month,
            is_past,
            is_today: date == today,
            is_selected: selected == Some(date),
            is_weekend,
            has_slots: day.has_slots,
            slots_count: day.slots_count,
            clickable: !is_past && !is_weekend && day.has_slots,
            date,
            key,
        }
    }

    pub fn day(&self) -> u32 {
        self.date.day()
    }

    pub fn css_class(&self) -> String {
        let mut classes = vec!["calendar-day"];
        if !self.in_month {
            classes.push("outside");
        }
        if self.is_past {
            classes.push("past");
        }
        if self.is_today {
            classes.push("today");
        }
        if self.is_selected {
            classes.push("selected");
        }
        if self.is_weekend {
            classes.push("weekend");
        }
        if self.clickable {
            classes.push("available");
        } else {
            classes.push("unavailable");
        }
        classes.join(" ")
    }
}

pub fn build_cells(
    month: MonthView,
    today: NaiveDate,
    selected: Option<NaiveDate>,
    availability: &DateAvailability,
    rules: &BusinessRules,
) -> Vec<DayCell> {
    month_grid(month)
        .into_iter()
        .map(|date| DayCell::classify(date, month, today, selected, availability, rules))
        .collect()
}

pub fn today_local() -> NaiveDate {
    chrono::Local::now().date_naive()
}
