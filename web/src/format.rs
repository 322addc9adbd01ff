use chrono::NaiveDate;

use crate::calendar::parse_date_key;

pub const DESCRIPTION_PREVIEW_CHARS: usize = 150;

/// Cuts a listing description for the profile header, on a char boundary.
pub fn truncate_description(description: &str, max_chars: usize) -> String {
    if description.chars().count() <= max_chars {
        return description.to_string();
    }
    let cut: String = description.chars().take(max_chars).collect();
    format!("{}...", cut.trim_end())
}

/// "Monday, March 11, 2024"
pub fn long_date(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}

/// Formats the date part of a backend ISO timestamp (`2024-03-11T00:00:00.000Z`)
/// without converting timezones. Unparseable input is shown as-is.
pub fn booking_date_label(iso: &str) -> String {
    iso.get(..10)
        .and_then(parse_date_key)
        .map(long_date)
        .unwrap_or_else(|| iso.to_string())
}

pub fn format_amount(amount: Option<f64>) -> String {
    match amount {
        Some(value) => format!("${:.2}", value),
        None => "—".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_descriptions_are_untouched() {
        assert_eq!(truncate_description("Family doctor", 150), "Family doctor");
    }

    #[test]
    fn long_descriptions_are_cut_at_150_chars() {
        let text = "a".repeat(200);
        let cut = truncate_description(&text, DESCRIPTION_PREVIEW_CHARS);
        assert_eq!(cut.len(), 153);
        assert!(cut.ends_with("..."));
    }

    #[test]
    fn truncation_respects_multibyte_chars() {
        let text = "é".repeat(151);
        let cut = truncate_description(&text, 150);
        assert_eq!(cut.chars().count(), 153);
    }

    #[test]
    fn booking_dates_use_the_calendar_day() {
        assert_eq!(
            booking_date_label("2024-03-11T00:00:00.000Z"),
            "Monday, March 11, 2024"
        );
        assert_eq!(booking_date_label("soon"), "soon");
    }

    #[test]
    fn amounts_have_two_decimals() {
        assert_eq!(format_amount(Some(120.0)), "$120.00");
        assert_eq!(format_amount(None), "—");
    }
}
