use crate::core::DateRange;
use crate::utils::error::{GalleryError, Result};
use chrono::{Days, NaiveDate};

/// First day of the image-of-the-day archive.
pub const ARCHIVE_START: NaiveDate = match NaiveDate::from_ymd_opt(1995, 6, 16) {
    Some(date) => date,
    None => panic!("invalid archive start"),
};

/// Days covered by the default window, today included.
pub const DEFAULT_WINDOW_DAYS: u64 = 9;

pub const MISSING_DATES_MESSAGE: &str = "Please select both start and end dates.";
pub const INVERTED_RANGE_MESSAGE: &str = "Start date must be before end date.";

/// The two date fields of the page, holding raw ISO strings the way a
/// browser date input does (an empty string means "not selected").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateRangeInput {
    start: String,
    end: String,
    max: NaiveDate,
}

impl DateRangeInput {
    /// Pre-populated with the trailing window ending at `today`.
    pub fn new(today: NaiveDate) -> Self {
        let start = today
            .checked_sub_days(Days::new(DEFAULT_WINDOW_DAYS - 1))
            .unwrap_or(ARCHIVE_START)
            .max(ARCHIVE_START);

        Self {
            start: iso(start),
            end: iso(today),
            max: today,
        }
    }

    pub fn start_value(&self) -> &str {
        &self.start
    }

    pub fn end_value(&self) -> &str {
        &self.end
    }

    pub fn set_start(&mut self, value: impl Into<String>) {
        self.start = value.into();
    }

    pub fn set_end(&mut self, value: impl Into<String>) {
        self.end = value.into();
    }

    pub fn min(&self) -> NaiveDate {
        ARCHIVE_START
    }

    pub fn max(&self) -> NaiveDate {
        self.max
    }
}

pub fn iso(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Checks the raw field values and turns them into a range.
///
/// Both values must be present and `start` must not fall after `end`.
pub fn parse_range(start: &str, end: &str) -> Result<DateRange> {
    let (start, end) = (start.trim(), end.trim());
    if start.is_empty() || end.is_empty() {
        return Err(GalleryError::validation(MISSING_DATES_MESSAGE));
    }

    let start = parse_date(start)?;
    let end = parse_date(end)?;

    DateRange::new(start, end).ok_or_else(|| GalleryError::validation(INVERTED_RANGE_MESSAGE))
}

fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| GalleryError::validation(format!("'{}' is not a valid date (YYYY-MM-DD).", value)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_default_window_is_nine_days() {
        let input = DateRangeInput::new(date(2024, 3, 10));

        assert_eq!(input.start_value(), "2024-03-02");
        assert_eq!(input.end_value(), "2024-03-10");
        assert_eq!(input.min(), ARCHIVE_START);
        assert_eq!(input.max(), date(2024, 3, 10));

        let range = parse_range(input.start_value(), input.end_value()).unwrap();
        let days = (range.end() - range.start()).num_days() + 1;
        assert_eq!(days as u64, DEFAULT_WINDOW_DAYS);
    }

    #[test]
    fn test_default_window_clamped_to_archive() {
        let input = DateRangeInput::new(date(1995, 6, 18));
        assert_eq!(input.start_value(), "1995-06-16");
    }

    #[test]
    fn test_parse_range_missing_values() {
        for (start, end) in [("", "2024-01-01"), ("2024-01-01", ""), ("", "  ")] {
            let err = parse_range(start, end).unwrap_err();
            assert_eq!(err.user_friendly_message(), MISSING_DATES_MESSAGE);
        }
    }

    #[test]
    fn test_parse_range_inverted() {
        let err = parse_range("2024-01-10", "2024-01-09").unwrap_err();
        assert_eq!(err.user_friendly_message(), INVERTED_RANGE_MESSAGE);
    }

    #[test]
    fn test_parse_range_same_day_ok() {
        let range = parse_range("2024-01-10", "2024-01-10").unwrap();
        assert_eq!(range.start(), range.end());
    }

    #[test]
    fn test_parse_range_garbage() {
        let err = parse_range("yesterday", "2024-01-10").unwrap_err();
        assert!(matches!(err, GalleryError::ValidationError { .. }));
        assert!(err.user_friendly_message().contains("yesterday"));
    }

    #[test]
    fn test_setters() {
        let mut input = DateRangeInput::new(date(2024, 3, 10));
        input.set_start("");
        input.set_end("2024-03-11");
        assert_eq!(input.start_value(), "");
        assert_eq!(input.end_value(), "2024-03-11");
    }
}
