//! Date-range parsing and validation for saved requests.

use chrono::NaiveDate;

use crate::error::ValidationError;

/// A validated start/end pair; end is on or after start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Parse two ISO dates and enforce ordering.
    pub fn parse(start: &str, end: &str) -> Result<Self, ValidationError> {
        let start = start.trim();
        let end = end.trim();
        if start.is_empty() || end.is_empty() {
            return Err(ValidationError::MissingDates);
        }

        let start = parse_iso_date(start)?;
        let end = parse_iso_date(end)?;
        if end < start {
            return Err(ValidationError::EndBeforeStart);
        }

        Ok(Self { start, end })
    }
}

/// Parse a `YYYY-MM-DD` date string.
pub fn parse_iso_date(s: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| ValidationError::BadDate(s.to_string()))
}
