//! Calendar dates from front-matter, without timezone dependencies.
//!
//! Lab dates are written loosely (`2024-06-15`, `2024-06-15T14:30:45Z`,
//! `June 2024`). Only ISO dates are understood; anything else is shown as
//! written.
//!
//! # Examples
//!
//! ```ignore
//! let date = LabDate::parse("2024-06-15").unwrap();
//! assert_eq!(date.to_day_month_year(), "15/06/2024");
//! ```

use anyhow::{Result, bail};

/// A calendar day, no time or zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LabDate {
    pub year: u16,
    pub month: u8,
    pub day: u8,
}

impl LabDate {
    pub const fn from_ymd(year: u16, month: u8, day: u8) -> Self {
        Self { year, month, day }
    }

    /// Parse from "YYYY-MM-DD", optionally followed by a `T` or space and a
    /// time of day (ignored).
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        let bytes = s.as_bytes();

        // Minimum: "YYYY-MM-DD" (10 chars)
        if bytes.len() < 10 {
            return None;
        }
        if bytes.len() > 10 && !matches!(bytes[10], b'T' | b't' | b' ') {
            return None;
        }

        if bytes[4] != b'-' || bytes[7] != b'-' {
            return None;
        }
        let year = digits(&bytes[0..4])?;
        let month = u8::try_from(digits(&bytes[5..7])?).ok()?;
        let day = u8::try_from(digits(&bytes[8..10])?).ok()?;

        let date = Self::from_ymd(year, month, day);
        date.validate().ok()?;
        Some(date)
    }

    /// Check the month and the day against the calendar.
    pub fn validate(self) -> Result<()> {
        let last_day = match self.month {
            2 if leap(self.year) => 29,
            2 => 28,
            4 | 6 | 9 | 11 => 30,
            1..=12 => 31,
            month => bail!("no such month: {month}"),
        };
        if !(1..=last_day).contains(&self.day) {
            bail!("no day {} in month {}", self.day, self.month);
        }
        Ok(())
    }

    /// Format as `DD/MM/YYYY`.
    pub fn to_day_month_year(self) -> String {
        format!("{:02}/{:02}/{:04}", self.day, self.month, self.year)
    }
}

fn leap(year: u16) -> bool {
    year.is_multiple_of(4) && (!year.is_multiple_of(100) || year.is_multiple_of(400))
}

/// Display form of a front-matter date.
///
/// ISO dates are shown as `DD/MM/YYYY`, other text as written, and a missing
/// or blank value as `placeholder`.
pub fn display_date(raw: Option<&str>, placeholder: &str) -> String {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => placeholder.to_string(),
        Some(s) => LabDate::parse(s).map_or_else(|| s.to_string(), LabDate::to_day_month_year),
    }
}

/// Parse a fixed-width run of ASCII digits.
fn digits(bytes: &[u8]) -> Option<u16> {
    bytes.iter().try_fold(0u16, |acc, &b| {
        b.is_ascii_digit().then(|| acc * 10 + u16::from(b - b'0'))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_only() {
        assert_eq!(LabDate::parse("2024-06-15"), Some(LabDate::from_ymd(2024, 6, 15)));
    }

    #[test]
    fn test_parse_with_time() {
        assert_eq!(
            LabDate::parse("2024-06-15T14:30:45Z"),
            Some(LabDate::from_ymd(2024, 6, 15))
        );
        assert_eq!(
            LabDate::parse("2024-06-15 09:00"),
            Some(LabDate::from_ymd(2024, 6, 15))
        );
    }

    #[test]
    fn test_parse_invalid() {
        assert_eq!(LabDate::parse("June 2024"), None);
        assert_eq!(LabDate::parse("2024-13-01"), None);
        assert_eq!(LabDate::parse("2024-02-30"), None);
        assert_eq!(LabDate::parse("2024-06-15x"), None);
        assert_eq!(LabDate::parse("2024/06/15"), None);
    }

    #[test]
    fn test_leap_year() {
        assert!(LabDate::from_ymd(2024, 2, 29).validate().is_ok());
        assert!(LabDate::from_ymd(2023, 2, 29).validate().is_err());
        assert!(LabDate::from_ymd(1900, 2, 29).validate().is_err());
        assert!(LabDate::from_ymd(2000, 2, 29).validate().is_ok());
    }

    #[test]
    fn test_display_date() {
        assert_eq!(display_date(Some("2024-06-05"), "—"), "05/06/2024");
        assert_eq!(display_date(Some("Spring 2024"), "—"), "Spring 2024");
        assert_eq!(display_date(Some("   "), "—"), "—");
        assert_eq!(display_date(None, "—"), "—");
    }
}
