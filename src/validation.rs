//! Input validation
//!
//! Blank-name checks are shared with the store. Due-date checks belong to the
//! front-end boundary: the store itself keeps whatever date text it is given.

use crate::{Error, Result};
use chrono::NaiveDate;

/// Stored and displayed date format
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Reject names that are empty after trimming
pub fn require_name(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::Validation(format!("{} cannot be empty", field)));
    }
    Ok(())
}

/// Parse a `YYYY-MM-DD` date
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT)
        .map_err(|_| Error::InvalidDate(input.to_string()))
}

/// Read a due date back from the store. Only exact `YYYY-MM-DD` text counts;
/// unpadded or whitespace-wrapped values are not dates.
pub fn parse_stored_date(raw: &str) -> Option<NaiveDate> {
    let date = NaiveDate::parse_from_str(raw, DATE_FORMAT).ok()?;
    (date.format(DATE_FORMAT).to_string() == raw).then_some(date)
}

/// Validate an optional due date entered by the user.
///
/// Absent or blank input means "no due date". A present date must parse and
/// must not be earlier than `today`. Returns the canonical string to store.
pub fn parse_due_date(input: Option<&str>, today: NaiveDate) -> Result<Option<String>> {
    let Some(raw) = input.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };

    let date = parse_date(raw)?;
    if date < today {
        return Err(Error::Validation(format!(
            "Due date {} is in the past",
            date.format(DATE_FORMAT)
        )));
    }
    Ok(Some(date.format(DATE_FORMAT).to_string()))
}

/// Due date to store after an edit. `clear` drops it, a new value is validated
/// like a fresh entry, and otherwise the current text is kept unchecked, even
/// when it already lies in the past.
pub fn resolve_edited_due_date(
    current: Option<&str>,
    new: Option<&str>,
    clear: bool,
    today: NaiveDate,
) -> Result<Option<String>> {
    if clear {
        return Ok(None);
    }
    match new {
        Some(_) => parse_due_date(new, today),
        None => Ok(current.map(str::to_string)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_require_name() {
        assert!(require_name("List name", "Groceries").is_ok());
        assert!(matches!(require_name("List name", ""), Err(Error::Validation(_))));
        assert!(matches!(require_name("List name", " \t "), Err(Error::Validation(_))));
    }

    #[test]
    fn test_stored_date_must_be_exact() {
        assert_eq!(parse_stored_date("2025-06-15"), Some(day(2025, 6, 15)));
        assert_eq!(parse_stored_date("2025-6-15"), None);
        assert_eq!(parse_stored_date(" 2025-06-15 "), None);
        assert_eq!(parse_stored_date("2025-02-30"), None);
        assert_eq!(parse_stored_date("soon"), None);
    }

    #[test]
    fn test_due_date_absent() {
        let today = day(2025, 6, 15);
        assert_eq!(parse_due_date(None, today).unwrap(), None);
        assert_eq!(parse_due_date(Some("  "), today).unwrap(), None);
    }

    #[test]
    fn test_due_date_today_and_future_accepted() {
        let today = day(2025, 6, 15);
        assert_eq!(
            parse_due_date(Some("2025-06-15"), today).unwrap().as_deref(),
            Some("2025-06-15")
        );
        assert_eq!(
            parse_due_date(Some(" 2025-12-01 "), today).unwrap().as_deref(),
            Some("2025-12-01")
        );
    }

    #[test]
    fn test_due_date_in_past_rejected() {
        let today = day(2025, 6, 15);
        let err = parse_due_date(Some("2025-06-14"), today).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn test_due_date_malformed() {
        let today = day(2025, 6, 15);
        assert!(matches!(
            parse_due_date(Some("15/06/2025"), today),
            Err(Error::InvalidDate(_))
        ));
        assert!(matches!(
            parse_due_date(Some("2025-02-30"), today),
            Err(Error::InvalidDate(_))
        ));
    }

    #[test]
    fn test_edit_keeps_current_due_date() {
        let today = day(2025, 6, 15);
        assert_eq!(
            resolve_edited_due_date(Some("2025-01-01"), None, false, today).unwrap().as_deref(),
            Some("2025-01-01")
        );
        assert_eq!(resolve_edited_due_date(None, None, false, today).unwrap(), None);
    }

    #[test]
    fn test_edit_replaces_or_clears_due_date() {
        let today = day(2025, 6, 15);
        assert_eq!(
            resolve_edited_due_date(Some("2025-01-01"), Some("2025-07-01"), false, today)
                .unwrap()
                .as_deref(),
            Some("2025-07-01")
        );
        assert_eq!(
            resolve_edited_due_date(Some("2025-07-01"), None, true, today).unwrap(),
            None
        );
    }

    #[test]
    fn test_edit_rejects_new_past_due_date() {
        let today = day(2025, 6, 15);
        assert!(matches!(
            resolve_edited_due_date(Some("2025-07-01"), Some("2025-06-01"), false, today),
            Err(Error::Validation(_))
        ));
        assert!(matches!(
            resolve_edited_due_date(None, Some("June"), false, today),
            Err(Error::InvalidDate(_))
        ));
    }
}
