//! Date-of-birth normalization.
//!
//! Clients send `YEAR-MONTH-DAY` with a 1-based month. The stored form is a
//! `NaiveDate`, written to SQLite and JSON as ISO-8601 `YYYY-MM-DD`.

use chrono::NaiveDate;

use crate::service::StaffError;

/// Parse an optional `YEAR-MONTH-DAY` string.
///
/// Missing or blank input yields `Ok(None)`. Anything else must name a real
/// calendar date; out-of-range days are rejected rather than rolled into the
/// following month.
pub fn normalize_date(input: Option<&str>) -> Result<Option<NaiveDate>, StaffError> {
    let raw = match input.map(str::trim) {
        None | Some("") => return Ok(None),
        Some(raw) => raw,
    };

    let parts: Vec<&str> = raw.split('-').collect();
    let [year, month, day] = parts.as_slice() else {
        return Err(malformed(raw, "expected YEAR-MONTH-DAY"));
    };

    let year: i32 = component(raw, year, "year")?;
    let month: u32 = component(raw, month, "month")?;
    let day: u32 = component(raw, day, "day")?;

    NaiveDate::from_ymd_opt(year, month, day)
        .map(Some)
        .ok_or_else(|| malformed(raw, "no such calendar date"))
}

fn component<T: std::str::FromStr>(raw: &str, part: &str, what: &str) -> Result<T, StaffError> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return Err(malformed(raw, &format!("{} is not a number", what)));
    }
    part.parse()
        .map_err(|_| malformed(raw, &format!("{} is out of range", what)))
}

fn malformed(raw: &str, reason: &str) -> StaffError {
    StaffError::MalformedDate(format!("'{}': {}", raw, reason))
}
