//! Spreadsheet date serials

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};

/// Days are counted from 1899-12-30 so that serials after February 1900
/// line up with the 1900 leap year bug.
fn epoch() -> Option<NaiveDateTime> {
    NaiveDate::from_ymd_opt(1899, 12, 30)?.and_hms_opt(0, 0, 0)
}

/// Convert a date serial to a date-time, rounded to the second.
pub fn serial_to_datetime(serial: f64) -> Option<NaiveDateTime> {
    if !serial.is_finite() {
        return None;
    }
    let seconds = (serial * 86_400.0).round() as i64;
    epoch()?.checked_add_signed(TimeDelta::try_seconds(seconds)?)
}

/// Display text of a date serial.
///
/// Serials below one are times of day (`HH:MM:SS`); whole serials are dates
/// (`dd.mm.yyyy`); anything else is `dd.mm.yyyy HH:MM`.
pub fn format_serial(serial: f64) -> Option<String> {
    let dt = serial_to_datetime(serial)?;
    let text = if serial < 1.0 {
        dt.format("%H:%M:%S").to_string()
    } else if dt.time() == chrono::NaiveTime::MIN {
        dt.format("%d.%m.%Y").to_string()
    } else {
        dt.format("%d.%m.%Y %H:%M").to_string()
    };
    Some(text)
}
