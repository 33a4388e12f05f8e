//! # Shift Clock
//!
//! Converts between the scheduler's `i64` Unix-second timestamps and the
//! `YYYY-MM-DD HH:MM` local-time labels used on screen and in the CSV file.
//!
//! ## Rollover
//! A slot's end label is computed on the local wall clock: the start's local
//! date and time plus [`DUTY_HOURS`], normalised by `chrono` across day, month
//! and year boundaries. `2024-01-31 16:00` therefore ends at `2024-02-01 00:00`.
//!
//! ## Failure Handling
//! Rendering never fails. A timestamp that has no single local representation
//! renders as [`UNAVAILABLE`] so one bad slot cannot abort a whole table.

use std::ops::Range;

use chrono::{Days, Duration, Local, LocalResult, NaiveDate, NaiveDateTime, TimeZone};

/// Length of one duty block in hours
pub const DUTY_HOURS: i64 = 8;

/// Length of one duty block in seconds
pub const DUTY_BLOCK_SECS: i64 = DUTY_HOURS * 3600;

/// Label format shared by the table and the CSV file
pub const LABEL_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Placeholder for a timestamp the platform cannot render
pub const UNAVAILABLE: &str = "N/A";

/// Timestamp of today's local midnight.
///
/// On the rare day where midnight falls into a DST gap, the earliest valid
/// instant after the naive midnight is used; failing that, the current time.
pub fn today_at_midnight() -> i64 {
    let now = Local::now();
    now.date_naive()
        .and_hms_opt(0, 0, 0)
        .and_then(resolve_local)
        .unwrap_or_else(|| now.timestamp())
}

/// Start and end labels of the slot beginning at `start`.
///
/// Both labels are [`UNAVAILABLE`] when `start` cannot be converted to local
/// time; the end label alone is when the 8-hour addition overflows.
pub fn slot_labels(start: i64) -> (String, String) {
    let local = match Local.timestamp_opt(start, 0) {
        LocalResult::Single(dt) => dt,
        LocalResult::Ambiguous(earliest, _) => earliest,
        LocalResult::None => return (UNAVAILABLE.to_string(), UNAVAILABLE.to_string()),
    };

    let start_label = local.format(LABEL_FORMAT).to_string();
    let end_label = local
        .naive_local()
        .checked_add_signed(Duration::hours(DUTY_HOURS))
        .map(|end| end.format(LABEL_FORMAT).to_string())
        .unwrap_or_else(|| UNAVAILABLE.to_string());

    (start_label, end_label)
}

/// Render a single timestamp as a local label.
pub fn format_label(timestamp: i64) -> String {
    slot_labels(timestamp).0
}

/// Parse a `YYYY-MM-DD HH:MM` local label back into a timestamp.
///
/// Only the first 16 characters are considered, so trailing seconds or
/// whitespace are tolerated. Each number sits at a fixed position and must be
/// all digits. Years before 1900 are rejected. Any day from 1 to 31 is
/// accepted and overflow rolls into the next month: `2024-02-30 08:00` is
/// read as `2024-03-01 08:00`.
pub fn parse_label(text: &str) -> Option<i64> {
    let head = text.get(..16)?;
    let number = |columns: Range<usize>| -> Option<u32> {
        let digits = head.get(columns)?;
        if !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        digits.parse().ok()
    };

    let year = number(0..4)?;
    let month = number(5..7)?;
    let day = number(8..10)?;
    let hour = number(11..13)?;
    let minute = number(14..16)?;
    if year < 1900
        || !(1..=12).contains(&month)
        || !(1..=31).contains(&day)
        || hour > 23
        || minute > 59
    {
        return None;
    }

    let date = NaiveDate::from_ymd_opt(i32::try_from(year).ok()?, month, 1)?
        .checked_add_days(Days::new(u64::from(day - 1)))?;
    resolve_local(date.and_hms_opt(hour, minute, 0)?)
}

/// Map a naive local date-time to a Unix timestamp.
fn resolve_local(naive: NaiveDateTime) -> Option<i64> {
    match Local.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Some(dt.timestamp()),
        LocalResult::Ambiguous(earliest, _) => Some(earliest.timestamp()),
        // Skipped by a DST jump; move forward into valid time like mktime does
        LocalResult::None => Local
            .from_local_datetime(&(naive + Duration::hours(1)))
            .earliest()
            .map(|dt| dt.timestamp()),
    }
}
