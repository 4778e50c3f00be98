use serde::Serializer;
use serde::ser::Error as _;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, Duration, Month, OffsetDateTime};

/// Renders as `"Thu May 04 2023"`.
const CALENDAR_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[weekday repr:short] [month repr:short] [day] [year]");

/// Parses a loose `YYYY-M-D` date.
///
/// Parts need not be zero padded. Out-of-range months and days roll over
/// the way calendar arithmetic does: `2023-13-1` is 2024-01-01 and
/// `2023-2-30` is 2023-03-02. Parts after the third are ignored.
///
/// # Errors
/// Returns a message if there are fewer than three dash-separated integer
/// parts, or the rolled-over date falls outside the supported range.
pub fn parse_date(input: &str) -> Result<Date, String> {
    let mut parts = input.split('-').map(str::trim);
    let (Some(year), Some(month), Some(day)) = (parts.next(), parts.next(), parts.next()) else {
        return Err(format!("Invalid date '{input}': expected YYYY-MM-DD"));
    };

    let invalid = || format!("Invalid date '{input}': expected YYYY-MM-DD");
    let year: i32 = year.parse().map_err(|_| invalid())?;
    let month: i32 = month.parse().map_err(|_| invalid())?;
    let day: i32 = day.parse().map_err(|_| invalid())?;

    rollover_date(year, month, day).ok_or_else(|| format!("Date '{input}' is out of range"))
}

/// Builds a date from a 1-based month and day, letting either overflow into the next unit.
fn rollover_date(year: i32, month: i32, day: i32) -> Option<Date> {
    let months = i64::from(year) * 12 + i64::from(month) - 1;
    let year = i32::try_from(months.div_euclid(12)).ok()?;
    let month = Month::try_from(u8::try_from(months.rem_euclid(12) + 1).ok()?).ok()?;

    let first = Date::from_calendar_date(year, month, 1).ok()?;
    first.checked_add(Duration::days(i64::from(day) - 1))
}

/// The current calendar date in the server's local time zone.
///
/// Falls back to UTC when the local offset cannot be determined.
#[must_use]
pub fn today() -> Date {
    OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc()).date()
}

/// Formats a date as a human readable calendar string.
///
/// # Errors
/// Returns an error if the date cannot be represented with a four digit year.
pub fn to_calendar_string(date: Date) -> Result<String, time::error::Format> {
    date.format(CALENDAR_FORMAT)
}

pub(crate) fn serialize_calendar<S: Serializer>(date: &Date, serializer: S) -> Result<S::Ok, S::Error> {
    let rendered = to_calendar_string(*date).map_err(S::Error::custom)?;
    serializer.serialize_str(&rendered)
}
