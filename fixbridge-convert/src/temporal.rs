/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Date, time and timestamp codec.
//!
//! Host values count from 2000-01-01T00:00:00 UTC:
//! - DATE: days, `YYYYMMDD` on the wire
//! - TIME: milliseconds since midnight, `HH:MM:SS[.sss]` on the wire
//! - TIMESTAMP: nanoseconds, `YYYYMMDD-HH:MM:SS.sss` on the wire
//!
//! All calendar arithmetic is done in UTC.

use arrayvec::ArrayString;
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use fixbridge_core::error::ValueError;
use std::fmt::Write;

/// Seconds between the Unix epoch and the host epoch.
pub const HOST_EPOCH_UNIX_SECS: i64 = 946_684_800;

/// `num_days_from_ce` of 2000-01-01.
const HOST_EPOCH_DAYS_FROM_CE: i32 = 730_120;

const NANOS_PER_SEC: i64 = 1_000_000_000;
const NANOS_PER_SEC_U32: u32 = 1_000_000_000;
const NANOS_PER_MILLI: u32 = 1_000_000;
const MILLIS_PER_DAY: i32 = 86_400_000;

const DATE_FORMAT: &str = "%Y%m%d";
const TIME_FORMAT: &str = "%H:%M:%S%.f";
const TIMESTAMP_FORMAT: &str = "%Y%m%d-%H:%M:%S%.f";

/// Text buffer large enough for any encoded temporal value.
pub type TemporalText = ArrayString<32>;

/// Parses `YYYYMMDD` into days since the host epoch.
///
/// # Errors
/// Returns `ValueError::Date` if the text is not a valid calendar date.
pub fn decode_date(text: &str) -> Result<i32, ValueError> {
    let date = NaiveDate::parse_from_str(text, DATE_FORMAT)
        .map_err(|_| ValueError::Date(text.to_string()))?;
    Ok(date.num_days_from_ce() - HOST_EPOCH_DAYS_FROM_CE)
}

/// Formats days since the host epoch as `YYYYMMDD`.
///
/// # Errors
/// Returns `ValueError::Date` if the day count is outside the calendar range.
pub fn encode_date(days: i32) -> Result<TemporalText, ValueError> {
    let date = days
        .checked_add(HOST_EPOCH_DAYS_FROM_CE)
        .and_then(NaiveDate::from_num_days_from_ce_opt)
        .ok_or_else(|| ValueError::Date(days.to_string()))?;
    let mut buf = TemporalText::new();
    write!(buf, "{}", date.format(DATE_FORMAT)).map_err(|_| ValueError::Date(days.to_string()))?;
    Ok(buf)
}

/// Parses `HH:MM:SS` or `HH:MM:SS.sss` into milliseconds since midnight.
///
/// Leap seconds (`:60`) are rejected; the host range has no slot for them.
///
/// # Errors
/// Returns `ValueError::Time` if the text is not a valid time of day.
pub fn decode_time(text: &str) -> Result<i32, ValueError> {
    let time = NaiveTime::parse_from_str(text, TIME_FORMAT)
        .ok()
        .filter(|t| t.nanosecond() < NANOS_PER_SEC_U32)
        .ok_or_else(|| ValueError::Time(text.to_string()))?;
    let secs = time.num_seconds_from_midnight() as i32;
    let millis = (time.nanosecond() / NANOS_PER_MILLI) as i32;
    Ok(secs * 1000 + millis)
}

/// Formats milliseconds since midnight.
///
/// The fraction is written only when the millisecond part is non-zero.
///
/// # Errors
/// Returns `ValueError::Time` if the value is negative or a day or longer.
pub fn encode_time(millis: i32) -> Result<TemporalText, ValueError> {
    if !(0..MILLIS_PER_DAY).contains(&millis) {
        return Err(ValueError::Time(millis.to_string()));
    }
    let secs = (millis / 1000) as u32;
    let sub_millis = (millis % 1000) as u32;
    let time = NaiveTime::from_num_seconds_from_midnight_opt(secs, sub_millis * NANOS_PER_MILLI)
        .ok_or_else(|| ValueError::Time(millis.to_string()))?;
    let format = if sub_millis == 0 {
        "%H:%M:%S"
    } else {
        "%H:%M:%S%.3f"
    };
    let mut buf = TemporalText::new();
    write!(buf, "{}", time.format(format)).map_err(|_| ValueError::Time(millis.to_string()))?;
    Ok(buf)
}

/// Parses `YYYYMMDD-HH:MM:SS[.fff...]` into nanoseconds since the host epoch.
///
/// Up to nine fractional digits are kept. Leap seconds (`:60`) are rejected.
///
/// # Errors
/// Returns `ValueError::Timestamp` if the text is not a valid timestamp or
/// does not fit the host range.
pub fn decode_timestamp(text: &str) -> Result<i64, ValueError> {
    let err = || ValueError::Timestamp(text.to_string());
    let dt = NaiveDateTime::parse_from_str(text, TIMESTAMP_FORMAT)
        .ok()
        .filter(|dt| dt.nanosecond() < NANOS_PER_SEC_U32)
        .ok_or_else(err)?
        .and_utc();
    (dt.timestamp() - HOST_EPOCH_UNIX_SECS)
        .checked_mul(NANOS_PER_SEC)
        .and_then(|nanos| nanos.checked_add(i64::from(dt.timestamp_subsec_nanos())))
        .ok_or_else(err)
}

/// Formats nanoseconds since the host epoch.
///
/// Three fractional digits are written unless the value carries
/// sub-millisecond precision, in which case six or nine are written.
///
/// # Errors
/// Returns `ValueError::TimestampRange` if the value cannot be represented as
/// a calendar date.
pub fn encode_timestamp(nanos: i64) -> Result<TemporalText, ValueError> {
    let secs = nanos.div_euclid(NANOS_PER_SEC) + HOST_EPOCH_UNIX_SECS;
    let sub_nanos = nanos.rem_euclid(NANOS_PER_SEC) as u32;
    let dt = DateTime::from_timestamp(secs, sub_nanos).ok_or(ValueError::TimestampRange(nanos))?;
    let format = if sub_nanos % NANOS_PER_MILLI == 0 {
        "%Y%m%d-%H:%M:%S%.3f"
    } else if sub_nanos % 1_000 == 0 {
        "%Y%m%d-%H:%M:%S%.6f"
    } else {
        "%Y%m%d-%H:%M:%S%.9f"
    };
    let mut buf = TemporalText::new();
    write!(buf, "{}", dt.format(format)).map_err(|_| ValueError::TimestampRange(nanos))?;
    Ok(buf)
}
