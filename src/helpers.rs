use chrono::{
    DateTime, LocalResult, NaiveDate, NaiveDateTime, TimeDelta, TimeZone,
};
use serde::{de, Deserialize, Deserializer};

use crate::error::Error;

pub const MARKET_CAP_UNIT: f64 = 1_000_000.0;
pub const DATE_LABEL_FORMAT: &str = "%b %d, %y";
const MINUTES_PER_DAY: i64 = 24 * 60;

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(f64),
    Str(String),
}

/// Supply figures arrive as JSON numbers from the token list and as strings
/// from the metadata API. Empty strings and nulls become `None`.
pub fn deserialize_optional_number<'de, D>(
    deserializer: D,
) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<NumberOrString>::deserialize(deserializer)? {
        None => Ok(None),
        Some(NumberOrString::Number(n)) => Ok(Some(n)),
        Some(NumberOrString::Str(s)) => {
            let s = s.trim();
            if s.is_empty() {
                return Ok(None);
            }
            s.parse::<f64>().map(Some).map_err(de::Error::custom)
        },
    }
}

/// price × supply in millions, unrounded.
pub fn market_cap_in_millions(price: f64, supply: f64) -> f64 {
    price * supply / MARKET_CAP_UNIT
}

/// One decimal, rounded from the exact binary value with ties to even.
pub fn format_market_cap(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.1}", v),
        None => String::from("0"),
    }
}

pub fn format_supply(value: f64) -> String {
    value.to_string()
}

pub fn date_label(day: &NaiveDate) -> String {
    day.format(DATE_LABEL_FORMAT).to_string()
}

/// Calendar day of a unix timestamp as seen in `tz`.
pub fn timestamp_to_day<Tz: TimeZone>(
    timestamp: i64,
    tz: &Tz,
) -> Result<NaiveDate, Error> {
    let date_time = DateTime::from_timestamp(timestamp, 0).ok_or_else(|| {
        Error::DecodeDateTimeError(format!(
            "timestamp out of range: {}",
            timestamp
        ))
    })?;

    Ok(date_time.with_timezone(tz).date_naive())
}

/// Unix timestamp of midnight of `day` in `tz`.
pub fn day_start_timestamp<Tz: TimeZone>(
    day: &NaiveDate,
    tz: &Tz,
) -> Result<i64, Error> {
    let midnight = day.and_hms_opt(0, 0, 0).ok_or_else(|| {
        Error::DecodeDateTimeError(format!("invalid day: {}", day))
    })?;

    let local = first_valid_local(midnight, |date_time| {
        tz.from_local_datetime(date_time)
    })
    .ok_or_else(|| {
        Error::DecodeDateTimeError(format!("no valid local time on {}", day))
    })?;

    Ok(local.timestamp())
}

/// First instant at or after `start` that exists locally. A clock that jumps
/// forward over `start` resolves to the first minute after the gap.
fn first_valid_local<T, F>(start: NaiveDateTime, resolve: F) -> Option<T>
where
    F: Fn(&NaiveDateTime) -> LocalResult<T>,
{
    (0..MINUTES_PER_DAY).find_map(|minute| {
        resolve(&(start + TimeDelta::minutes(minute))).earliest()
    })
}
