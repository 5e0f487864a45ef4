//! Weather epoch alignment and the target hash.
//!
//! In-game weather changes every 1400 real seconds (eight Eorzean bells). Each
//! epoch is hashed to a target in `0..100` from the Eorzean day count and the
//! bell the epoch starts on.

use chrono::{DateTime, Utc};

use crate::error::ForecastError;

/// Length of one weather epoch (23m20s).
pub const WEATHER_PERIOD_SECONDS: i64 = 1400;

/// One Eorzean hour in real seconds.
pub const BELL_SECONDS: i64 = 175;

/// One Eorzean day in real seconds.
pub const EORZEA_DAY_SECONDS: i64 = 4200;

/// Start of the weather epoch containing `instant + offset_seconds`.
///
/// Sub-second precision is discarded before aligning.
pub fn align_to_epoch_start(
    instant: DateTime<Utc>,
    offset_seconds: i64,
) -> Result<DateTime<Utc>, ForecastError> {
    let adjusted = instant
        .timestamp()
        .checked_add(offset_seconds)
        .ok_or_else(|| out_of_range(offset_seconds))?;
    let start = adjusted
        .checked_sub(adjusted.rem_euclid(WEATHER_PERIOD_SECONDS))
        .ok_or_else(|| out_of_range(offset_seconds))?;
    from_unix(start)
}

/// Weather target for the given instant. Any instant is accepted, aligned or not.
pub fn compute_target(instant: DateTime<Utc>) -> u8 {
    target_from_unix(instant.timestamp())
}

/// Target hash over whole unix seconds.
pub fn target_from_unix(unix_seconds: i64) -> u8 {
    let bell = unix_seconds.div_euclid(BELL_SECONDS);
    // bell of the next 8-bell boundary, wrapped to the day: 0, 8 or 16
    let increment = (bell + 8 - bell.rem_euclid(8)).rem_euclid(24);
    let total_days = unix_seconds.div_euclid(EORZEA_DAY_SECONDS);

    let calc_base = total_days.wrapping_mul(100).wrapping_add(increment) as u32;
    let step1 = calc_base.wrapping_shl(11) ^ calc_base;
    let step2 = (step1 >> 8) ^ step1;

    (step2 % 100) as u8
}

pub(crate) fn from_unix(unix_seconds: i64) -> Result<DateTime<Utc>, ForecastError> {
    DateTime::from_timestamp(unix_seconds, 0).ok_or_else(|| {
        ForecastError::Validation(format!(
            "unix time {unix_seconds} is outside the supported range"
        ))
    })
}

fn out_of_range(offset_seconds: i64) -> ForecastError {
    ForecastError::Validation(format!(
        "offset of {offset_seconds}s moves the instant outside the supported range"
    ))
}
