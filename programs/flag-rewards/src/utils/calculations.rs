// utils/calculations.rs
use crate::constants::*;

/// Calendar day number (days since the epoch) of `timestamp` in a zone that is
/// `utc_offset_seconds` ahead of UTC
pub fn calendar_day(timestamp: i64, utc_offset_seconds: i64) -> i64 {
    timestamp
        .saturating_add(utc_offset_seconds)
        .div_euclid(SECONDS_PER_DAY)
}

/// Whole minutes left until `last_guess_at + cooldown`, rounded up.
/// Zero once the cooldown has elapsed.
pub fn cooldown_wait_minutes(last_guess_at: i64, now: i64, cooldown_seconds: i64) -> u32 {
    let elapsed = now.saturating_sub(last_guess_at);
    let remaining = cooldown_seconds.saturating_sub(elapsed);
    if remaining <= 0 {
        return 0;
    }

    let minutes = remaining / SECONDS_PER_MINUTE + i64::from(remaining % SECONDS_PER_MINUTE != 0);
    u32::try_from(minutes).unwrap_or(u32::MAX)
}
