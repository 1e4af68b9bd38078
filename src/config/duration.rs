use std::time::Duration;

use crate::errors::{GatorError, GatorResult};

/// Parse a duration such as `30s`, `1m`, `1h30m`, `1.5s` or `250ms`.
/// The result must be positive.
pub fn parse_interval(input: &str) -> GatorResult<Duration> {
    let invalid = || GatorError::InvalidDuration(input.to_string());
    let mut rest = input.trim();
    if rest.is_empty() {
        return Err(invalid());
    }

    let mut total_ms = 0f64;
    while !rest.is_empty() {
        let number_len = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .ok_or_else(invalid)?;
        if number_len == 0 {
            return Err(invalid());
        }
        let value: f64 = rest[..number_len].parse().map_err(|_| invalid())?;
        rest = &rest[number_len..];

        let unit_len = rest
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(rest.len());
        let ms_per_unit = match &rest[..unit_len] {
            "ms" => 1.0,
            "s" => 1_000.0,
            "m" => 60_000.0,
            "h" => 3_600_000.0,
            _ => return Err(invalid()),
        };
        rest = &rest[unit_len..];

        total_ms += value * ms_per_unit;
    }

    let interval = Duration::try_from_secs_f64(total_ms / 1_000.0).map_err(|_| invalid())?;
    if interval.is_zero() {
        return Err(invalid());
    }

    Ok(interval)
}
