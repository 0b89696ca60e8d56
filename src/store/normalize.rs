use chrono::{FixedOffset, Offset, TimeZone, Utc, Weekday};
use chrono_tz::Tz;

use crate::model::{PriceInterval, RawRateSpec, TimeOfDay};

use super::table::RateTable;
use super::NormalizeError;

/// Expand raw rate specs into a full [`RateTable`].
///
/// Each spec's day-set is split on `,` and one interval is inserted per
/// weekday. Insertion order matters: a spec later in the list overwrites the
/// overlapping portion of anything inserted before it. Any malformed spec
/// aborts the whole normalization; no partial table escapes.
///
/// The zone's UTC offset is resolved against the current instant, not the
/// instant being queried later — wrong across DST transitions, kept as a known
/// limitation of the format.
pub fn normalize(specs: &[RawRateSpec]) -> Result<RateTable, NormalizeError> {
    let now = Utc::now().naive_utc();
    let mut table = RateTable::default();
    for spec in specs {
        let tz: Tz = spec
            .tz
            .parse()
            .map_err(|_| NormalizeError::InvalidTimezone(spec.tz.clone()))?;
        let offset = tz.offset_from_utc_datetime(&now).fix();
        let (lower, upper) = parse_time_range(&spec.times, offset)?;
        for token in spec.days.split(',') {
            let weekday = weekday_from_token(token)
                .ok_or_else(|| NormalizeError::InvalidDayToken(token.to_string()))?;
            table.insert(weekday, PriceInterval::new(lower, upper, spec.price));
        }
    }
    Ok(table)
}

/// Parse `HHMM-HHMM` into a pair of bounds at the given offset.
fn parse_time_range(
    times: &str,
    offset: FixedOffset,
) -> Result<(TimeOfDay, TimeOfDay), NormalizeError> {
    let malformed = || NormalizeError::InvalidTimeRange(times.to_string());
    let (start, end) = times.split_once('-').ok_or_else(malformed)?;
    let lower = parse_hhmm(start).ok_or_else(malformed)?;
    let upper = parse_hhmm(end).ok_or_else(malformed)?;
    let lower = TimeOfDay::new(lower.0, lower.1, offset);
    let upper = TimeOfDay::new(upper.0, upper.1, offset);
    // Ranges are within one day; an inverted or empty range is malformed.
    if lower >= upper {
        return Err(malformed());
    }
    Ok((lower, upper))
}

fn parse_hhmm(s: &str) -> Option<(u32, u32)> {
    if s.len() != 4 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let hour: u32 = s[..2].parse().ok()?;
    let minute: u32 = s[2..].parse().ok()?;
    if hour > 23 || minute > 59 {
        return None;
    }
    Some((hour, minute))
}

/// The recognized day-set abbreviations — exactly these spellings.
pub fn weekday_from_token(token: &str) -> Option<Weekday> {
    match token {
        "mon" => Some(Weekday::Mon),
        "tues" => Some(Weekday::Tue),
        "wed" => Some(Weekday::Wed),
        "thurs" => Some(Weekday::Thu),
        "fri" => Some(Weekday::Fri),
        "sat" => Some(Weekday::Sat),
        "sun" => Some(Weekday::Sun),
        _ => None,
    }
}
