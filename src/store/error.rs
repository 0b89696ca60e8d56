#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NormalizeError {
    InvalidDayToken(String),
    InvalidTimeRange(String),
    InvalidTimezone(String),
}

impl std::fmt::Display for NormalizeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NormalizeError::InvalidDayToken(token) => {
                write!(f, "unknown day of week: {token:?}")
            }
            NormalizeError::InvalidTimeRange(times) => {
                write!(f, "malformed time range (expected HHMM-HHMM): {times:?}")
            }
            NormalizeError::InvalidTimezone(tz) => {
                write!(f, "unresolvable timezone: {tz:?}")
            }
        }
    }
}

impl std::error::Error for NormalizeError {}
