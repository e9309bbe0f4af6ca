#![forbid(unsafe_code)]

use time::Date;
use time::macros::format_description;

/// Calendar dates only. The model never carries a time component, so all
/// arithmetic is Julian-day arithmetic and immune to DST boundaries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DateError {
    Empty,
    InvalidFormat,
}

impl DateError {
    pub fn message(&self) -> &'static str {
        match self {
            Self::Empty => "date must not be empty",
            Self::InvalidFormat => "date must be YYYY-MM-DD",
        }
    }
}

impl std::fmt::Display for DateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for DateError {}

/// Accepts strictly `YYYY-MM-DD`; everything else is the boundary's job to
/// normalize first.
pub fn parse_iso(value: &str) -> Result<Date, DateError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DateError::Empty);
    }
    if trimmed.len() != 10 {
        return Err(DateError::InvalidFormat);
    }
    Date::parse(trimmed, format_description!("[year]-[month]-[day]"))
        .map_err(|_| DateError::InvalidFormat)
}

pub fn format_iso(date: Date) -> String {
    date.format(format_description!("[year]-[month]-[day]"))
        .unwrap_or_else(|_| "1970-01-01".to_string())
}

/// Signed day count from `from` to `to`; negative when `to` precedes `from`.
pub fn days_between(from: Date, to: Date) -> i64 {
    i64::from(to.to_julian_day()) - i64::from(from.to_julian_day())
}

#[cfg(test)]
mod tests;
