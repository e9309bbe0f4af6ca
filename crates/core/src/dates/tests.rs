use super::*;
use time::macros::date;

#[test]
fn parse_iso_accepts_normalized_dates() {
    assert_eq!(parse_iso("2024-01-31").unwrap(), date!(2024 - 01 - 31));
    assert_eq!(parse_iso(" 2024-12-01 ").unwrap(), date!(2024 - 12 - 01));
}

#[test]
fn parse_iso_rejects_everything_else() {
    assert_eq!(parse_iso("").unwrap_err(), DateError::Empty);
    assert_eq!(parse_iso("   ").unwrap_err(), DateError::Empty);
    assert_eq!(parse_iso("31/01/2024").unwrap_err(), DateError::InvalidFormat);
    assert_eq!(parse_iso("2024-1-31").unwrap_err(), DateError::InvalidFormat);
    assert_eq!(parse_iso("2024-02-30").unwrap_err(), DateError::InvalidFormat);
    assert_eq!(
        parse_iso("2024-01-31T00:00:00").unwrap_err(),
        DateError::InvalidFormat
    );
}

#[test]
fn format_iso_round_trips() {
    let day = date!(2023 - 07 - 04);
    assert_eq!(format_iso(day), "2023-07-04");
    assert_eq!(parse_iso(&format_iso(day)).unwrap(), day);
}

#[test]
fn days_between_is_signed() {
    assert_eq!(
        days_between(date!(2024 - 01 - 01), date!(2024 - 02 - 01)),
        31
    );
    assert_eq!(
        days_between(date!(2024 - 02 - 01), date!(2024 - 01 - 01)),
        -31
    );
    assert_eq!(
        days_between(date!(2024 - 06 - 15), date!(2024 - 06 - 15)),
        0
    );
}

#[test]
fn days_between_crosses_year_boundaries() {
    assert_eq!(
        days_between(date!(2023 - 12 - 15), date!(2024 - 01 - 15)),
        31
    );
}
