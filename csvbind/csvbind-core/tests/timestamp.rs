use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use csvbind_core::{
    CoerceError, FormatError,
    timestamp::{
        DEFAULT_FORMAT, parse_timestamp, parse_with_format, reference_instant, render,
        validate_format,
    },
};

fn utc(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
}

fn midnight(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
        .and_utc()
}

#[test]
fn accepts_formats_with_date_components() {
    for format in [
        "%Y-%m-%d",
        "%Y-%m-%d %H:%M:%S",
        "%d/%m/%Y",
        "%d-%b-%Y",
        "%y-%m-%d",
        "%+",
        "%Y-%m-%dT%H:%M:%S%:z",
    ] {
        assert_eq!(validate_format(format), Ok(()), "{format}");
    }
}

#[test]
fn rejects_empty_format() {
    assert_eq!(validate_format(""), Err(FormatError::Empty));
}

#[test]
fn rejects_formats_without_year_month_day() {
    for format in ["2006", "invalid-format", "2007-01-02", "%Y", "%Y-%m", "%H:%M:%S"] {
        assert!(
            matches!(
                validate_format(format),
                Err(FormatError::MissingComponents { .. })
            ),
            "{format}"
        );
    }
}

#[test]
fn rejects_unknown_specifiers() {
    assert!(matches!(
        validate_format("%Y-%m-%d %Q"),
        Err(FormatError::UnsupportedSpecifier { .. })
    ));
}

#[test]
fn rejects_formats_that_lose_information_on_round_trip() {
    assert!(validate_format("%Y-%m-%d %H").is_err());
}

#[test]
fn accepted_formats_round_trip_the_reference_instant() {
    let format = "%Y-%m-%d %H:%M:%S";
    validate_format(format).unwrap();

    let rendered = render(&reference_instant(), format).unwrap();
    assert_eq!(rendered, "2006-01-02 15:04:05");
    assert_eq!(parse_with_format(&rendered, format).unwrap(), reference_instant());
}

#[test]
fn render_fails_on_unknown_specifier_instead_of_panicking() {
    assert!(render(&reference_instant(), "%Y %Q").is_err());
}

#[test]
fn date_only_format_parses_to_utc_midnight() {
    assert_eq!(
        parse_with_format("2024-01-01", DEFAULT_FORMAT).unwrap(),
        midnight(2024, 1, 1)
    );
}

#[test]
fn offset_format_converts_to_utc() {
    let instant = parse_with_format("2024-01-01T10:00:00+02:00", "%Y-%m-%dT%H:%M:%S%:z").unwrap();
    assert_eq!(instant, utc(2024, 1, 1, 8, 0, 0));
}

#[test]
fn effective_format_wins_when_it_parses() {
    let instant = parse_timestamp("2024-03-01 10:20:30", "%Y-%m-%d %H:%M:%S", DEFAULT_FORMAT)
        .unwrap();
    assert_eq!(instant, utc(2024, 3, 1, 10, 20, 30));
}

#[test]
fn fallback_result_is_normalized_to_default_format() {
    let instant = parse_timestamp("2024-03-01T10:20:30Z", DEFAULT_FORMAT, DEFAULT_FORMAT).unwrap();
    assert_eq!(instant, midnight(2024, 3, 1));
}

#[test]
fn fallback_keeps_time_when_default_format_has_it() {
    let instant = parse_timestamp(
        "Mon Jan 02 15:04:05 -0700 2006",
        "%d/%m/%Y",
        "%Y-%m-%d %H:%M:%S",
    )
    .unwrap();
    assert_eq!(instant, utc(2006, 1, 2, 22, 4, 5));
}

#[test]
fn fallback_recognizes_rfc2822() {
    let instant = parse_timestamp(
        "Mon, 02 Jan 2006 15:04:05 +0200",
        DEFAULT_FORMAT,
        "%Y-%m-%d %H:%M:%S",
    )
    .unwrap();
    assert_eq!(instant, utc(2006, 1, 2, 13, 4, 5));
}

#[test]
fn unparseable_text_reports_raw_and_effective_format() {
    let err = parse_timestamp("yesterday", "%d/%m/%Y", DEFAULT_FORMAT).unwrap_err();
    match err {
        CoerceError::Timestamp { raw, format, .. } => {
            assert_eq!(raw, "yesterday");
            assert_eq!(format, "%d/%m/%Y");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}
