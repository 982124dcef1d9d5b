use std::path::PathBuf;

use chrono::NaiveDate;
use csvbind::{ConstructionError, Decoder, FormatError, ReadError};

csvbind::record! {
    #[derive(Debug, Default, PartialEq)]
    struct Sample {
        string_field: String => "string_field",
        int_field: i64 => "int_field",
        float_field: f64 => "float_field",
        bool_field: bool => "bool_field",
        date_field: NaiveDate => "date_field",
        optional_field: Option<String> => "optional_field",
        ignored_field: String => "-",
    }
}

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_read_sample_rows() {
    let mut decoder = Decoder::open(fixture_path("sample.csv")).unwrap();
    assert_eq!(
        decoder.headers(),
        [
            "string_field",
            "int_field",
            "float_field",
            "bool_field",
            "date_field",
            "optional_field"
        ]
    );

    let first: Sample = decoder.read_next().unwrap().unwrap();
    assert_eq!(
        first,
        Sample {
            string_field: "value1".into(),
            int_field: 123,
            float_field: 45.67,
            bool_field: true,
            date_field: date(2024, 1, 1),
            optional_field: Some("optional".into()),
            ignored_field: String::new(),
        }
    );

    let second: Sample = decoder.read_next().unwrap().unwrap();
    assert_eq!(second.string_field, "value2");
    assert_eq!(second.int_field, -456);
    assert_eq!(second.float_field, 78.90);
    assert!(!second.bool_field);
    assert_eq!(second.date_field, date(2024, 2, 1));
    assert_eq!(second.optional_field, None);

    let third: Sample = decoder.read_next().unwrap().unwrap();
    assert_eq!(third.string_field, "value3");
    assert_eq!(third.int_field, 789);
    assert!(third.bool_field);
    assert_eq!(third.date_field, date(2024, 3, 1));
    assert_eq!(third.optional_field.as_deref(), Some("test"));

    assert!(decoder.read_next::<Sample>().unwrap().is_none());
    assert!(decoder.read_next::<Sample>().unwrap().is_none());
    assert_eq!(decoder.rows_read(), 3);

    decoder.close().unwrap();
}

#[test]
fn test_open_missing_file() {
    let err = Decoder::open(fixture_path("does-not-exist.csv")).unwrap_err();
    match err {
        ConstructionError::Open { path, .. } => assert!(path.ends_with("does-not-exist.csv")),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_open_empty_file() {
    let err = Decoder::open(fixture_path("empty.csv")).unwrap_err();
    assert!(matches!(err, ConstructionError::EmptyInput));
}

#[test]
fn test_invalid_default_format_is_rejected_and_kept() {
    let decoder = Decoder::open(fixture_path("sample.csv")).unwrap();

    let err = decoder
        .set_default_timestamp_format("invalid-format")
        .unwrap_err();
    assert!(matches!(err, FormatError::MissingComponents { .. }));
    assert_eq!(decoder.default_timestamp_format().as_str(), "%Y-%m-%d");

    for candidate in ["", "%Y", "2006"] {
        assert!(decoder.set_default_timestamp_format(candidate).is_err());
    }
    assert_eq!(decoder.default_timestamp_format().as_str(), "%Y-%m-%d");
}

#[test]
fn test_changed_default_format_applies_to_later_rows() {
    csvbind::record! {
        #[derive(Debug, Default)]
        struct Day {
            day: NaiveDate,
        }
    }

    let csv = "day\n2024-06-15\n16.06.2024\n";
    let mut decoder = Decoder::from_reader(csv.as_bytes()).unwrap();

    let first: Day = decoder.read_next().unwrap().unwrap();
    assert_eq!(first.day, date(2024, 6, 15));

    decoder.set_default_timestamp_format("%d.%m.%Y").unwrap();
    assert_eq!(decoder.default_timestamp_format().as_str(), "%d.%m.%Y");

    let second: Day = decoder.read_next().unwrap().unwrap();
    assert_eq!(second.day, date(2024, 6, 16));
}

#[test]
fn test_close_is_idempotent() {
    let mut decoder = Decoder::open(fixture_path("sample.csv")).unwrap();
    decoder.close().unwrap();
    decoder.close().unwrap();
    assert!(decoder.is_closed());
}

#[test]
fn test_read_after_close() {
    let mut decoder = Decoder::open(fixture_path("sample.csv")).unwrap();
    decoder.close().unwrap();

    let err = decoder.read_next::<Sample>().unwrap_err();
    assert!(matches!(err, ReadError::Closed));
    assert_eq!(decoder.records::<Sample>().count(), 0);
}

#[test]
fn test_short_row_names_the_field() {
    let csv = "string_field,int_field,float_field,bool_field\nvalue1,123\n";
    let mut decoder = Decoder::from_reader(csv.as_bytes()).unwrap();

    let err = decoder.read_next::<Sample>().unwrap_err();
    let ReadError::Decode { row, source } = &err else {
        panic!("unexpected error: {err:?}");
    };
    assert_eq!(*row, 1);
    assert_eq!(source.field(), "float_field");
    assert_eq!(err.as_decode_error().map(|e| e.field()), Some("float_field"));
}

#[test]
fn test_read_into_existing_record() {
    let mut decoder = Decoder::open(fixture_path("sample.csv")).unwrap();
    let mut record = Sample {
        ignored_field: "kept".into(),
        ..Sample::default()
    };

    assert!(decoder.read_into(&mut record).unwrap());
    assert_eq!(record.string_field, "value1");
    assert_eq!(record.ignored_field, "kept");

    // Empty cells leave the previous row's value in place.
    assert!(decoder.read_into(&mut record).unwrap());
    assert_eq!(record.string_field, "value2");
    assert_eq!(record.optional_field.as_deref(), Some("optional"));

    assert!(decoder.read_into(&mut record).unwrap());
    assert!(!decoder.read_into(&mut record).unwrap());
}

#[test]
fn test_records_iterator() {
    let mut decoder = Decoder::open(fixture_path("sample.csv")).unwrap();
    let records = decoder
        .records::<Sample>()
        .collect::<Result<Vec<_>, _>>()
        .unwrap();

    let names: Vec<_> = records.iter().map(|r| r.string_field.as_str()).collect();
    assert_eq!(names, ["value1", "value2", "value3"]);
    assert_eq!(decoder.rows_read(), 3);
}
