use std::collections::HashMap;
use std::sync::Arc;
use std::time::SystemTime;

use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;
use url_query_encoder::{Date, DateEncodingStrategy, Error, QueryEncoder};

fn new_year_2001() -> Date {
    Date::from(Utc.with_ymd_and_hms(2001, 1, 1, 0, 0, 0).unwrap())
}

#[test]
fn iso8601_is_the_default() {
    let mut encoder = QueryEncoder::new();
    encoder.encode(&HashMap::from([("date", new_year_2001())]));

    assert_eq!(encoder.query(), "date=2001-01-01T00:00:00Z");
    // `:` is query-legal, so the encoded form is identical
    assert_eq!(encoder.percent_encoded_query(), "date=2001-01-01T00:00:00Z");
}

#[test]
fn iso8601_truncates_to_whole_seconds() {
    let date = Date(Utc.timestamp_millis_opt(978_307_200_500).unwrap());

    let mut encoder = QueryEncoder::new();
    encoder.encode(&HashMap::from([("date", date)]));

    assert_eq!(encoder.query(), "date=2001-01-01T00:00:00Z");
}

#[test]
fn seconds_since_epoch() {
    let mut encoder =
        QueryEncoder::new().date_encoding_strategy(DateEncodingStrategy::SecondsSinceEpoch);
    encoder.encode(&HashMap::from([("date", new_year_2001())]));

    assert_eq!(encoder.query(), "date=978307200.0");
}

#[test]
fn milliseconds_since_epoch() {
    let mut encoder =
        QueryEncoder::new().date_encoding_strategy(DateEncodingStrategy::MillisecondsSinceEpoch);
    encoder.encode(&HashMap::from([("date", new_year_2001())]));

    assert_eq!(encoder.query(), "date=978307200000");
}

#[test]
fn formatted() {
    let mut encoder = QueryEncoder::new()
        .date_encoding_strategy(DateEncodingStrategy::Formatted("%Y-%m-%d".to_owned()));
    encoder.encode(&HashMap::from([("date", new_year_2001())]));

    assert_eq!(encoder.query(), "date=2001-01-01");
}

#[test]
fn formatted_with_invalid_specifier_does_not_panic() {
    let mut encoder = QueryEncoder::new()
        .date_encoding_strategy(DateEncodingStrategy::Formatted("%Q".to_owned()));

    // The infallible entry point swallows the failure.
    encoder.encode(&HashMap::from([("date", new_year_2001())]));
    assert!(encoder.items().is_empty());

    // The fallible variant reports it.
    let err = encoder
        .try_encode(&HashMap::from([("date", new_year_2001())]))
        .unwrap_err();
    assert!(matches!(err, Error::InvalidDateFormat));
    assert!(encoder.items().is_empty());
}

#[test]
fn custom() {
    let strategy =
        DateEncodingStrategy::Custom(Arc::new(|date| format!("@{}", date.timestamp())));

    let mut encoder = QueryEncoder::new().date_encoding_strategy(strategy);
    encoder.encode(&HashMap::from([("date", new_year_2001())]));

    assert_eq!(encoder.query(), "date=@978307200");
}

#[test]
fn from_system_time() {
    let mut encoder = QueryEncoder::new();
    encoder.encode(&HashMap::from([("date", Date::from(SystemTime::UNIX_EPOCH))]));

    assert_eq!(encoder.query(), "date=1970-01-01T00:00:00Z");
}

#[test]
fn dates_in_arrays_respect_the_delimiter() {
    let dates = vec![
        Date::from(Utc.with_ymd_and_hms(2001, 1, 1, 0, 0, 0).unwrap()),
        Date::from(Utc.with_ymd_and_hms(2001, 1, 2, 0, 0, 0).unwrap()),
    ];

    let mut encoder = QueryEncoder::new()
        .explode(false)
        .delimiter("|")
        .date_encoding_strategy(DateEncodingStrategy::Formatted("%Y-%m-%d".to_owned()));
    encoder.encode(&HashMap::from([("date", dates)]));

    assert_eq!(encoder.query(), "date=2001-01-01|2001-01-02");
}
