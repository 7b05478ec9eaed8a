//! Tests for request handling, assembly and persistence

use super::{MockFailure, MockProvider, codes, holiday, utc};
use crate::app::adapters::filesystem::JsonFileStore;
use crate::app::models::{CountryHolidaysRequest, render_listing};
use crate::app::services::date_filter::parse_offset_instant;
use crate::app::services::holiday_service::{HolidayService, validate_request};
use crate::app::services::range_fetcher::RangeFetcher;
use crate::constants::DEFAULT_DATE_FORMAT;
use crate::{Error, ErrorKind};
use serde_json::json;
use tempfile::TempDir;

fn service(provider: MockProvider, temp_dir: &TempDir) -> HolidayService<MockProvider> {
    HolidayService::new(
        RangeFetcher::new(provider, 4),
        JsonFileStore::new(temp_dir.path()),
        DEFAULT_DATE_FORMAT,
    )
}

fn summer_2024(countries: &[&str]) -> CountryHolidaysRequest {
    CountryHolidaysRequest::new(
        codes(countries),
        utc(2024, 6, 24, 11, 26, 23),
        utc(2024, 9, 24, 11, 26, 23),
    )
}

fn ua_and_fr() -> MockProvider {
    MockProvider::new()
        .with_year(
            "ua",
            2024,
            vec![
                holiday("ua", "Constitution Day", "2024-06-28"),
                holiday("ua", "Independence Day", "2024-08-24"),
                holiday("ua", "Christmas Day", "2024-12-25"),
            ],
        )
        .with_year(
            "fr",
            2024,
            vec![
                holiday("fr", "Bastille Day", "2024-07-14"),
                holiday("fr", "Assumption of Mary", "2024-08-15"),
                holiday("fr", "Armistice Day", "2024-11-11"),
            ],
        )
}

#[tokio::test]
async fn test_handle_groups_by_requested_country() {
    let temp_dir = TempDir::new().unwrap();
    let service = service(ua_and_fr(), &temp_dir);

    let holidays = service.handle(&summer_2024(&["UA", "FR"])).await.unwrap().holidays;

    assert_eq!(holidays.len(), 2);
    let ua: Vec<&str> = holidays["UA"].iter().map(|h| h.name.as_str()).collect();
    let fr: Vec<&str> = holidays["FR"].iter().map(|h| h.name.as_str()).collect();
    assert_eq!(ua, vec!["Constitution Day", "Independence Day"]);
    assert_eq!(fr, vec!["Bastille Day", "Assumption of Mary"]);
    assert_eq!(service.provider().calls().len(), 2);
}

#[tokio::test]
async fn test_handle_persists_the_returned_listing() {
    let temp_dir = TempDir::new().unwrap();
    let service = service(ua_and_fr(), &temp_dir);

    let listing = service.handle(&summer_2024(&["UA", "FR"])).await.unwrap();

    let path = temp_dir.path().join("UA_FR_holidays.json");
    assert_eq!(listing.saved_to, path);
    let persisted: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(persisted, listing.rendered);
    assert_eq!(
        listing.rendered,
        render_listing(&listing.holidays, DEFAULT_DATE_FORMAT).unwrap()
    );
    assert_eq!(
        persisted["UA"][1]["date"]["datetime"],
        "2024-08-24T00:00:00+0000"
    );
}

#[tokio::test]
async fn test_country_without_matches_gets_empty_list() {
    let temp_dir = TempDir::new().unwrap();
    let provider = ua_and_fr().with_year("de", 2024, vec![holiday("de", "Unity", "2024-10-03")]);
    let service = service(provider, &temp_dir);

    let holidays = service.handle(&summer_2024(&["ua", "DE"])).await.unwrap().holidays;

    assert_eq!(holidays["ua"].len(), 2);
    assert!(holidays["DE"].is_empty());
}

#[tokio::test]
async fn test_wrong_country_entries_are_dropped() {
    let temp_dir = TempDir::new().unwrap();
    let provider = MockProvider::new().with_year(
        "ua",
        2024,
        vec![
            holiday("UA", "Independence Day", "2024-08-24"),
            holiday("pl", "Assumption Day", "2024-08-15"),
        ],
    );
    let service = service(provider, &temp_dir);

    let holidays = service.handle(&summer_2024(&["ua"])).await.unwrap().holidays;

    assert_eq!(holidays.len(), 1);
    assert_eq!(holidays["ua"].len(), 1);
    assert_eq!(holidays["ua"][0].name, "Independence Day");
}

#[tokio::test]
async fn test_offset_request_inside_one_year_queries_once() {
    let temp_dir = TempDir::new().unwrap();
    let service = service(ua_and_fr(), &temp_dir);
    let request = CountryHolidaysRequest::new(
        codes(&["UA"]),
        parse_offset_instant("2024-01-01T00:30:00+02:00").unwrap(),
        parse_offset_instant("2024-09-01T00:00:00+02:00").unwrap(),
    );

    let holidays = service.handle(&request).await.unwrap().holidays;

    assert_eq!(service.provider().calls_for("UA"), vec![2024]);
    assert_eq!(holidays["UA"].len(), 2);
}

#[tokio::test]
async fn test_no_matches_is_empty_result() {
    let temp_dir = TempDir::new().unwrap();
    let service = service(MockProvider::new(), &temp_dir);

    let err = service.handle(&summer_2024(&["UA", "FR"])).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::EmptyResult);
    assert_eq!(err.status_code(), 404);
    assert_eq!(std::fs::read_dir(temp_dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn test_missing_date_iso_is_server_error() {
    let temp_dir = TempDir::new().unwrap();
    let mut broken = holiday("ua", "Broken", "2024-07-01");
    broken["date"].as_object_mut().unwrap().remove("iso");
    let service = service(MockProvider::new().with_year("ua", 2024, vec![broken]), &temp_dir);

    let err = service.handle(&summer_2024(&["UA"])).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::MissingField);
    assert_eq!(err.status_code(), 500);
    assert!(err.detail().contains("date.iso"));
}

#[tokio::test]
async fn test_malformed_field_is_bad_request() {
    let temp_dir = TempDir::new().unwrap();
    let mut odd = holiday("fr", "Regional", "2024-07-01");
    odd["states"] = json!([{ "abbrev": "ARA" }]);
    let service = service(MockProvider::new().with_year("fr", 2024, vec![odd]), &temp_dir);

    let err = service.handle(&summer_2024(&["FR"])).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Parse);
    assert_eq!(err.status_code(), 400);
}

#[tokio::test]
async fn test_missing_key_in_mapped_entry_is_server_error() {
    let temp_dir = TempDir::new().unwrap();
    let mut partial = holiday("fr", "Regional", "2024-07-01");
    partial.as_object_mut().unwrap().remove("canonical_url");
    let service = service(MockProvider::new().with_year("fr", 2024, vec![partial]), &temp_dir);

    let err = service.handle(&summer_2024(&["FR"])).await.unwrap_err();

    match err {
        Error::MissingField { ref field } => assert_eq!(field, "canonical_url"),
        ref other => panic!("Expected MissingField, got {:?}", other),
    }
    assert_eq!(err.status_code(), 500);
}

#[tokio::test]
async fn test_upstream_status_error_carries_upstream_text() {
    let temp_dir = TempDir::new().unwrap();
    let provider =
        ua_and_fr().with_failure("fr", 2024, MockFailure::Status(503, "Service Unavailable"));
    let service = service(provider, &temp_dir);

    let err = service.handle(&summer_2024(&["UA", "FR"])).await.unwrap_err();

    assert_eq!(err.status_code(), 500);
    assert!(err.detail().starts_with("HTTP error occurred: "));
    assert!(err.detail().contains("Service Unavailable"));
}

#[tokio::test]
async fn test_upstream_timeout_and_transport_statuses() {
    let temp_dir = TempDir::new().unwrap();
    let timeout = service(
        MockProvider::new().with_failure("ua", 2024, MockFailure::Timeout),
        &temp_dir,
    );
    let transport = service(
        MockProvider::new().with_failure("ua", 2024, MockFailure::Transport),
        &temp_dir,
    );

    let err = timeout.handle(&summer_2024(&["UA"])).await.unwrap_err();
    assert_eq!(err.status_code(), 504);

    let err = transport.handle(&summer_2024(&["UA"])).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Transport);
    assert_eq!(err.status_code(), 500);
}

#[tokio::test]
async fn test_duplicate_codes_are_fetched_once() {
    let temp_dir = TempDir::new().unwrap();
    let service = service(ua_and_fr(), &temp_dir);

    let holidays = service
        .handle(&summer_2024(&["UA", "ua", "FR"]))
        .await
        .unwrap()
        .holidays;

    assert_eq!(holidays.keys().collect::<Vec<_>>(), vec!["FR", "UA"]);
    assert_eq!(service.provider().calls_for("UA"), vec![2024]);
    assert!(temp_dir.path().join("UA_FR_holidays.json").exists());
}

#[tokio::test]
async fn test_persistence_failure_is_reported() {
    let temp_dir = TempDir::new().unwrap();
    let blocker = temp_dir.path().join("occupied");
    std::fs::write(&blocker, "not a directory").unwrap();
    let service = HolidayService::new(
        RangeFetcher::new(ua_and_fr(), 4),
        JsonFileStore::new(blocker.join("data")),
        DEFAULT_DATE_FORMAT,
    );

    let err = service.handle(&summer_2024(&["UA"])).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Persistence);
    assert_eq!(err.status_code(), 500);
}

#[test]
fn test_validate_rejects_empty_country_list() {
    let request = summer_2024(&[]);
    assert!(matches!(
        validate_request(&request),
        Err(Error::InvalidRequest { .. })
    ));
}

#[test]
fn test_validate_rejects_reversed_window() {
    let request = CountryHolidaysRequest::new(
        codes(&["UA"]),
        utc(2024, 9, 24, 0, 0, 0),
        utc(2024, 6, 24, 0, 0, 0),
    );
    assert!(matches!(
        validate_request(&request),
        Err(Error::InvalidRequest { .. })
    ));
}

#[test]
fn test_validate_rejects_path_like_codes() {
    for code in ["../etc", "U A", "", "UA/FR", "ABCDEFGHIJK"] {
        let request = summer_2024(&[code]);
        assert!(validate_request(&request).is_err(), "accepted {:?}", code);
    }
}

#[test]
fn test_validate_accepts_subdivision_codes() {
    let request = summer_2024(&["US-CA", "fr"]);
    assert_eq!(validate_request(&request).unwrap(), vec!["US-CA", "fr"]);
}
