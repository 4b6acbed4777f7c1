#![allow(clippy::unwrap_used)]
// End-to-end tests for `cipi_core::run` over file-backed documents.

use std::io::Write;
use std::path::Path;

use pretty_assertions::assert_eq;
use tempfile::NamedTempFile;

use cipi_core::{CoreError, DataSource, Invocation, OutputMode, RemoteSource};

// ── Helpers ─────────────────────────────────────────────────────────

const SCENARIO: &str =
    r#"{"queryResponse":{"entity":[{"devicesDTO":{"deviceName":"rtr1","ipAddress":"192.0.2.1"}}]}}"#;

fn write_doc(body: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(body.as_bytes()).unwrap();
    file
}

fn invocation(path: &Path, attributes: &[&str], mode: OutputMode) -> Invocation {
    Invocation {
        source: DataSource::File(path.to_path_buf()),
        attributes: attributes.iter().map(ToString::to_string).collect(),
        mode,
        header: true,
    }
}

// ── Scenarios ───────────────────────────────────────────────────────

#[tokio::test]
async fn test_selected_attributes_with_header() {
    let file = write_doc(SCENARIO);
    let out = cipi_core::run(&invocation(
        file.path(),
        &["deviceName", "ipAddress"],
        OutputMode::Csv,
    ))
    .await
    .unwrap();

    assert_eq!(out, "deviceName,ipAddress\nrtr1,192.0.2.1\n");
}

#[tokio::test]
async fn test_absent_attribute_gives_empty_row() {
    let file = write_doc(SCENARIO);
    let out = cipi_core::run(&invocation(file.path(), &["reachability"], OutputMode::Csv))
        .await
        .unwrap();

    assert_eq!(out, "reachability\n\n");
}

#[tokio::test]
async fn test_default_attributes_cover_whitelist() {
    let file = write_doc(SCENARIO);
    let out = cipi_core::run(&invocation(file.path(), &[], OutputMode::Csv))
        .await
        .unwrap();

    let mut lines = out.lines();
    assert_eq!(lines.next().unwrap(), cipi_core::DEVICE_ATTRIBUTES.join(","));
    let row = lines.next().unwrap();
    assert_eq!(row.split(',').count(), cipi_core::DEVICE_ATTRIBUTES.len());
    assert!(lines.next().is_none());
}

#[tokio::test]
async fn test_invalid_attribute_fails_before_loading() {
    // The file does not exist: validation must fail first.
    let inv = invocation(
        Path::new("/nonexistent/cipi.json"),
        &["bogusField"],
        OutputMode::Csv,
    );
    let err = cipi_core::run(&inv).await.unwrap_err();

    assert!(
        matches!(err, CoreError::InvalidAttributes { ref invalid, .. } if invalid == &["bogusField"]),
        "got {err:?}"
    );
}

#[tokio::test]
async fn test_invalid_attribute_fails_before_fetch() {
    let inv = Invocation {
        source: DataSource::Remote(RemoteSource::default()),
        attributes: vec!["deviceName".into(), "bogusField".into()],
        mode: OutputMode::Csv,
        header: true,
    };
    let err = cipi_core::run(&inv).await.unwrap_err();

    assert!(matches!(err, CoreError::InvalidAttributes { .. }), "got {err:?}");
}

#[tokio::test]
async fn test_header_suppressed() {
    let file = write_doc(SCENARIO);
    let mut inv = invocation(file.path(), &["deviceName"], OutputMode::Csv);
    inv.header = false;

    assert_eq!(cipi_core::run(&inv).await.unwrap(), "rtr1\n");
}

// ── Round trip ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_json_dump_round_trips_to_same_csv() {
    let source = write_doc(
        r#"{"queryResponse":{"@count":2,"entity":[
            {"devicesDTO":{"deviceName":"rtr1","ipAddress":"192.0.2.1","criticalAlarms":0}},
            {"devicesDTO":{"deviceName":"asa, edge","softwareVersion":"9.8(4)"}}
        ]}}"#,
    );
    let attrs = ["deviceName", "ipAddress", "criticalAlarms", "softwareVersion"];

    let direct = cipi_core::run(&invocation(source.path(), &attrs, OutputMode::Csv))
        .await
        .unwrap();
    let dumped = cipi_core::run(&invocation(source.path(), &attrs, OutputMode::DumpJson))
        .await
        .unwrap();

    let reloaded = write_doc(&dumped);
    let again = cipi_core::run(&invocation(reloaded.path(), &attrs, OutputMode::Csv))
        .await
        .unwrap();

    assert_eq!(direct, again);
    assert_eq!(
        direct,
        "deviceName,ipAddress,criticalAlarms,softwareVersion\n\
         rtr1,192.0.2.1,0,\n\
         \"asa, edge\",,,9.8(4)\n"
    );
}
