#![allow(clippy::unwrap_used)]
// How transport failures surface as `CoreError`s, against a wiremock server.

use std::time::Duration;

use secrecy::SecretString;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use cipi_api::{Credentials, DeviceQuery, PrimeClient, TransportConfig};
use cipi_core::CoreError;

const DEVICES_JSON_PATH: &str = "/webacs/api/v1/data/Devices.json";

fn client_for(server: &MockServer, timeout: Duration) -> PrimeClient {
    let transport = TransportConfig {
        timeout,
        ..TransportConfig::default()
    };
    PrimeClient::new(
        Url::parse(&server.uri()).unwrap(),
        Credentials::new("admin", SecretString::from("s3cret".to_owned())),
        &transport,
    )
    .unwrap()
}

#[tokio::test]
async fn test_timeout_is_connection_failed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(DEVICES_JSON_PATH))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
        .mount(&server)
        .await;

    let client = client_for(&server, Duration::from_millis(200));
    let err = client.devices(DeviceQuery::default()).await.unwrap_err();
    assert!(err.is_connect(), "got {err:?}");

    match CoreError::from(err) {
        CoreError::ConnectionFailed { url, .. } => assert!(url.contains("Devices.json")),
        other => panic!("expected ConnectionFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn test_redirect_is_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(DEVICES_JSON_PATH))
        .respond_with(ResponseTemplate::new(302).insert_header("location", "/login"))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, Duration::from_secs(5));
    let err = client.devices(DeviceQuery::default()).await.unwrap_err();

    assert!(
        matches!(CoreError::from(err), CoreError::Api { status: 302, .. }),
        "expected Api error for an unfollowed redirect"
    );
}
