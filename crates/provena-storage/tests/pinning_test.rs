//! Contract tests for the pinning client against the pinning-service API.
//!
//! | Method | Path | Test |
//! |--------|------|------|
//! | POST   | `/pinning/pinFileToIPFS` | `pin_bytes_*` |
//! | POST   | `/pinning/pinJSONToIPFS` | `pin_json_*` |

use provena_storage::{FetchError, Fetcher, PinningClient, PinningConfig, StorageGateway};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(server: &MockServer) -> PinningClient {
    let config = PinningConfig::new(server.uri().parse().unwrap(), "test-jwt");
    PinningClient::new(config).unwrap()
}

#[tokio::test]
async fn pin_bytes_returns_locator_and_sends_bearer_token() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/pinning/pinFileToIPFS"))
        .and(header("authorization", "Bearer test-jwt"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "IpfsHash": "QmYwAPJzv5CZsnA625s3Xf2nemtYgPpHdWEz79ojWnPbdG",
            "PinSize": 12,
            "Timestamp": "2024-01-15T18:00:00Z"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let locator = client
        .pin_bytes(b"hello world!".to_vec(), "knowledge.md")
        .await
        .unwrap();
    assert_eq!(
        locator.as_str(),
        "QmYwAPJzv5CZsnA625s3Xf2nemtYgPpHdWEz79ojWnPbdG"
    );
    assert_eq!(
        locator.to_uri(),
        "ipfs://QmYwAPJzv5CZsnA625s3Xf2nemtYgPpHdWEz79ojWnPbdG"
    );
}

#[tokio::test]
async fn pin_json_returns_locator() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/pinning/pinJSONToIPFS"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "IpfsHash": "QmTestJsonHash"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let locator = client
        .pin_json(&serde_json::json!({"title": "Soil Moisture"}), "metadata")
        .await
        .unwrap();
    assert_eq!(locator.as_str(), "QmTestJsonHash");
}

#[tokio::test]
async fn pin_bytes_surfaces_upstream_status_and_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/pinning/pinFileToIPFS"))
        .respond_with(ResponseTemplate::new(403).set_body_string("invalid credentials"))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let err = client
        .pin_bytes(b"data".to_vec(), "doc.json")
        .await
        .unwrap_err();
    match err {
        provena_storage::StorageError::Upload { status, body, .. } => {
            assert_eq!(status, 403);
            assert_eq!(body, "invalid credentials");
        }
        other => panic!("expected Upload error, got: {other}"),
    }
}

#[tokio::test]
async fn pin_json_rejects_missing_hash_field() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/pinning/pinJSONToIPFS"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "PinSize": 12
        })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let err = client
        .pin_json(&serde_json::json!({}), "metadata")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        provena_storage::StorageError::MalformedResponse { .. }
    ));
}

// -- Fetcher ----------------------------------------------------------------

#[tokio::test]
async fn fetch_bytes_returns_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ipfs/QmDoc"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"payload".to_vec()))
        .mount(&server)
        .await;

    let fetcher = Fetcher::new(5);
    let bytes = fetcher
        .fetch_bytes(&format!("{}/ipfs/QmDoc", server.uri()))
        .await
        .unwrap();
    assert_eq!(bytes, b"payload");
}

#[tokio::test]
async fn fetch_bytes_fails_on_non_2xx() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let fetcher = Fetcher::new(5);
    let err = fetcher
        .fetch_bytes(&format!("{}/missing", server.uri()))
        .await
        .unwrap_err();
    assert!(matches!(err, FetchError::Status { status: 404, .. }));
}

#[tokio::test]
async fn digest_remote_hashes_raw_bytes() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/doc"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"{}".to_vec()))
        .mount(&server)
        .await;

    let fetcher = Fetcher::new(5);
    let digest = fetcher
        .digest_remote(&format!("{}/doc", server.uri()))
        .await
        .unwrap();
    // SHA256("{}") known vector.
    assert_eq!(
        digest.to_hex(),
        "44136fa355b3678a1146ad16f7e8649e94fb4fc21fe77e8310c060f61caaff8a"
    );
}

#[tokio::test]
async fn fetch_json_rejects_invalid_json() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/bad"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let fetcher = Fetcher::new(5);
    let err = fetcher
        .fetch_json(&format!("{}/bad", server.uri()))
        .await
        .unwrap_err();
    assert!(matches!(err, FetchError::Decode { .. }));
}
