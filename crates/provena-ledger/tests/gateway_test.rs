//! Contract tests for `HttpLedgerClient` against the transaction gateway.
//!
//! | Method | Path | Test |
//! |--------|------|------|
//! | POST   | `/api/v1/ip/register` | `register_original_*` |
//! | POST   | `/api/v1/ip/derivative` | `register_derivative_*` |
//! | POST   | `/api/v1/license/mint` | `mint_license_*` |
//! | POST   | `/api/v1/royalty/pay` | `pay_royalty_*` |
//! | POST   | `/api/v1/royalty/claim` | `claim_all_*` |
//! | GET    | `/api/v1/ip/{id}/metadata` | `core_metadata_*` |

use provena_core::{AccountAddress, IpAssetId, LicenseTermsId, TokenAmount};
use provena_ledger::{
    ClaimRevenueRequest, ClaimableQuery, DerivativeBounds, HttpLedgerClient, IpMetadataBundle,
    LedgerClient, LedgerConfig, LedgerError, LicenseTermsSpec, MintLicenseRequest,
    PayRoyaltyRequest, RegisterDerivativeRequest, RegisterOriginalRequest,
};
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(server: &MockServer) -> HttpLedgerClient {
    let config = LedgerConfig::new(server.uri().parse().unwrap(), "test-token");
    HttpLedgerClient::new(config).unwrap()
}

fn account(tail: &str) -> AccountAddress {
    AccountAddress::parse(format!("0x{:0>40}", tail)).unwrap()
}

fn asset(tail: &str) -> IpAssetId {
    IpAssetId::parse(format!("0x{:0>40}", tail)).unwrap()
}

fn tx_hash() -> String {
    format!("0x{}", "cd".repeat(32))
}

fn digest_hex() -> String {
    format!("0x{}", "ab".repeat(32))
}

fn metadata_bundle() -> IpMetadataBundle {
    serde_json::from_value(serde_json::json!({
        "metadataUri": "ipfs://QmMeta",
        "metadataHash": digest_hex(),
        "nftMetadataUri": "ipfs://QmToken",
        "nftMetadataHash": digest_hex(),
    }))
    .unwrap()
}

#[tokio::test]
async fn register_original_decodes_response() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/ip/register"))
        .and(body_partial_json(serde_json::json!({
            "licenseTerms": [{"revenueSharePercent": 10, "mintingFee": "0.01"}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "ipId": "0x1234567890abcdef1234567890abcdef12345678",
            "txHash": tx_hash(),
            "licenseTermsIds": [42]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let req = RegisterOriginalRequest {
        from: account("aa"),
        metadata: metadata_bundle(),
        license_terms: vec![LicenseTermsSpec::new(
            10,
            TokenAmount::parse("0.01").unwrap(),
            account("ff"),
        )
        .unwrap()],
    };
    let resp = client.register_original(&req).await.unwrap();
    assert_eq!(
        resp.ip_id.as_str(),
        "0x1234567890abcdef1234567890abcdef12345678"
    );
    assert_eq!(resp.license_terms_ids, vec![LicenseTermsId(42)]);
}

#[tokio::test]
async fn register_original_passes_rejection_verbatim() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/ip/register"))
        .respond_with(
            ResponseTemplate::new(400).set_body_string("execution reverted: PIL terms invalid"),
        )
        .mount(&server)
        .await;

    let client = test_client(&server);
    let req = RegisterOriginalRequest {
        from: account("aa"),
        metadata: metadata_bundle(),
        license_terms: vec![],
    };
    let err = client.register_original(&req).await.unwrap_err();
    match err {
        LedgerError::Rejected { message, .. } => {
            assert_eq!(message, "execution reverted: PIL terms invalid");
        }
        other => panic!("expected Rejected, got: {other}"),
    }
}

#[tokio::test]
async fn register_derivative_sends_parent_lineage() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/ip/derivative"))
        .and(body_partial_json(serde_json::json!({
            "parentIpIds": ["0x00000000000000000000000000000000000000b1"],
            "licenseTermsIds": [7],
            "royaltySharesPercent": [10]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "ipId": "0x00000000000000000000000000000000000000d1",
            "txHash": tx_hash(),
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let req = RegisterDerivativeRequest {
        from: account("aa"),
        metadata: metadata_bundle(),
        parent_ip_ids: vec![asset("b1")],
        license_terms_ids: vec![LicenseTermsId(7)],
        royalty_shares_percent: vec![10],
        bounds: DerivativeBounds::default(),
    };
    let resp = client.register_derivative(&req).await.unwrap();
    assert_eq!(resp.ip_id, asset("d1"));
}

#[tokio::test]
async fn mint_license_decodes_token_ids() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/license/mint"))
        .and(body_partial_json(serde_json::json!({"amount": 3})))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "txHash": tx_hash(),
            "licenseTokenIds": [101, 102, 103]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let req = MintLicenseRequest {
        from: account("aa"),
        licensor_ip_id: asset("b1"),
        license_terms_id: LicenseTermsId(7),
        amount: 3,
        receiver: account("aa"),
    };
    let resp = client.mint_license(&req).await.unwrap();
    assert_eq!(resp.license_token_ids, vec![101, 102, 103]);
}

#[tokio::test]
async fn pay_royalty_round_trip() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/royalty/pay"))
        .and(body_partial_json(serde_json::json!({"amount": "0.5"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "txHash": tx_hash(),
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let req = PayRoyaltyRequest {
        from: account("aa"),
        payer_ip_id: asset("d1"),
        receiver_ip_id: asset("b1"),
        token: account("ff"),
        amount: TokenAmount::parse("0.5").unwrap(),
    };
    let resp = client.pay_royalty(&req).await.unwrap();
    assert_eq!(resp.tx_hash.as_str(), tx_hash());
}

#[tokio::test]
async fn claimable_revenue_parses_amount() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/royalty/claimable"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "amount": "1.25"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let query = ClaimableQuery {
        ip_id: asset("b1"),
        claimer: asset("b1"),
        token: account("ff"),
    };
    let amount = client.claimable_revenue(&query).await.unwrap();
    assert_eq!(amount, TokenAmount::parse("1.25").unwrap());
}

#[tokio::test]
async fn claim_all_decodes_claimed_tokens() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/royalty/claim"))
        .and(body_partial_json(serde_json::json!({
            "ancestorIpId": "0x00000000000000000000000000000000000000b1",
            "claimer": "0x00000000000000000000000000000000000000b1"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "txHashes": [tx_hash()],
            "claimedTokens": [{"token": "0x00000000000000000000000000000000000000ff", "amount": "2"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let req = ClaimRevenueRequest {
        ancestor_ip_id: asset("b1"),
        claimer: asset("b1"),
        currency_tokens: vec![account("ff")],
    };
    let resp = client.claim_all_revenue(&req).await.unwrap();
    assert_eq!(resp.claimed_tokens.len(), 1);
    assert_eq!(
        resp.claimed_tokens[0].amount,
        TokenAmount::parse("2").unwrap()
    );
}

#[tokio::test]
async fn core_metadata_decodes_positional_tuple() {
    let server = MockServer::start().await;
    let id = asset("b1");

    Mock::given(method("GET"))
        .and(path(format!("/api/v1/ip/{id}/metadata")))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "result": [
                "0x00000000000000000000000000000000000000aa",
                1705341600,
                "ipfs://QmMeta",
                digest_hex(),
                "ipfs://QmToken",
                digest_hex(),
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let meta = client.core_metadata(&id).await.unwrap();
    assert_eq!(meta.owner, account("aa"));
    assert_eq!(meta.metadata_uri, "ipfs://QmMeta");
}

#[tokio::test]
async fn core_metadata_fails_closed_on_arity_mismatch() {
    let server = MockServer::start().await;
    let id = asset("b1");

    Mock::given(method("GET"))
        .and(path(format!("/api/v1/ip/{id}/metadata")))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "result": ["0x00000000000000000000000000000000000000aa", 1705341600]
        })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let err = client.core_metadata(&id).await.unwrap_err();
    assert!(matches!(err, LedgerError::Decode { .. }));
}
