//! End-to-end registration tests over counting mock collaborators.
//!
//! The mocks record every call and every pinned payload, so these tests
//! can assert which stages ran, what reached the ledger, and that
//! precondition failures make zero collaborator calls.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use provena_core::{
    AccountAddress, IpAssetId, LicenseTermsId, SensorRecordId, Timestamp, TokenAmount, TxHash,
};
use provena_ledger::{
    ClaimRevenueRequest, ClaimRevenueResponse, ClaimableQuery, CoreMetadata, DerivativeBounds,
    LedgerClient, LedgerError, LicenseTermsSpec, MintLicenseRequest, MintLicenseResponse,
    PayRoyaltyRequest, PayRoyaltyResponse, RegisterDerivativeRequest, RegisterDerivativeResponse,
    RegisterOriginalRequest, RegisterOriginalResponse, WalletSession,
};
use provena_metadata::SensorSource;
use provena_registry::{
    DerivativeRegistration, ExplorerUrls, IndexError, NoopObserver, OffchainIndex,
    OriginalRegistration, ProgressObserver, RegistrationError, RegistrationRow, RegistrationStage,
    Registrar,
};
use provena_storage::{Locator, StorageError, StorageGateway};

fn account(tail: &str) -> AccountAddress {
    AccountAddress::parse(format!("0x{:0>40}", tail)).unwrap()
}

fn asset(tail: &str) -> IpAssetId {
    IpAssetId::parse(format!("0x{:0>40}", tail)).unwrap()
}

fn tx() -> TxHash {
    TxHash::parse(format!("0x{}", "ab".repeat(32))).unwrap()
}

// ─── Mock collaborators ──────────────────────────────────────────────

/// Storage mock that counts uploads and records every pinned payload.
#[derive(Default)]
struct CountingStorage {
    calls: AtomicUsize,
    pinned: Mutex<Vec<(String, Vec<u8>)>>,
    fail: bool,
}

#[async_trait]
impl StorageGateway for CountingStorage {
    async fn pin_bytes(&self, bytes: Vec<u8>, name: &str) -> Result<Locator, StorageError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(StorageError::Upload {
                endpoint: "mock".into(),
                status: 500,
                body: "pinning backend unavailable".into(),
            });
        }
        let n = self.calls.load(Ordering::SeqCst);
        self.pinned.lock().unwrap().push((name.to_string(), bytes));
        Ok(Locator::parse(format!("QmMock{n}")).unwrap())
    }

    async fn pin_json(&self, doc: &serde_json::Value, name: &str) -> Result<Locator, StorageError> {
        self.pin_bytes(serde_json::to_vec(doc).unwrap(), name).await
    }
}

impl CountingStorage {
    fn pinned_named(&self, name: &str) -> Option<Vec<u8>> {
        self.pinned
            .lock()
            .unwrap()
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, b)| b.clone())
    }
}

/// Ledger mock that counts calls and records registration requests.
#[derive(Default)]
struct CountingLedger {
    calls: AtomicUsize,
    reject: bool,
    last_original: Mutex<Option<RegisterOriginalRequest>>,
    last_derivative: Mutex<Option<RegisterDerivativeRequest>>,
}

#[async_trait]
impl LedgerClient for CountingLedger {
    async fn register_original(
        &self,
        req: &RegisterOriginalRequest,
    ) -> Result<RegisterOriginalResponse, LedgerError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.reject {
            return Err(LedgerError::Rejected {
                endpoint: "mock".into(),
                message: "execution reverted: registration denied".into(),
            });
        }
        *self.last_original.lock().unwrap() = Some(req.clone());
        Ok(RegisterOriginalResponse {
            ip_id: asset("e1"),
            tx_hash: tx(),
            license_terms_ids: vec![LicenseTermsId(42)],
        })
    }

    async fn register_derivative(
        &self,
        req: &RegisterDerivativeRequest,
    ) -> Result<RegisterDerivativeResponse, LedgerError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.reject {
            return Err(LedgerError::Rejected {
                endpoint: "mock".into(),
                message: "execution reverted: derivative denied".into(),
            });
        }
        *self.last_derivative.lock().unwrap() = Some(req.clone());
        Ok(RegisterDerivativeResponse {
            ip_id: asset("e2"),
            tx_hash: tx(),
        })
    }

    async fn mint_license(
        &self,
        _req: &MintLicenseRequest,
    ) -> Result<MintLicenseResponse, LedgerError> {
        unimplemented!("not exercised by registration tests")
    }

    async fn pay_royalty(
        &self,
        _req: &PayRoyaltyRequest,
    ) -> Result<PayRoyaltyResponse, LedgerError> {
        unimplemented!("not exercised by registration tests")
    }

    async fn claimable_revenue(
        &self,
        _query: &ClaimableQuery,
    ) -> Result<TokenAmount, LedgerError> {
        unimplemented!("not exercised by registration tests")
    }

    async fn claim_all_revenue(
        &self,
        _req: &ClaimRevenueRequest,
    ) -> Result<ClaimRevenueResponse, LedgerError> {
        unimplemented!("not exercised by registration tests")
    }

    async fn core_metadata(&self, _asset_id: &IpAssetId) -> Result<CoreMetadata, LedgerError> {
        unimplemented!("not exercised by registration tests")
    }
}

/// Index mock that counts upserts and optionally fails them.
#[derive(Default)]
struct CountingIndex {
    calls: AtomicUsize,
    fail: bool,
    rows: Mutex<Vec<RegistrationRow>>,
}

#[async_trait]
impl OffchainIndex for CountingIndex {
    async fn upsert_registration(&self, row: &RegistrationRow) -> Result<(), IndexError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(IndexError::Rejected {
                endpoint: "mock".into(),
                status: 503,
                body: "index offline".into(),
            });
        }
        self.rows.lock().unwrap().push(row.clone());
        Ok(())
    }

    async fn get_registration(
        &self,
        record_id: &SensorRecordId,
    ) -> Result<Option<RegistrationRow>, IndexError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|r| &r.record_id == record_id)
            .cloned())
    }
}

/// Observer recording every reported step index.
#[derive(Default)]
struct RecordingObserver {
    steps: Mutex<Vec<u8>>,
    completed: AtomicUsize,
    failed: Mutex<Vec<String>>,
}

impl ProgressObserver for RecordingObserver {
    fn stage_started(&self, step: u8, _stage: RegistrationStage) {
        self.steps.lock().unwrap().push(step);
    }
    fn flow_completed(&self) {
        self.completed.fetch_add(1, Ordering::SeqCst);
    }
    fn flow_failed(&self, message: &str) {
        self.failed.lock().unwrap().push(message.to_string());
    }
}

// ─── Fixtures ────────────────────────────────────────────────────────

struct Fixture {
    storage: Arc<CountingStorage>,
    ledger: Arc<CountingLedger>,
    index: Arc<CountingIndex>,
    registrar: Registrar,
}

fn fixture_with(storage: CountingStorage, ledger: CountingLedger, index: CountingIndex) -> Fixture {
    let storage = Arc::new(storage);
    let ledger = Arc::new(ledger);
    let index = Arc::new(index);
    let registrar = Registrar::new(
        ledger.clone(),
        storage.clone(),
        index.clone(),
        ExplorerUrls::new("https://explorer.example.com"),
        "https://gateway.example.com",
    );
    Fixture {
        storage,
        ledger,
        index,
        registrar,
    }
}

fn fixture() -> Fixture {
    fixture_with(
        CountingStorage::default(),
        CountingLedger::default(),
        CountingIndex::default(),
    )
}

fn session() -> WalletSession {
    WalletSession::connected(account("aa"))
}

fn moisture_source() -> SensorSource {
    SensorSource {
        record_id: Some(SensorRecordId::parse("rec-001").unwrap()),
        sensor_type: "moisture".into(),
        title: "Soil Moisture Levels".into(),
        location: None,
        timestamp: Timestamp::parse("2024-01-15T18:00:00Z").unwrap(),
        health: "96%".into(),
        raw_payload: Some(r#"{"readings":[31,30,29]}"#.into()),
    }
}

fn original_request() -> OriginalRegistration {
    OriginalRegistration {
        source: moisture_source(),
        creator_name: "Alice".into(),
        license_terms: LicenseTermsSpec::new(
            10,
            TokenAmount::parse("0.01").unwrap(),
            account("ff"),
        )
        .unwrap(),
    }
}

fn derivative_request() -> DerivativeRegistration {
    DerivativeRegistration {
        source: moisture_source(),
        creator_name: "Bob".into(),
        parent_asset_id: Some(asset("e1")),
        parent_terms_id: Some(LicenseTermsId(42)),
        parent_creator: Some(account("aa")),
        parent_raw_payload: Some(r#"{"readings":[31,30,29],"unit":"%"}"#.into()),
        royalty_share_percent: Some(10),
        bounds: DerivativeBounds::default(),
    }
}

// ─── Original registration ───────────────────────────────────────────

#[tokio::test]
async fn original_registration_succeeds_end_to_end() {
    let fx = fixture();
    let receipt = fx
        .registrar
        .register_original(&session(), &original_request(), &NoopObserver)
        .await
        .unwrap();

    assert!(!receipt.ip_id.as_str().is_empty());
    assert_eq!(receipt.ip_id, asset("e1"));
    assert_eq!(receipt.license_terms_ids, vec![LicenseTermsId(42)]);
    assert!(receipt
        .explorer_asset_url
        .starts_with("https://explorer.example.com/ipa/0x"));
    assert!(receipt
        .metadata_url
        .starts_with("https://gateway.example.com/ipfs/"));

    // Knowledge artifact + two metadata documents were pinned.
    assert_eq!(fx.storage.calls.load(Ordering::SeqCst), 3);
    // One row landed in the off-chain index.
    assert_eq!(fx.index.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn original_token_metadata_carries_location_and_health_attributes() {
    let fx = fixture();
    fx.registrar
        .register_original(&session(), &original_request(), &NoopObserver)
        .await
        .unwrap();

    let bytes = fx.storage.pinned_named("token-metadata.json").unwrap();
    let doc: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    let attributes = doc["attributes"].as_array().unwrap();

    let has = |trait_type: &str, value: &str| {
        attributes
            .iter()
            .any(|a| a["trait_type"] == trait_type && a["value"] == value)
    };
    assert!(has("Location", "Unspecified"));
    assert!(has("Sensor Health", "96%"));
}

#[tokio::test]
async fn original_metadata_hash_matches_pinned_bytes() {
    let fx = fixture();
    fx.registrar
        .register_original(&session(), &original_request(), &NoopObserver)
        .await
        .unwrap();

    let req = fx.ledger.last_original.lock().unwrap().clone().unwrap();
    let bytes = fx.storage.pinned_named("asset-metadata.json").unwrap();
    assert_eq!(
        req.metadata.metadata_hash,
        provena_core::sha256_digest_raw(&bytes)
    );
}

#[tokio::test]
async fn observer_sees_monotonic_steps_and_completion() {
    let fx = fixture();
    let observer = RecordingObserver::default();
    fx.registrar
        .register_original(&session(), &original_request(), &observer)
        .await
        .unwrap();

    assert_eq!(*observer.steps.lock().unwrap(), vec![1, 2, 3, 4, 5]);
    assert_eq!(observer.completed.load(Ordering::SeqCst), 1);
    assert!(observer.failed.lock().unwrap().is_empty());
}

#[tokio::test]
async fn blank_creator_name_fails_before_any_io() {
    let fx = fixture();
    let mut req = original_request();
    req.creator_name = "  ".into();
    let err = fx
        .registrar
        .register_original(&session(), &req, &NoopObserver)
        .await
        .unwrap_err();
    assert!(matches!(err, RegistrationError::Validation(_)));
    assert_eq!(fx.storage.calls.load(Ordering::SeqCst), 0);
    assert_eq!(fx.ledger.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn disconnected_wallet_fails_before_any_io() {
    let fx = fixture();
    let err = fx
        .registrar
        .register_original(&WalletSession::disconnected(), &original_request(), &NoopObserver)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        RegistrationError::Ledger(LedgerError::WalletNotConnected)
    ));
    assert_eq!(fx.storage.calls.load(Ordering::SeqCst), 0);
    assert_eq!(fx.ledger.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn ledger_rejection_surfaces_verbatim_and_skips_index() {
    let fx = fixture_with(
        CountingStorage::default(),
        CountingLedger {
            reject: true,
            ..CountingLedger::default()
        },
        CountingIndex::default(),
    );
    let observer = RecordingObserver::default();
    let err = fx
        .registrar
        .register_original(&session(), &original_request(), &observer)
        .await
        .unwrap_err();

    assert!(err
        .to_string()
        .contains("execution reverted: registration denied"));
    // Documents were uploaded (orphaned, accepted leak) but the index
    // row was never written.
    assert_eq!(fx.storage.calls.load(Ordering::SeqCst), 3);
    assert_eq!(fx.index.calls.load(Ordering::SeqCst), 0);
    assert_eq!(observer.failed.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn storage_failure_aborts_before_ledger() {
    let fx = fixture_with(
        CountingStorage {
            fail: true,
            ..CountingStorage::default()
        },
        CountingLedger::default(),
        CountingIndex::default(),
    );
    let err = fx
        .registrar
        .register_original(&session(), &original_request(), &NoopObserver)
        .await
        .unwrap_err();
    assert!(matches!(err, RegistrationError::Storage(_)));
    assert_eq!(fx.ledger.calls.load(Ordering::SeqCst), 0);
    assert_eq!(fx.index.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn index_failure_is_downgraded_to_success() {
    let fx = fixture_with(
        CountingStorage::default(),
        CountingLedger::default(),
        CountingIndex {
            fail: true,
            ..CountingIndex::default()
        },
    );
    // The on-chain registration succeeded; a dead index must not turn
    // that into a user-facing failure.
    let receipt = fx
        .registrar
        .register_original(&session(), &original_request(), &NoopObserver)
        .await
        .unwrap();
    assert_eq!(receipt.ip_id, asset("e1"));
    assert_eq!(fx.index.calls.load(Ordering::SeqCst), 1);
}

// ─── Derivative registration ─────────────────────────────────────────

#[tokio::test]
async fn derivative_registration_succeeds_with_lineage() {
    let fx = fixture();
    let receipt = fx
        .registrar
        .register_derivative(&session(), &derivative_request(), &NoopObserver)
        .await
        .unwrap();
    assert_eq!(receipt.ip_id, asset("e2"));
    assert!(receipt.license_terms_ids.is_empty());

    let req = fx.ledger.last_derivative.lock().unwrap().clone().unwrap();
    assert_eq!(req.parent_ip_ids, vec![asset("e1")]);
    assert_eq!(req.license_terms_ids, vec![LicenseTermsId(42)]);
    assert_eq!(req.royalty_shares_percent, vec![10]);
}

#[tokio::test]
async fn derivative_asset_document_preserves_parent_payload() {
    let fx = fixture();
    fx.registrar
        .register_derivative(&session(), &derivative_request(), &NoopObserver)
        .await
        .unwrap();

    let bytes = fx.storage.pinned_named("asset-metadata.json").unwrap();
    let doc: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    let description = doc["description"].as_str().unwrap();
    assert!(description.contains(r#"{"readings":[31,30,29],"unit":"%"}"#));
}

#[tokio::test]
async fn derivative_without_record_id_fails_with_zero_calls() {
    let fx = fixture();
    let mut req = derivative_request();
    req.source.record_id = None;

    let err = fx
        .registrar
        .register_derivative(&session(), &req, &NoopObserver)
        .await
        .unwrap_err();

    // The error names the missing sensor-data reference.
    assert!(err.to_string().contains("sensorDataId"));
    assert!(matches!(err, RegistrationError::Validation(_)));
    // Zero calls to the storage gateway or ledger.
    assert_eq!(fx.storage.calls.load(Ordering::SeqCst), 0);
    assert_eq!(fx.ledger.calls.load(Ordering::SeqCst), 0);
    assert_eq!(fx.index.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn derivative_without_parent_fails_fast() {
    let fx = fixture();
    let mut req = derivative_request();
    req.parent_asset_id = None;
    let err = fx
        .registrar
        .register_derivative(&session(), &req, &NoopObserver)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("parentAssetId"));
    assert_eq!(fx.storage.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn derivative_without_terms_fails_fast() {
    let fx = fixture();
    let mut req = derivative_request();
    req.parent_terms_id = None;
    let err = fx
        .registrar
        .register_derivative(&session(), &req, &NoopObserver)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("parentTermsId"));
    assert_eq!(fx.storage.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn derivative_excess_royalty_share_rejected() {
    let fx = fixture();
    let mut req = derivative_request();
    req.royalty_share_percent = Some(101);
    let err = fx
        .registrar
        .register_derivative(&session(), &req, &NoopObserver)
        .await
        .unwrap_err();
    assert!(matches!(err, RegistrationError::Validation(_)));
    assert_eq!(fx.storage.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn derivative_persists_index_row_keyed_by_record_id() {
    let fx = fixture();
    fx.registrar
        .register_derivative(&session(), &derivative_request(), &NoopObserver)
        .await
        .unwrap();

    let record_id = SensorRecordId::parse("rec-001").unwrap();
    let row = fx
        .index
        .get_registration(&record_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(row.ip_id, asset("e2"));
    assert!(row.explorer_url.contains("/ipa/"));
}
