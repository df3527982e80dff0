//! # Registration Orchestrator
//!
//! Drives the end-to-end registration workflow for original and
//! derivative assets: synthesize metadata, hash, upload, submit the
//! ledger transaction, persist the off-chain index row.
//!
//! ## Failure Semantics
//!
//! - Preconditions are checked before any I/O. A missing input fails
//!   fast with a `ValidationError` naming the field; no collaborator is
//!   called and no partial state is created.
//! - Failure at any stage aborts the remaining stages and surfaces the
//!   upstream error message unmodified. Nothing retries.
//! - The off-chain index upsert runs only after the ledger call
//!   succeeded. Its failure is downgraded to a logged warning: the
//!   on-chain action already happened and must not be reported as a
//!   failed registration.
//! - A failed ledger call leaves already-pinned documents orphaned in
//!   storage. Content-addressed storage has no delete primitive; the
//!   leak is accepted and callers are not expected to clean it up.

use std::sync::Arc;

use thiserror::Error;

use provena_core::{
    sha256_digest, sha256_digest_raw, AccountAddress, CanonicalBytes, CanonicalizationError,
    IpAssetId, LicenseTermsId, Timestamp, TxHash, ValidationError,
};
use provena_ledger::{
    DerivativeBounds, IpMetadataBundle, LedgerClient, LedgerError, LicenseTermsSpec,
    RegisterDerivativeRequest, RegisterOriginalRequest, SigningContext, WalletSession,
};
use provena_metadata::{
    build_derivative_metadata, build_original_metadata, KnowledgeArtifact, KnowledgeRef,
    MetadataDocuments, ParentLineage, SensorSource,
};
use provena_storage::{resolve_gateway_url, StorageError, StorageGateway};

use crate::explorer::ExplorerUrls;
use crate::flow::{FlowError, ProgressObserver, RegistrationFlow, RegistrationStage};
use crate::index::{OffchainIndex, RegistrationRow};

/// Errors from a registration run.
#[derive(Debug, Error)]
pub enum RegistrationError {
    /// A precondition failed before any I/O.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The ledger call failed; the upstream message is carried verbatim.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// A storage upload failed; the upstream status and body are carried
    /// verbatim.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Document serialization failed.
    #[error(transparent)]
    Canonicalization(#[from] CanonicalizationError),

    /// Internal flow bookkeeping error.
    #[error(transparent)]
    Flow(#[from] FlowError),
}

/// Inputs for an original registration.
#[derive(Debug, Clone)]
pub struct OriginalRegistration {
    /// The dataset being registered.
    pub source: SensorSource,
    /// Display name of the creator.
    pub creator_name: String,
    /// License terms published with the registration.
    pub license_terms: LicenseTermsSpec,
}

/// Inputs for a derivative registration.
#[derive(Debug, Clone)]
pub struct DerivativeRegistration {
    /// The derived dataset being registered. Must carry a record id so
    /// the derivative can later be associated with its originating
    /// dataset.
    pub source: SensorSource,
    /// Display name of the creator.
    pub creator_name: String,
    /// The parent asset. Required.
    pub parent_asset_id: Option<IpAssetId>,
    /// The parent's published terms the derivative was licensed under.
    /// Required.
    pub parent_terms_id: Option<LicenseTermsId>,
    /// The parent's creator account, embedded in the lineage. Required.
    pub parent_creator: Option<AccountAddress>,
    /// The parent's raw payload, preserved byte-identical.
    pub parent_raw_payload: Option<String>,
    /// Royalty share owed to the parent, in whole percent.
    pub royalty_share_percent: Option<u8>,
    /// Slippage-style upper bounds accepted at derivation time.
    pub bounds: DerivativeBounds,
}

/// Result of a successful registration.
#[derive(Debug, Clone)]
pub struct RegistrationReceipt {
    /// Ledger-assigned asset identifier.
    pub ip_id: IpAssetId,
    /// Hash of the registration transaction.
    pub tx_hash: TxHash,
    /// Explorer detail page for the asset.
    pub explorer_asset_url: String,
    /// Explorer detail page for the transaction.
    pub explorer_tx_url: String,
    /// Content URI of the asset metadata document.
    pub metadata_uri: String,
    /// Gateway-resolved URL of the asset metadata document.
    pub metadata_url: String,
    /// Terms published with the registration (original path only).
    pub license_terms_ids: Vec<LicenseTermsId>,
}

/// The registration orchestrator.
///
/// Holds its collaborators behind trait objects so tests can substitute
/// counting mocks for the ledger, storage gateway, and off-chain index.
pub struct Registrar {
    ledger: Arc<dyn LedgerClient>,
    storage: Arc<dyn StorageGateway>,
    index: Arc<dyn OffchainIndex>,
    explorer: ExplorerUrls,
    gateway_base: String,
}

impl Registrar {
    /// Wire a registrar from its collaborators.
    pub fn new(
        ledger: Arc<dyn LedgerClient>,
        storage: Arc<dyn StorageGateway>,
        index: Arc<dyn OffchainIndex>,
        explorer: ExplorerUrls,
        gateway_base: impl Into<String>,
    ) -> Self {
        Self {
            ledger,
            storage,
            index,
            explorer,
            gateway_base: gateway_base.into(),
        }
    }

    /// Register an original asset and publish its license terms.
    pub async fn register_original(
        &self,
        session: &WalletSession,
        request: &OriginalRegistration,
        observer: &dyn ProgressObserver,
    ) -> Result<RegistrationReceipt, RegistrationError> {
        // Preconditions, before any I/O.
        validate_creator_name(&request.creator_name)?;
        request.source.validate()?;
        let signer = session.require()?.clone();

        let mut flow = RegistrationFlow::new();
        let result = self
            .run_original(&mut flow, &signer, request, observer)
            .await;
        self.settle(flow, &result, observer);
        result
    }

    /// Register a derivative asset bound to its parent.
    pub async fn register_derivative(
        &self,
        session: &WalletSession,
        request: &DerivativeRegistration,
        observer: &dyn ProgressObserver,
    ) -> Result<RegistrationReceipt, RegistrationError> {
        // Preconditions, before any I/O. The workflow refuses to mint a
        // derivative it cannot later associate with its originating
        // dataset.
        validate_creator_name(&request.creator_name)?;
        request.source.validate()?;
        let parent_asset_id = request
            .parent_asset_id
            .clone()
            .ok_or_else(|| ValidationError::missing("parentAssetId"))?;
        let parent_terms_id = request
            .parent_terms_id
            .ok_or_else(|| ValidationError::missing("parentTermsId"))?;
        let parent_creator = request
            .parent_creator
            .clone()
            .ok_or_else(|| ValidationError::missing("parentCreator"))?;
        let signer = session.require()?.clone();
        let record_id = request
            .source
            .record_id
            .clone()
            .ok_or_else(|| ValidationError::missing("sensorDataId"))?;
        if let Some(share) = request.royalty_share_percent {
            if share > 100 {
                return Err(ValidationError::new(
                    "royaltySharePercent",
                    format!("must be between 0 and 100, got {share}"),
                )
                .into());
            }
        }
        request.bounds.validate()?;

        let lineage = ParentLineage {
            parent_asset_id,
            parent_creator,
            parent_terms_id,
            parent_raw_payload: request.parent_raw_payload.clone(),
        };

        let mut flow = RegistrationFlow::new();
        let result = self
            .run_derivative(&mut flow, &signer, request, &lineage, &record_id, observer)
            .await;
        self.settle(flow, &result, observer);
        result
    }

    /// Report the terminal flow state to the observer.
    fn settle(
        &self,
        mut flow: RegistrationFlow,
        result: &Result<RegistrationReceipt, RegistrationError>,
        observer: &dyn ProgressObserver,
    ) {
        match result {
            Ok(receipt) => {
                observer.flow_completed();
                tracing::info!(
                    ip_id = %receipt.ip_id,
                    tx_hash = %receipt.tx_hash,
                    "registration complete"
                );
            }
            Err(e) => {
                let reached = flow.completed_steps();
                flow.fail();
                observer.flow_failed(&e.to_string());
                tracing::warn!(steps_completed = reached, error = %e, "registration failed");
            }
        }
    }

    async fn run_original(
        &self,
        flow: &mut RegistrationFlow,
        signer: &SigningContext,
        request: &OriginalRegistration,
        observer: &dyn ProgressObserver,
    ) -> Result<RegistrationReceipt, RegistrationError> {
        let knowledge = self
            .upload_knowledge(flow, &request.source, observer)
            .await?;

        observer.stage_started(2, RegistrationStage::AssembleDocuments);
        let docs = build_original_metadata(
            &request.source,
            &request.creator_name,
            &signer.account,
            Some(knowledge),
            Timestamp::now(),
        )?;
        flow.advance(RegistrationStage::AssembleDocuments)?;

        let bundle = self.hash_and_pin(flow, &docs, observer).await?;

        observer.stage_started(4, RegistrationStage::SubmitTransaction);
        let resp = self
            .ledger
            .register_original(&RegisterOriginalRequest {
                from: signer.account.clone(),
                metadata: bundle.clone(),
                license_terms: vec![request.license_terms.clone()],
            })
            .await?;
        flow.advance(RegistrationStage::SubmitTransaction)?;

        let receipt = self.build_receipt(
            resp.ip_id,
            resp.tx_hash,
            &bundle,
            resp.license_terms_ids,
        );

        observer.stage_started(5, RegistrationStage::PersistIndex);
        if let Some(record_id) = &request.source.record_id {
            self.persist_row(record_id, &receipt).await;
        } else {
            tracing::debug!("source has no record id, skipping off-chain index write");
        }
        flow.advance(RegistrationStage::PersistIndex)?;
        flow.complete()?;

        Ok(receipt)
    }

    async fn run_derivative(
        &self,
        flow: &mut RegistrationFlow,
        signer: &SigningContext,
        request: &DerivativeRegistration,
        lineage: &ParentLineage,
        record_id: &provena_core::SensorRecordId,
        observer: &dyn ProgressObserver,
    ) -> Result<RegistrationReceipt, RegistrationError> {
        let knowledge = self
            .upload_knowledge(flow, &request.source, observer)
            .await?;

        observer.stage_started(2, RegistrationStage::AssembleDocuments);
        let docs = build_derivative_metadata(
            &request.source,
            &request.creator_name,
            &signer.account,
            lineage,
            Some(knowledge),
            Timestamp::now(),
        )?;
        flow.advance(RegistrationStage::AssembleDocuments)?;

        let bundle = self.hash_and_pin(flow, &docs, observer).await?;

        observer.stage_started(4, RegistrationStage::SubmitTransaction);
        let resp = self
            .ledger
            .register_derivative(&RegisterDerivativeRequest {
                from: signer.account.clone(),
                metadata: bundle.clone(),
                parent_ip_ids: vec![lineage.parent_asset_id.clone()],
                license_terms_ids: vec![lineage.parent_terms_id],
                royalty_shares_percent: vec![request.royalty_share_percent.unwrap_or(0)],
                bounds: request.bounds.clone(),
            })
            .await?;
        flow.advance(RegistrationStage::SubmitTransaction)?;

        let receipt = self.build_receipt(resp.ip_id, resp.tx_hash, &bundle, Vec::new());

        observer.stage_started(5, RegistrationStage::PersistIndex);
        self.persist_row(record_id, &receipt).await;
        flow.advance(RegistrationStage::PersistIndex)?;
        flow.complete()?;

        Ok(receipt)
    }

    /// Stage 1: generate the knowledge artifact and pin its exact bytes.
    async fn upload_knowledge(
        &self,
        flow: &mut RegistrationFlow,
        source: &SensorSource,
        observer: &dyn ProgressObserver,
    ) -> Result<KnowledgeRef, RegistrationError> {
        observer.stage_started(1, RegistrationStage::KnowledgeUpload);
        let artifact = KnowledgeArtifact::generate(source);
        let hash = sha256_digest_raw(artifact.as_bytes());
        let locator = self
            .storage
            .pin_bytes(artifact.as_bytes().to_vec(), &artifact.file_name(source))
            .await?;
        flow.advance(RegistrationStage::KnowledgeUpload)?;
        Ok(KnowledgeRef {
            url: locator.to_uri(),
            hash,
        })
    }

    /// Stage 3: serialize both documents canonically, digest the exact
    /// bytes, and pin those same bytes.
    async fn hash_and_pin(
        &self,
        flow: &mut RegistrationFlow,
        docs: &MetadataDocuments,
        observer: &dyn ProgressObserver,
    ) -> Result<IpMetadataBundle, RegistrationError> {
        observer.stage_started(3, RegistrationStage::HashAndPin);

        let asset_bytes = CanonicalBytes::new(&docs.asset)?;
        let asset_hash = sha256_digest(&asset_bytes);
        let asset_locator = self
            .storage
            .pin_bytes(asset_bytes.into_bytes(), "asset-metadata.json")
            .await?;

        let token_bytes = CanonicalBytes::new(&docs.token)?;
        let token_hash = sha256_digest(&token_bytes);
        let token_locator = self
            .storage
            .pin_bytes(token_bytes.into_bytes(), "token-metadata.json")
            .await?;

        flow.advance(RegistrationStage::HashAndPin)?;
        Ok(IpMetadataBundle {
            metadata_uri: asset_locator.to_uri(),
            metadata_hash: asset_hash,
            nft_metadata_uri: token_locator.to_uri(),
            nft_metadata_hash: token_hash,
        })
    }

    fn build_receipt(
        &self,
        ip_id: IpAssetId,
        tx_hash: TxHash,
        bundle: &IpMetadataBundle,
        license_terms_ids: Vec<LicenseTermsId>,
    ) -> RegistrationReceipt {
        RegistrationReceipt {
            explorer_asset_url: self.explorer.asset_url(&ip_id),
            explorer_tx_url: self.explorer.tx_url(&tx_hash),
            metadata_uri: bundle.metadata_uri.clone(),
            metadata_url: resolve_gateway_url(&bundle.metadata_uri, &self.gateway_base),
            ip_id,
            tx_hash,
            license_terms_ids,
        }
    }

    /// Stage 5 write. Runs only after the ledger call succeeded; failure
    /// is a warning, never a user-facing error.
    async fn persist_row(
        &self,
        record_id: &provena_core::SensorRecordId,
        receipt: &RegistrationReceipt,
    ) {
        let row = RegistrationRow {
            record_id: record_id.clone(),
            ip_id: receipt.ip_id.clone(),
            tx_hash: receipt.tx_hash.clone(),
            explorer_url: receipt.explorer_asset_url.clone(),
            metadata_url: receipt.metadata_url.clone(),
            registered_at: Timestamp::now(),
        };
        if let Err(e) = self.index.upsert_registration(&row).await {
            tracing::warn!(
                record_id = %record_id,
                ip_id = %receipt.ip_id,
                error = %e,
                "off-chain index write failed after successful registration; \
                 the on-chain asset exists and the index can be reconciled later"
            );
        }
    }
}

fn validate_creator_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::new("creatorName", "must not be empty"));
    }
    Ok(())
}
