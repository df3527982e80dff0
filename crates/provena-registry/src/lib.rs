//! # provena-registry: Registration Orchestrator
//!
//! The write path of the provenance pipeline: a five-stage registration
//! workflow (knowledge upload, document assembly, hash-and-pin, ledger
//! submission, off-chain index persistence) modeled as an explicit state
//! machine, plus the read-only provenance metadata reader.
//!
//! ## Ownership
//!
//! The orchestrator is the sole writer of new IP assets and derivative
//! links (via the ledger). The off-chain index row is written only after
//! the on-chain registration succeeded, and an index failure is a logged
//! warning, never a user-facing error.

pub mod explorer;
pub mod flow;
pub mod index;
pub mod orchestrator;
pub mod reader;

pub use explorer::ExplorerUrls;
pub use flow::{
    FlowError, FlowState, FlowTransitionRecord, NoopObserver, ProgressObserver, RegistrationFlow,
    RegistrationStage,
};
pub use index::{HttpIndexClient, IndexConfig, IndexError, OffchainIndex, RegistrationRow};
pub use orchestrator::{
    DerivativeRegistration, OriginalRegistration, RegistrationError, RegistrationReceipt,
    Registrar,
};
pub use reader::{EnrichedMetadata, ProvenanceReader};
