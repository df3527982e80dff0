//! # provena-metadata: Metadata Synthesizer
//!
//! Builds the documents that accompany a registration: the asset-level
//! descriptive document, the token-level display document, and the
//! generated knowledge artifact describing the source dataset.
//!
//! ## Contract
//!
//! - Synthesis is a pure, deterministic function of the source record.
//! - Output documents contain no hash of themselves; digesting happens
//!   downstream over the exact canonical bytes that get uploaded
//!   (synthesize, serialize, hash, upload, in that order).
//! - Derivative synthesis preserves the parent's raw payload
//!   byte-identical and embeds full parent lineage.

pub mod documents;
pub mod knowledge;
pub mod source;

pub use documents::{
    build_derivative_metadata, build_original_metadata, AssetMetadataDoc, Attribute, Creator,
    KnowledgeRef, MediaRef, MetadataDocuments, ParentLineage, TokenMetadataDoc,
    PRESERVATION_GUARANTEE,
};
pub use knowledge::KnowledgeArtifact;
pub use source::{SensorSource, UNSPECIFIED_LOCATION};
