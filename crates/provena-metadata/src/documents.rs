//! # Metadata Document Builders
//!
//! Builds the two documents submitted with every registration: the
//! asset-level descriptive document and the token-level display document.
//! Both are plain serde structs; they carry no hash of themselves.
//! Hashing happens downstream over the exact canonical bytes that get
//! uploaded, so the asserted digest always matches the stored content.
//!
//! Derivative synthesis layers additional documentation over the parent's
//! preserved raw payload without altering a byte of it.

use serde::{Deserialize, Serialize};

use provena_core::{AccountAddress, ContentDigest, IpAssetId, LicenseTermsId, Timestamp, ValidationError};

use crate::source::SensorSource;

/// Guarantee text embedded in every derivative description.
pub const PRESERVATION_GUARANTEE: &str = "The original source data is preserved in full below. \
     Nothing has been truncated, filtered, or substituted.";

/// Marker line separating derivative documentation from preserved data.
const PRESERVED_DATA_HEADER: &str = "--- Preserved source data ---";

// -- Asset-level document ----------------------------------------------------

/// A creator entry in the asset-level document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Creator {
    /// Display name.
    pub name: String,
    /// The creator's account address.
    pub address: AccountAddress,
    /// Contribution in whole percent. Contributions across all creators
    /// of a document sum to 100.
    pub contribution_percent: u8,
}

/// A media reference with its content digest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaRef {
    /// Display name of the media item.
    pub name: String,
    /// Content URI of the media item.
    pub url: String,
    /// Digest of the media bytes.
    pub hash: ContentDigest,
}

/// Reference to the generated knowledge artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KnowledgeRef {
    /// Content URI of the knowledge document.
    pub url: String,
    /// Digest of the knowledge document bytes.
    pub hash: ContentDigest,
}

/// The asset-level descriptive metadata document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetMetadataDoc {
    /// Dataset title.
    pub title: String,
    /// Descriptive text. For derivatives this is strictly additive
    /// documentation layered over the untouched parent payload.
    pub description: String,
    /// When the document was synthesized.
    pub created_at: Timestamp,
    /// The creators and their contributions.
    pub creators: Vec<Creator>,
    /// Media references.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub media: Vec<MediaRef>,
    /// The knowledge artifact reference, when one was generated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_artifact: Option<KnowledgeRef>,
}

impl AssetMetadataDoc {
    /// Validate the creator contribution invariant.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.creators.is_empty() {
            return Err(ValidationError::new("creators", "at least one creator is required"));
        }
        let total: u32 = self
            .creators
            .iter()
            .map(|c| c.contribution_percent as u32)
            .sum();
        if total != 100 {
            return Err(ValidationError::new(
                "creators",
                format!("contributions must sum to 100 percent, got {total}"),
            ));
        }
        Ok(())
    }
}

// -- Token-level document ----------------------------------------------------

/// A display attribute on the token-level document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    /// Attribute label.
    pub trait_type: String,
    /// Attribute value.
    pub value: String,
}

impl Attribute {
    fn new(trait_type: &str, value: impl Into<String>) -> Self {
        Self {
            trait_type: trait_type.to_string(),
            value: value.into(),
        }
    }
}

/// The token-level display metadata document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenMetadataDoc {
    /// Display name.
    pub name: String,
    /// Display description.
    pub description: String,
    /// Display attributes.
    pub attributes: Vec<Attribute>,
}

impl TokenMetadataDoc {
    /// Look up an attribute value by label.
    pub fn attribute(&self, trait_type: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.trait_type == trait_type)
            .map(|a| a.value.as_str())
    }
}

// -- Lineage -----------------------------------------------------------------

/// Parent lineage embedded in a derivative's documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParentLineage {
    /// The parent asset.
    pub parent_asset_id: IpAssetId,
    /// The parent's creator account.
    pub parent_creator: AccountAddress,
    /// The license terms the derivative was minted under.
    pub parent_terms_id: LicenseTermsId,
    /// The parent's preserved raw payload, carried byte-identical.
    pub parent_raw_payload: Option<String>,
}

// -- Builders ----------------------------------------------------------------

/// Synthesized document pair for one registration.
#[derive(Debug, Clone)]
pub struct MetadataDocuments {
    /// The asset-level descriptive document.
    pub asset: AssetMetadataDoc,
    /// The token-level display document.
    pub token: TokenMetadataDoc,
}

/// Build the documents for an original registration.
///
/// Exactly one creator entry at 100 percent contribution.
pub fn build_original_metadata(
    source: &SensorSource,
    creator_name: &str,
    creator_address: &AccountAddress,
    knowledge: Option<KnowledgeRef>,
    synthesized_at: Timestamp,
) -> Result<MetadataDocuments, ValidationError> {
    source.validate()?;
    if creator_name.trim().is_empty() {
        return Err(ValidationError::new("creatorName", "must not be empty"));
    }

    let description = format!(
        "\"{}\" is a {} sensor dataset captured at {} on {}. Sensor health at \
         capture time was {}. This registration publishes the dataset as an \
         IP asset with commercial-remix license terms.",
        source.title,
        source.sensor_type,
        source.location_label(),
        source.timestamp.to_iso8601(),
        source.health,
    );

    let asset = AssetMetadataDoc {
        title: source.title.clone(),
        description,
        created_at: synthesized_at,
        creators: vec![Creator {
            name: creator_name.to_string(),
            address: creator_address.clone(),
            contribution_percent: 100,
        }],
        media: Vec::new(),
        ai_artifact: knowledge,
    };
    asset.validate()?;

    let token = TokenMetadataDoc {
        name: source.title.clone(),
        description: format!("License-bearing registration of \"{}\"", source.title),
        attributes: base_attributes(source),
    };

    Ok(MetadataDocuments { asset, token })
}

/// Build the documents for a derivative registration.
///
/// The description embeds the full and shortened parent asset id, the
/// parent creator address, the preservation guarantee, and the parent's
/// raw payload without altering a byte of it.
pub fn build_derivative_metadata(
    source: &SensorSource,
    creator_name: &str,
    creator_address: &AccountAddress,
    lineage: &ParentLineage,
    knowledge: Option<KnowledgeRef>,
    synthesized_at: Timestamp,
) -> Result<MetadataDocuments, ValidationError> {
    source.validate()?;
    if creator_name.trim().is_empty() {
        return Err(ValidationError::new("creatorName", "must not be empty"));
    }

    let mut description = format!(
        "\"{}\" is a derivative work of parent IP asset {} ({}) created by {}, \
         licensed under terms {}. {}",
        source.title,
        lineage.parent_asset_id,
        lineage.parent_asset_id.short(),
        lineage.parent_creator,
        lineage.parent_terms_id,
        PRESERVATION_GUARANTEE,
    );
    if let Some(payload) = &lineage.parent_raw_payload {
        description.push_str("\n\n");
        description.push_str(PRESERVED_DATA_HEADER);
        description.push('\n');
        description.push_str(payload);
    }

    let asset = AssetMetadataDoc {
        title: source.title.clone(),
        description,
        created_at: synthesized_at,
        creators: vec![Creator {
            name: creator_name.to_string(),
            address: creator_address.clone(),
            contribution_percent: 100,
        }],
        media: Vec::new(),
        ai_artifact: knowledge,
    };
    asset.validate()?;

    let mut attributes = base_attributes(source);
    attributes.push(Attribute::new("Parent Asset", lineage.parent_asset_id.short()));
    attributes.push(Attribute::new(
        "Parent Creator",
        lineage.parent_creator.as_str(),
    ));

    let token = TokenMetadataDoc {
        name: source.title.clone(),
        description: format!(
            "Derivative registration of \"{}\" from parent {}",
            source.title,
            lineage.parent_asset_id.short()
        ),
        attributes,
    };

    Ok(MetadataDocuments { asset, token })
}

/// Display attributes shared by original and derivative tokens.
fn base_attributes(source: &SensorSource) -> Vec<Attribute> {
    vec![
        Attribute::new("Sensor Type", source.sensor_type.clone()),
        Attribute::new("Location", source.location_label()),
        Attribute::new("Sensor Health", source.health.clone()),
        Attribute::new("Captured At", source.timestamp.to_iso8601()),
    ]
}
