//! # Knowledge Artifact Generation
//!
//! Synthesizes the natural-language knowledge document that accompanies
//! every registration: a free-text overview plus structured sections
//! describing the dataset. Generation is a pure, deterministic function
//! of the source record; no network access, no clock reads.
//!
//! The artifact is uploaded to content-addressed storage and referenced
//! (url + hash) from the asset-level metadata document.

use crate::source::SensorSource;

/// A generated knowledge document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnowledgeArtifact {
    text: String,
}

impl KnowledgeArtifact {
    /// Generate the knowledge document for a source record.
    pub fn generate(source: &SensorSource) -> Self {
        let mut text = String::new();

        text.push_str(&format!("# Knowledge Artifact: {}\n\n", source.title));

        text.push_str("## Overview\n\n");
        text.push_str(&format!(
            "This document describes \"{}\", a dataset captured by a {} sensor \
             at {}. It accompanies the on-ledger registration of the dataset \
             as an intellectual-property asset and is stored immutably in \
             content-addressed storage.\n\n",
            source.title,
            source.sensor_type,
            source.location_label(),
        ));

        text.push_str("## Dataset Characteristics\n\n");
        text.push_str(&format!("- Sensor type: {}\n", source.sensor_type));
        text.push_str(&format!("- Location: {}\n", source.location_label()));
        text.push_str(&format!("- Captured at: {}\n", source.timestamp.to_iso8601()));
        text.push_str(&format!("- Sensor health: {}\n\n", source.health));

        text.push_str("## Data Payload\n\n");
        match &source.raw_payload {
            Some(payload) => {
                text.push_str("```\n");
                text.push_str(payload);
                text.push_str("\n```\n\n");
            }
            None => text.push_str("No raw payload was provided with this record.\n\n"),
        }

        text.push_str("## Provenance\n\n");
        text.push_str(
            "The content identifier of this document is asserted in the \
             asset's on-ledger metadata. Any reuse of the dataset is governed \
             by the license terms published with the registration.\n",
        );

        Self { text }
    }

    /// The document text.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// The exact bytes uploaded to storage.
    pub fn as_bytes(&self) -> &[u8] {
        self.text.as_bytes()
    }

    /// Display file name used when pinning, derived from the title.
    pub fn file_name(&self, source: &SensorSource) -> String {
        let slug: String = source
            .title
            .to_lowercase()
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
            .collect();
        format!("knowledge-{}.md", slug.trim_matches('-'))
    }
}
