//! # Sensor Source Records
//!
//! The off-chain dataset record a registration originates from. The
//! synthesizer is a pure function of this record; everything it emits is
//! reproducible from the same source values.

use serde::{Deserialize, Serialize};

use provena_core::{SensorRecordId, Timestamp, ValidationError};

/// Fallback shown when a record carries no location.
pub const UNSPECIFIED_LOCATION: &str = "Unspecified";

/// A sensor dataset record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensorSource {
    /// Off-chain index id of this record, when it has been persisted.
    /// Derivative registration requires one.
    pub record_id: Option<SensorRecordId>,
    /// Sensor category, e.g. `moisture`, `temperature`.
    pub sensor_type: String,
    /// Human-readable dataset title.
    pub title: String,
    /// Where the sensor is deployed, when known.
    pub location: Option<String>,
    /// When the dataset was captured.
    pub timestamp: Timestamp,
    /// Sensor health reading at capture time, e.g. `96%`.
    pub health: String,
    /// The raw dataset payload, preserved byte-identical through every
    /// derivative generation.
    pub raw_payload: Option<String>,
}

impl SensorSource {
    /// Validate the record fields the synthesizer depends on.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::new("title", "must not be empty"));
        }
        if self.sensor_type.trim().is_empty() {
            return Err(ValidationError::new("sensorType", "must not be empty"));
        }
        Ok(())
    }

    /// The location label used in documents and display attributes.
    pub fn location_label(&self) -> &str {
        self.location
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(UNSPECIFIED_LOCATION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source() -> SensorSource {
        SensorSource {
            record_id: None,
            sensor_type: "moisture".into(),
            title: "Soil Moisture Levels".into(),
            location: None,
            timestamp: Timestamp::parse("2024-01-15T18:00:00Z").unwrap(),
            health: "96%".into(),
            raw_payload: None,
        }
    }

    #[test]
    fn validate_accepts_minimal_record() {
        assert!(source().validate().is_ok());
    }

    #[test]
    fn validate_rejects_blank_title() {
        let mut s = source();
        s.title = "  ".into();
        assert!(s.validate().is_err());
    }

    #[test]
    fn validate_rejects_blank_type() {
        let mut s = source();
        s.sensor_type = "".into();
        assert!(s.validate().is_err());
    }

    #[test]
    fn location_label_falls_back() {
        let mut s = source();
        assert_eq!(s.location_label(), UNSPECIFIED_LOCATION);
        s.location = Some("".into());
        assert_eq!(s.location_label(), UNSPECIFIED_LOCATION);
        s.location = Some("Greenhouse 4".into());
        assert_eq!(s.location_label(), "Greenhouse 4");
    }
}
