//! # provena-cli: Provena Command-Line Interface
//!
//! Drives the provenance pipeline from the terminal:
//!
//! - `register`: register a dataset as an original IP asset
//! - `derive`: register a derivative bound to a licensed parent
//! - `mint`: mint license tokens against an asset
//! - `pay`: pay royalties from a derivative to its parent
//! - `claim`: inspect and claim accrued revenue
//! - `show`: read on-chain and off-chain provenance metadata
//!
//! ## Crate Policy
//!
//! - CLI construction (argument parsing) is separated from business
//!   logic; handlers delegate to the domain crates.
//! - Endpoints and credentials come from the environment
//!   (see [`config::Config::from_env`]).

pub mod claim;
pub mod config;
pub mod derive;
pub mod mint;
pub mod observer;
pub mod pay;
pub mod register;
pub mod show;

use std::path::Path;
use std::sync::Arc;

use provena_core::{SensorRecordId, Timestamp};
use provena_metadata::SensorSource;
use provena_registry::{ProvenanceReader, Registrar};
use provena_storage::Fetcher;

use config::Config;

/// Wire a registrar from the configured collaborators.
pub fn build_registrar(config: &Config) -> anyhow::Result<Registrar> {
    Ok(Registrar::new(
        Arc::new(config.ledger_client()?),
        Arc::new(config.pinning_client()?),
        Arc::new(config.index_client()?),
        config.explorer(),
        config.content_gateway_url.clone(),
    ))
}

/// Wire a provenance reader from the configured collaborators.
pub fn build_reader(config: &Config) -> anyhow::Result<ProvenanceReader> {
    Ok(ProvenanceReader::new(
        Arc::new(config.ledger_client()?),
        Fetcher::new(config.timeout_secs),
        config.content_gateway_url.clone(),
    ))
}

/// Assemble a sensor source record from CLI inputs.
pub fn build_source(
    title: String,
    sensor_type: String,
    location: Option<String>,
    timestamp: Option<&str>,
    health: String,
    payload_file: Option<&Path>,
    record_id: Option<&str>,
) -> anyhow::Result<SensorSource> {
    let timestamp = match timestamp {
        Some(raw) => Timestamp::parse_lenient(raw)?,
        None => Timestamp::now(),
    };
    let raw_payload = match payload_file {
        Some(path) => Some(std::fs::read_to_string(path)?),
        None => None,
    };
    let record_id = match record_id {
        Some(raw) => Some(SensorRecordId::parse(raw)?),
        None => None,
    };
    Ok(SensorSource {
        record_id,
        sensor_type,
        title,
        location,
        timestamp,
        health,
        raw_payload,
    })
}
