use std::collections::BTreeMap;
use std::path::Path;

use crate::error::ProjectionError;
use crate::models::{CountryRecord, CountryStore, Projection};

/// Read a country store from a JSON object keyed by country name.
pub fn read_countries_json(path: impl AsRef<Path>) -> Result<CountryStore, ProjectionError> {
    let content = std::fs::read_to_string(path.as_ref())?;
    parse_countries(&content)
}

/// Read a country store from JSON bytes.
pub fn read_countries_from_bytes(data: &[u8]) -> Result<CountryStore, ProjectionError> {
    let content = std::str::from_utf8(data)
        .map_err(|e| ProjectionError::ValidationError(format!("Invalid UTF-8: {e}")))?;
    parse_countries(content)
}

fn parse_countries(content: &str) -> Result<CountryStore, ProjectionError> {
    let records: BTreeMap<String, CountryRecord> = serde_json::from_str(content)?;
    CountryStore::from_records(records)
}

/// Serialize a projection to a JSON string.
pub fn projection_to_json(projection: &Projection, pretty: bool) -> Result<String, ProjectionError> {
    let content = if pretty {
        serde_json::to_string_pretty(projection)?
    } else {
        serde_json::to_string(projection)?
    };
    Ok(content)
}

/// Write a projection to a JSON file.
pub fn write_projection_json(
    projection: &Projection,
    path: impl AsRef<Path>,
    pretty: bool,
) -> Result<(), ProjectionError> {
    std::fs::write(path.as_ref(), projection_to_json(projection, pretty)?)?;
    Ok(())
}

/// Read a projection previously written with [`write_projection_json`].
pub fn read_projection_json(path: impl AsRef<Path>) -> Result<Projection, ProjectionError> {
    let content = std::fs::read_to_string(path.as_ref())?;
    Ok(serde_json::from_str(&content)?)
}
