//! JSON export surface: serializes joined records to a file.
//! Passwords never leave the credentials table (skipped at the serde level).

use crate::core::error::RegistrarError;
use crate::core::record::EntityRecord;
use std::fs;
use std::path::Path;

pub fn export_json(records: &[EntityRecord], path: &Path) -> Result<usize, RegistrarError> {
    if records.is_empty() {
        return Err(RegistrarError::Validation(
            "no records to export".to_string(),
        ));
    }
    let body = serde_json::to_string_pretty(records)?;
    fs::write(path, body).map_err(RegistrarError::Io)?;
    Ok(records.len())
}
