//! Import and export of the directory file
//!
//! The file is a pretty-printed JSON array of records. Writes go through a
//! temp file and a rename so a partially written export never replaces a
//! good one.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;

use crate::error::ImportError;
use crate::models::Official;

/// File name used for the published directory and for exports
pub const DIRECTORY_FILE_NAME: &str = "directorio_autoridades.json";

/// Serialize records as a pretty-printed JSON array
pub fn to_pretty_json(records: &[Official]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(records)
}

/// Parse an import file's contents
///
/// Fails only when the text isn't JSON or the top-level value isn't an
/// array. Elements are read leniently, see `Official::from_value`.
pub fn parse_records(text: &str) -> Result<Vec<Official>, ImportError> {
    let value: Value = serde_json::from_str(text).map_err(ImportError::InvalidJson)?;
    records_from_array(value)
}

/// Interpret an already-parsed JSON value as a list of records
pub fn records_from_array(value: Value) -> Result<Vec<Official>, ImportError> {
    let Value::Array(items) = value else {
        return Err(ImportError::NotAnArray);
    };

    Ok(items.into_iter().map(Official::from_value).collect())
}

/// Write records to `path` as the directory file
pub fn write_export(path: &Path, records: &[Official]) -> Result<()> {
    let json = to_pretty_json(records).context("Failed to serialize directory")?;
    atomic_write(path, json.as_bytes())
        .with_context(|| format!("Failed to export directory to {:?}", path))
}

/// Read an import file from disk
///
/// Only the read itself is an `anyhow` error; parsing problems come back as
/// the inner `ImportError` so callers can show them to the user.
pub fn read_import(path: &Path) -> Result<Result<Vec<Official>, ImportError>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read import file {:?}", path))?;
    Ok(parse_records(&text))
}

/// Write data atomically (write to temp file, then rename)
fn atomic_write(path: &Path, data: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {:?}", parent))?;
        }
    }

    let temp_path = path.with_extension("tmp");

    let mut file = File::create(&temp_path)
        .with_context(|| format!("Failed to create temp file {:?}", temp_path))?;

    file.write_all(data)
        .with_context(|| format!("Failed to write to temp file {:?}", temp_path))?;

    file.sync_all()
        .with_context(|| format!("Failed to sync temp file {:?}", temp_path))?;

    fs::rename(&temp_path, path)
        .with_context(|| format!("Failed to rename {:?} to {:?}", temp_path, path))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::seed_records;
    use tempfile::TempDir;

    #[test]
    fn test_pretty_json_is_array() {
        let json = to_pretty_json(&seed_records()).unwrap();
        assert!(json.starts_with('['));
        assert!(json.contains("\n  {"));
        assert!(json.contains("\"nombre\": \"Guillermo Morales Sanchez\""));
    }

    #[test]
    fn test_parse_records_array() {
        let records = parse_records(r#"[{"id":"a","nombre":"Ana"},{"nombre":"Beto"}]"#).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].name(), "Beto");
    }

    #[test]
    fn test_parse_records_allows_duplicate_keys() {
        let records = parse_records(r#"[{"id":"a"},{"id":"a"}]"#).unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_parse_records_empty_array() {
        assert!(parse_records("[]").unwrap().is_empty());
    }

    #[test]
    fn test_parse_records_not_array() {
        assert!(matches!(
            parse_records(r#"{"id":"a"}"#),
            Err(ImportError::NotAnArray)
        ));
        assert!(matches!(parse_records("42"), Err(ImportError::NotAnArray)));
    }

    #[test]
    fn test_parse_records_invalid_json() {
        assert!(matches!(
            parse_records("[{\"id\": "),
            Err(ImportError::InvalidJson(_))
        ));
        assert!(matches!(parse_records(""), Err(ImportError::InvalidJson(_))));
    }

    #[test]
    fn test_parse_records_mistyped_elements() {
        let text = r#"[
            {"id": "x", "nombre": "Ana", "telefono": 73000000, "orden": 2.0},
            {"id": "y", "orden": "3"},
            "oops"
        ]"#;
        let records = parse_records(text).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].phone(), "73000000");
        assert_eq!(records[0].priority(), 2);
        assert_eq!(records[1].priority(), 3);
        assert_eq!(records[2].extra.get("valor"), Some(&Value::from("oops")));
    }

    #[test]
    fn test_export_then_import() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(DIRECTORY_FILE_NAME);

        let records = seed_records();
        write_export(&path, &records).unwrap();
        assert!(path.exists());
        assert!(!path.with_extension("tmp").exists());

        let imported = read_import(&path).unwrap().unwrap();
        assert_eq!(imported, records);
    }

    #[test]
    fn test_export_creates_parent_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested/out").join(DIRECTORY_FILE_NAME);
        write_export(&path, &[]).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "[]");
    }

    #[test]
    fn test_read_import_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        assert!(read_import(&temp_dir.path().join("missing.json")).is_err());
    }
}
