//! Export and import command handlers

use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::debug;

use directorio_core::snapshot::{self, DIRECTORY_FILE_NAME};
use directorio_core::Directory;

use crate::output::Output;

/// Write the current record set to a directory file
pub fn export(directory: &Directory, path: Option<PathBuf>, output: &Output) -> Result<()> {
    let path = path.unwrap_or_else(|| PathBuf::from(DIRECTORY_FILE_NAME));
    snapshot::write_export(&path, directory.records())?;

    output.success(&format!(
        "Exported {} record(s) to {}",
        directory.records().len(),
        path.display()
    ));
    Ok(())
}

/// Replace the record set with the contents of a user-supplied file
///
/// Invalid JSON or a non-array top level is reported to the user and the
/// record set is left unchanged.
pub fn import(directory: &mut Directory, path: &Path, output: &Output) -> Result<()> {
    let records = snapshot::read_import(path)??;
    let count = directory.replace_records(records);
    debug!("Replaced record set from {:?}", path);

    output.notice(&format!("Imported {} record(s) from {}", count, path.display()));
    Ok(())
}
