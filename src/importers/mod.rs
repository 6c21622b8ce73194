// Import module - workbook and CSV loaders for the dashboard sources

mod file_detector;
pub mod investment_reports;
pub mod recommendations;
pub mod tabular;
pub mod trade_history;

use std::path::Path;
use tracing::info;

use crate::error::{LoadError, SourceKind};
pub use file_detector::{detect_format, SourceFormat};
use tabular::Table;

/// Read a source file into a table
///
/// A path that does not exist is `Absent`. Anything else that stops the file
/// from being read as a table is `Malformed`.
pub fn read_table(kind: SourceKind, path: &Path) -> Result<Table, LoadError> {
    match path.try_exists() {
        Ok(true) => {}
        Ok(false) => return Err(LoadError::absent(kind, path)),
        Err(e) => {
            return Err(LoadError::malformed(
                kind,
                path,
                format!("cannot access file: {}", e),
            ))
        }
    }

    if path.is_dir() {
        return Err(LoadError::malformed(kind, path, "path is a directory"));
    }

    let format = detect_format(path).map_err(|reason| LoadError::malformed(kind, path, reason))?;

    info!("Reading {} source: {:?} ({:?})", kind, path, format);

    let table = match format {
        SourceFormat::Excel => tabular::read_workbook(path),
        SourceFormat::Csv => tabular::read_csv(path),
    };

    table.map_err(|reason| LoadError::malformed(kind, path, reason))
}
