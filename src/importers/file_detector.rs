use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Physical format of a tabular source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Excel,
    Csv,
}

const ZIP_MAGIC: &[u8] = b"PK\x03\x04";
const OLE_MAGIC: &[u8] = b"\xD0\xCF\x11\xE0\xA1\xB1\x1A\xE1";

/// Detect the format of a source file
///
/// Detection strategy:
/// - `.csv` / `.txt` → CSV, no content check (decoding catches the rest)
/// - `.xlsx` / `.xlsm` / `.xlsb` / `.ods` → must start with a zip header
/// - `.xls` → must start with an OLE compound document header
///
/// Returns the reason as the error so callers can attach the source kind.
pub fn detect_format(path: &Path) -> Result<SourceFormat, String> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .ok_or_else(|| "file has no extension (expected .xlsx or .csv)".to_string())?
        .to_lowercase();

    let expected_magic = match extension.as_str() {
        "csv" | "txt" => {
            debug!("Detected CSV source: {:?}", path);
            return Ok(SourceFormat::Csv);
        }
        "xlsx" | "xlsm" | "xlsb" | "ods" => ZIP_MAGIC,
        "xls" => OLE_MAGIC,
        other => {
            return Err(format!(
                "unsupported file format: .{}. Supported formats: .xlsx, .xls, .xlsm, .xlsb, .ods, .csv",
                other
            ))
        }
    };

    let mut header = [0u8; 8];
    let read = File::open(path)
        .and_then(|mut f| f.read(&mut header))
        .map_err(|e| format!("failed to read file: {}", e))?;

    if read < expected_magic.len() || &header[..expected_magic.len()] != expected_magic {
        return Err(format!(
            "not a valid .{} workbook (file signature does not match)",
            extension
        ));
    }

    debug!("Detected Excel source: {:?}", path);
    Ok(SourceFormat::Excel)
}
