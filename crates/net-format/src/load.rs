use serde::Deserialize;

use crate::errors::LoadError;
use crate::save::{NetSheet, FORMAT_VERSION, SHEET_FORMAT};

/// The identifying fields shared by every file this crate reads.
#[derive(Debug, Clone, Deserialize)]
struct FileHeader {
    format: String,
    version: u32,
}

/// Check the format identifier and version before parsing the body, so a
/// newer file is reported as such rather than as a parse failure.
pub(crate) fn check_header(json: &str, format: &str, supported: u32) -> Result<(), LoadError> {
    let header: FileHeader =
        serde_json::from_str(json).map_err(|e| LoadError::ParseError(e.to_string()))?;

    if header.format != format {
        return Err(LoadError::UnknownFormat(header.format));
    }
    if header.version > supported {
        return Err(LoadError::FutureVersion {
            file_version: header.version,
            supported_version: supported,
        });
    }
    Ok(())
}

/// Deserialize a sheet from a JSON string.
pub fn load_sheet(json: &str) -> Result<NetSheet, LoadError> {
    check_header(json, SHEET_FORMAT, FORMAT_VERSION)?;
    serde_json::from_str(json).map_err(|e| LoadError::ParseError(e.to_string()))
}
