use net_ops::Net;
use net_types::NetParameters;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ExportError;
use crate::metadata::SheetMetadata;

/// Format identifier of sheet files.
pub const SHEET_FORMAT: &str = "finger-net-sheet";

/// Current sheet file format version.
pub const FORMAT_VERSION: u32 = 1;

/// A net together with the name of the solid it came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedNet {
    pub name: String,
    pub net: Net,
}

/// The top-level sheet file structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetSheet {
    /// Format identifier.
    pub format: String,
    /// Format version number.
    pub version: u32,
    /// Unique id of this generation run.
    pub id: Uuid,
    pub metadata: SheetMetadata,
    /// Parameters every net on the sheet was built with.
    pub parameters: NetParameters,
    pub nets: Vec<NamedNet>,
}

impl NetSheet {
    /// A new sheet with a fresh id.
    pub fn new(metadata: SheetMetadata, parameters: NetParameters, nets: Vec<NamedNet>) -> Self {
        Self {
            format: SHEET_FORMAT.to_string(),
            version: FORMAT_VERSION,
            id: Uuid::new_v4(),
            metadata,
            parameters,
            nets,
        }
    }

    pub fn net(&self, name: &str) -> Option<&Net> {
        self.nets.iter().find(|n| n.name == name).map(|n| &n.net)
    }
}

/// Serialize a sheet to a pretty-printed JSON string.
pub fn save_sheet(sheet: &NetSheet) -> Result<String, ExportError> {
    serde_json::to_string_pretty(sheet).map_err(|e| ExportError::Serialize(e.to_string()))
}
