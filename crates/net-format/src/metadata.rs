use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Descriptive data stored with a sheet of nets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetMetadata {
    /// Human-readable sheet name, usually the job file stem.
    pub name: String,
    /// When the nets were generated.
    pub created: DateTime<Utc>,
}

impl SheetMetadata {
    /// Metadata with the given name stamped with the current time.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            created: Utc::now(),
        }
    }
}
