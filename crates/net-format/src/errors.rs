use net_ops::NetError;

/// Errors while reading a job or sheet file.
#[derive(Debug, Clone, thiserror::Error)]
pub enum LoadError {
    #[error("failed to parse file: {0}")]
    ParseError(String),

    #[error("unknown file format: {0}")]
    UnknownFormat(String),

    #[error("file version {file_version} is newer than supported version {supported_version}")]
    FutureVersion {
        file_version: u32,
        supported_version: u32,
    },

    #[error("invalid solid '{name}': {reason}")]
    InvalidSolid { name: String, reason: String },
}

/// Errors while producing nets or writing output.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ExportError {
    #[error("net for '{name}' failed: {source}")]
    Net {
        name: String,
        #[source]
        source: NetError,
    },

    #[error("serialization failed: {0}")]
    Serialize(String),

    #[error("job contains no solids")]
    NoSolids,
}
