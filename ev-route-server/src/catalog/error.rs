//! Catalog error types.

/// Errors that can occur when loading the station catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The dataset is malformed. Fatal to the whole load.
    #[error("malformed station data at line {line}: {message}")]
    DataFormat { line: u64, message: String },

    /// The dataset could not be read
    #[error("failed to read station data from {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A refresh was requested but no file source is configured
    #[error("no catalog source configured")]
    NoSource,
}

impl CatalogError {
    pub(crate) fn data_format(line: u64, message: impl Into<String>) -> Self {
        CatalogError::DataFormat {
            line,
            message: message.into(),
        }
    }
}
