use thiserror::Error;

/// Errors raised while locating or parsing a workbook.
#[derive(Debug, Error)]
pub enum SheetError {
    /// A directory or file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The file exists but is not a readable workbook.
    #[error("failed to parse workbook {path}: {source}")]
    Workbook {
        path: String,
        #[source]
        source: calamine::Error,
    },

    #[error("workbook {path} has no sheets")]
    NoSheets { path: String },
}
