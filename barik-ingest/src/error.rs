use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    /// Extraction finished without a single transaction.
    #[error("no transactions found in statement")]
    EmptyLedger,

    #[error("row threshold must be a positive number, got {0}")]
    InvalidThreshold(f64),

    #[error("page {page} out of range (document has {count} pages)")]
    PageOutOfRange { page: usize, count: usize },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid page dump: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid row pattern: {0}")]
    Pattern(#[from] regex::Error),
}
