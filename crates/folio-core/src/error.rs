use thiserror::Error;

pub type Result<T> = std::result::Result<T, FolioError>;

/// Failures at the configuration and catalog-loading edges.
///
/// Gallery and lightbox operations are total and never produce one of these.
#[derive(Debug, Error)]
pub enum FolioError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("page size must be > 0 (got {page_size})")]
    InvalidPageSize { page_size: usize },

    #[error("configuration field must not be blank: {field}")]
    EmptyField { field: &'static str },
}
