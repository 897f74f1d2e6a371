use thiserror::Error;

/// Errors that can occur while loading or decoding a workbook
#[derive(Error, Debug)]
pub enum SheetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Workbook error: {0}")]
    Workbook(String),

    #[error("Unsupported workbook format: {0}")]
    UnsupportedFormat(String),

    #[error("HTTP error: {0}")]
    Http(#[from] sortable_http::HttpError),

    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error(transparent)]
    Core(#[from] sortable_core::SortableError),
}

pub type Result<T> = std::result::Result<T, SheetError>;
