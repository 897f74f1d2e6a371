//! Workbook sources and asynchronous loading.

use crate::csv::decode_csv;
use crate::error::Result;
use crate::format::WorkbookFormat;
use crate::records::SheetRecords;
use crate::workbook::decode_workbook;
use sortable_http::HttpClient;
use std::path::PathBuf;

/// Where a workbook comes from.
#[derive(Debug, Clone)]
pub enum Source {
    /// Local file; the format follows the extension
    Path(PathBuf),
    /// Remote file fetched over HTTP; the format follows the URL extension
    Url(String),
    /// Bytes already in memory
    Bytes { data: Vec<u8>, format: WorkbookFormat },
}

impl Source {
    /// Interpret a command-line style location as a URL or a path
    pub fn parse(location: &str) -> Self {
        if location.starts_with("http://") || location.starts_with("https://") {
            Source::Url(location.to_string())
        } else {
            Source::Path(PathBuf::from(location))
        }
    }

    /// Format of the source, detected from its extension when needed
    pub fn format(&self) -> Result<WorkbookFormat> {
        match self {
            Source::Path(path) => WorkbookFormat::from_location(&path.to_string_lossy()),
            Source::Url(url) => WorkbookFormat::from_location(url),
            Source::Bytes { format, .. } => Ok(*format),
        }
    }
}

/// Decode in-memory workbook bytes into one [`SheetRecords`] per sheet, in
/// workbook order.
pub fn decode(data: Vec<u8>, format: WorkbookFormat) -> Result<Vec<SheetRecords>> {
    match format {
        WorkbookFormat::Csv => Ok(vec![decode_csv(data.as_slice())?]),
        _ => decode_workbook(data, format),
    }
}

/// Load and decode a workbook.
///
/// File reads and decoding run on the blocking thread pool; URLs are
/// fetched with a fresh [`HttpClient`]. Nothing is decoded when the read or
/// fetch fails.
pub async fn load(source: Source) -> Result<Vec<SheetRecords>> {
    load_with_client(source, &HttpClient::new()?).await
}

/// Like [`load`], fetching URLs with the given client.
pub async fn load_with_client(source: Source, client: &HttpClient) -> Result<Vec<SheetRecords>> {
    let format = source.format()?;
    let data = match source {
        Source::Path(path) => {
            tracing::debug!(path = %path.display(), %format, "reading workbook");
            tokio::task::spawn_blocking(move || std::fs::read(path)).await??
        }
        Source::Url(url) => {
            tracing::debug!(%url, %format, "fetching workbook");
            client.fetch_bytes(&url).await?
        }
        Source::Bytes { data, .. } => data,
    };

    let sheets = tokio::task::spawn_blocking(move || decode(data, format)).await??;
    tracing::info!(%format, sheets = sheets.len(), "workbook loaded");
    Ok(sheets)
}
