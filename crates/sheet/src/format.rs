//! Workbook format detection.

use crate::error::{Result, SheetError};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Container format of a workbook file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WorkbookFormat {
    Xlsx,
    Xls,
    Xlsb,
    Ods,
    Csv,
}

impl WorkbookFormat {
    /// Detect the format from a file extension, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns `SheetError::UnsupportedFormat` for unknown extensions.
    pub fn from_extension(extension: &str) -> Result<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "xlsx" | "xlsm" => Ok(WorkbookFormat::Xlsx),
            "xls" | "xla" => Ok(WorkbookFormat::Xls),
            "xlsb" => Ok(WorkbookFormat::Xlsb),
            "ods" => Ok(WorkbookFormat::Ods),
            "csv" => Ok(WorkbookFormat::Csv),
            other => Err(SheetError::UnsupportedFormat(other.to_string())),
        }
    }

    /// Detect the format from the extension of a path or URL.
    ///
    /// Query strings and fragments of URLs are ignored.
    pub fn from_location(location: &str) -> Result<Self> {
        let location = location.split(['?', '#']).next().unwrap_or(location);
        let extension = Path::new(location)
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| SheetError::UnsupportedFormat(location.to_string()))?;
        Self::from_extension(extension)
    }

    pub fn extension(self) -> &'static str {
        match self {
            WorkbookFormat::Xlsx => "xlsx",
            WorkbookFormat::Xls => "xls",
            WorkbookFormat::Xlsb => "xlsb",
            WorkbookFormat::Ods => "ods",
            WorkbookFormat::Csv => "csv",
        }
    }
}

impl FromStr for WorkbookFormat {
    type Err = SheetError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_extension(s.trim_start_matches('.'))
    }
}

impl fmt::Display for WorkbookFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}
