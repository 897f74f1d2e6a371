//! Workbook loading for sortable tables
//!
//! Reads `xlsx`, `xls`, `xlsb`, `ods` and `csv` files from disk, over HTTP
//! or from memory, and turns each sheet into header-keyed records. The
//! first row of a sheet names the columns.
//!
//! # Examples
//!
//! ```
//! use sortable_sheet::{decode, WorkbookFormat};
//!
//! let sheets = decode(b"name,price\nTea,2.5\n".to_vec(), WorkbookFormat::Csv).unwrap();
//! let table = sheets.into_iter().next().unwrap().into_table().unwrap();
//!
//! assert_eq!(table.headers(), ["name", "price"]);
//! assert_eq!(table.height(), 1);
//! ```
//!
//! ## Loading asynchronously
//!
//! ```no_run
//! use sortable_sheet::{load, Source};
//!
//! # async fn run() -> sortable_sheet::Result<()> {
//! let sheets = load(Source::parse("https://example.com/prices.xlsx")).await?;
//! # Ok(())
//! # }
//! ```

mod csv;
mod datetime;
mod error;
mod format;
mod load;
mod records;
mod workbook;

pub use crate::csv::CSV_SHEET_NAME;
pub use datetime::{format_serial, serial_to_datetime};
pub use error::{Result, SheetError};
pub use format::WorkbookFormat;
pub use load::{decode, load, load_with_client, Source};
pub use records::{SheetRecords, EMPTY_HEADER};
