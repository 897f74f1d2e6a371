//! CSV decoding.

use crate::error::Result;
use crate::records::SheetRecords;
use sortable_core::Cell;
use std::io::Read;

/// Name of the single sheet a CSV file decodes to.
pub const CSV_SHEET_NAME: &str = "Sheet1";

/// Decode CSV text into a single sheet.
///
/// Fields are kept as text; type recognition happens when the table is
/// profiled.
pub(crate) fn decode_csv<R: Read>(reader: R) -> Result<SheetRecords> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false) // header row is named by SheetRecords
        .flexible(true)
        .from_reader(reader);

    let mut rows: Vec<Vec<Cell>> = Vec::new();
    for result in csv_reader.records() {
        let record = result?;
        rows.push(
            record
                .iter()
                .map(|field| {
                    if field.is_empty() {
                        Cell::Empty
                    } else {
                        Cell::from(field)
                    }
                })
                .collect(),
        );
    }

    let sheet = SheetRecords::from_rows(CSV_SHEET_NAME, rows);
    tracing::debug!(
        columns = sheet.headers.len(),
        records = sheet.records.len(),
        "decoded csv"
    );
    Ok(sheet)
}
