//! Spreadsheet decoding through calamine.

use crate::datetime::format_serial;
use crate::error::{Result, SheetError};
use crate::format::WorkbookFormat;
use crate::records::SheetRecords;
use calamine::{Data, Ods, Reader, Xls, Xlsb, Xlsx};
use sortable_core::Cell;
use std::fmt::Display;
use std::io::Cursor;

/// Convert calamine Data to a Cell
fn data_to_cell(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::String(s) if s.is_empty() => Cell::Empty,
        Data::String(s) => Cell::Text(s.clone()),
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Float(f) => Cell::Number(*f),
        Data::Bool(b) => Cell::Text(if *b { "TRUE" } else { "FALSE" }.to_string()),
        Data::DateTime(dt) => {
            let serial = dt.as_f64();
            format_serial(serial).map_or_else(
                || {
                    tracing::warn!(serial, "date serial out of range, keeping number");
                    Cell::Number(serial)
                },
                Cell::Text,
            )
        }
        Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
        Data::Error(_) => Cell::Text("#ERROR".to_string()),
    }
}

fn workbook_error(e: impl Display) -> SheetError {
    SheetError::Workbook(e.to_string())
}

/// Decode every sheet of a workbook held in memory.
pub(crate) fn decode_workbook(data: Vec<u8>, format: WorkbookFormat) -> Result<Vec<SheetRecords>> {
    let cursor = Cursor::new(data);
    match format {
        WorkbookFormat::Xlsx => read_sheets(Xlsx::new(cursor).map_err(workbook_error)?),
        WorkbookFormat::Xls => read_sheets(Xls::new(cursor).map_err(workbook_error)?),
        WorkbookFormat::Xlsb => read_sheets(Xlsb::new(cursor).map_err(workbook_error)?),
        WorkbookFormat::Ods => read_sheets(Ods::new(cursor).map_err(workbook_error)?),
        WorkbookFormat::Csv => Err(SheetError::UnsupportedFormat(format.to_string())),
    }
}

fn read_sheets<R>(mut workbook: R) -> Result<Vec<SheetRecords>>
where
    R: Reader<Cursor<Vec<u8>>>,
    R::Error: Display,
{
    let sheet_names = workbook.sheet_names();
    let mut sheets = Vec::with_capacity(sheet_names.len());

    for name in sheet_names {
        let range = workbook.worksheet_range(&name).map_err(workbook_error)?;
        let rows = range
            .rows()
            .map(|row| row.iter().map(data_to_cell).collect::<Vec<_>>());
        let sheet = SheetRecords::from_rows(name, rows);
        if sheet.headers.is_empty() {
            tracing::warn!(sheet = %sheet.name, "sheet has no header row");
        }
        tracing::debug!(
            sheet = %sheet.name,
            columns = sheet.headers.len(),
            records = sheet.records.len(),
            "decoded sheet"
        );
        sheets.push(sheet);
    }

    Ok(sheets)
}
