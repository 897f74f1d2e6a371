//! Header naming and record building shared by all decoders.

use crate::error::Result;
use indexmap::IndexMap;
use sortable_core::{Cell, Record, Table};

/// Name given to header cells that are blank.
pub const EMPTY_HEADER: &str = "__EMPTY";

/// The decoded rows of one sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetRecords {
    pub name: String,
    /// Column names taken from the first row
    pub headers: Vec<String>,
    /// One record per non-empty data row; empty cells are absent keys
    pub records: Vec<Record>,
}

impl SheetRecords {
    /// Build records from raw rows, using the first row as headers.
    ///
    /// Rows whose cells are all empty are skipped.
    pub fn from_rows(name: impl Into<String>, rows: impl IntoIterator<Item = Vec<Cell>>) -> Self {
        let mut rows = rows.into_iter();
        let headers = rows
            .next()
            .map(|row| header_names(&row))
            .unwrap_or_default();

        let records = rows
            .filter_map(|row| {
                let record: Record = headers
                    .iter()
                    .zip(row)
                    .filter(|(_, cell)| !cell.text().is_empty())
                    .map(|(header, cell)| (header.clone(), cell))
                    .collect();
                (!record.is_empty()).then_some(record)
            })
            .collect();

        Self {
            name: name.into(),
            headers,
            records,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Convert to a table with one column per header, in header order.
    pub fn into_table(self) -> Result<Table> {
        let rows = self
            .records
            .into_iter()
            .map(|mut record| {
                self.headers
                    .iter()
                    .map(|h| record.swap_remove(h).unwrap_or_default())
                    .collect()
            })
            .collect();
        Ok(Table::from_rows(self.headers, rows)?)
    }
}

/// Name header cells, filling blanks and disambiguating repeats.
///
/// Blank cells become `__EMPTY`, `__EMPTY_1`, ... and a repeated name gets
/// the next free `_n` suffix.
fn header_names(row: &[Cell]) -> Vec<String> {
    let mut seen: IndexMap<String, usize> = IndexMap::new();
    let mut names = Vec::with_capacity(row.len());

    for cell in row {
        let text = cell.text();
        let base = if text.trim().is_empty() {
            EMPTY_HEADER.to_string()
        } else {
            text.into_owned()
        };

        let mut name = base.clone();
        if let Some(count) = seen.get_mut(&base) {
            loop {
                name = format!("{base}_{count}");
                *count += 1;
                if !names.contains(&name) {
                    break;
                }
            }
        } else {
            seen.insert(base, 1);
        }
        names.push(name);
    }

    names
}
