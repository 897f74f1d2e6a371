use crate::cell::Cell;
use crate::error::{Result, SortableError};
use indexmap::IndexMap;

/// An ordered sequence of cells, one per column.
pub type Row = Vec<Cell>;

/// A decoded row object: header name to raw cell value, in header order.
pub type Record = IndexMap<String, Cell>;

/// Headers plus rows; every row has exactly one cell per header.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Row>,
}

impl Table {
    /// Build a table, rejecting rows whose length differs from the header count.
    pub fn new(headers: Vec<String>, rows: Vec<Row>) -> Result<Self> {
        let expected = headers.len();
        if let Some((row, actual)) = rows
            .iter()
            .enumerate()
            .find(|(_, r)| r.len() != expected)
            .map(|(i, r)| (i, r.len()))
        {
            return Err(SortableError::RowLengthMismatch {
                row,
                expected,
                actual,
            });
        }
        Ok(Self { headers, rows })
    }

    /// Build a table from decoder rows, padding short rows with empty cells.
    ///
    /// Rows longer than the header are rejected.
    pub fn from_rows(headers: Vec<String>, rows: Vec<Row>) -> Result<Self> {
        let width = headers.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                if row.len() < width {
                    row.resize(width, Cell::Empty);
                }
                row
            })
            .collect();
        Self::new(headers, rows)
    }

    /// Build a table from row objects.
    ///
    /// The first record's key order defines the columns. Keys missing from a
    /// later record become [`Cell::Empty`]; keys the first record lacks are
    /// dropped.
    pub fn from_records(records: Vec<Record>) -> Self {
        let headers: Vec<String> = records
            .first()
            .map(|first| first.keys().cloned().collect())
            .unwrap_or_default();

        let rows = records
            .into_iter()
            .map(|mut record| {
                headers
                    .iter()
                    .map(|h| record.swap_remove(h).unwrap_or(Cell::Empty))
                    .collect()
            })
            .collect();

        Self { headers, rows }
    }

    /// Column names in column order
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// All rows in their current order
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.headers.len()
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Check if the table has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Reorder rows by a permutation of row indices.
    pub(crate) fn reorder(&mut self, order: &[usize]) {
        debug_assert_eq!(order.len(), self.rows.len());
        let mut slots: Vec<Option<Row>> = std::mem::take(&mut self.rows)
            .into_iter()
            .map(Some)
            .collect();
        self.rows = order
            .iter()
            .filter_map(|&i| slots.get_mut(i).and_then(Option::take))
            .collect();
    }
}
