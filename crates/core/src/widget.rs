//! A sortable table instance: profile once, sort on request, print for display.

use crate::error::{Result, SortableError};
use crate::letters::column_letters;
use crate::options::TableOptions;
use crate::profile::{profile, Column};
use crate::registry::Registry;
use crate::sort::{sort_order, SortState};
use crate::table::Table;
use std::fmt;

/// Listener notified with the current sort state.
pub type Listener = Box<dyn FnMut(&SortState) + Send>;

/// One table with its own registry, column metadata and sort state.
pub struct SortableTable {
    table: Table,
    columns: Vec<Column>,
    registry: Registry,
    options: TableOptions,
    state: SortState,
    on_sorted: Vec<Listener>,
}

impl SortableTable {
    /// Profile the table and apply the initial sort from the options.
    ///
    /// Fails when a column type has no comparator or printer, or when the
    /// initial sort column is out of range.
    pub fn new(table: Table, options: TableOptions, registry: Registry) -> Result<Self> {
        let columns = profile(&table, &options, registry.guesser());
        registry.validate(&columns)?;

        let mut widget = Self {
            table,
            columns,
            registry,
            options,
            state: SortState::none(),
            on_sorted: Vec::new(),
        };

        if let (Some(column), Some(direction)) = (widget.options.sort_by, widget.options.sort_dir) {
            widget.apply(SortState::new(column, direction))?;
        }

        tracing::info!(
            columns = widget.table.width(),
            rows = widget.table.height(),
            "table loaded"
        );
        Ok(widget)
    }

    /// Register a listener fired after every successful sort request
    pub fn on_sorted(&mut self, listener: impl FnMut(&SortState) + Send + 'static) {
        self.on_sorted.push(Box::new(listener));
    }

    /// Handle a header click on `column`.
    ///
    /// The new state is committed only when the rows were reordered.
    pub fn request_sort(&mut self, column: usize) -> Result<SortState> {
        if column >= self.table.width() {
            return Err(SortableError::ColumnOutOfBounds {
                index: column,
                count: self.table.width(),
            });
        }
        if !self.columns[column].sortable {
            return Err(SortableError::ColumnNotSortable {
                column: column_letters(column),
            });
        }

        self.apply(self.state.request(column))?;
        for listener in &mut self.on_sorted {
            listener(&self.state);
        }
        Ok(self.state)
    }

    fn apply(&mut self, next: SortState) -> Result<()> {
        let order = sort_order(self.table.rows(), &self.columns, &self.registry, next)?;
        self.table.reorder(&order);
        self.state = next;
        Ok(())
    }

    /// Rows in current order with each cell passed through its column printer
    pub fn display_rows(&self) -> Result<Vec<Vec<String>>> {
        let printers = self
            .columns
            .iter()
            .map(|c| self.registry.printer(&c.kind))
            .collect::<Result<Vec<_>>>()?;

        Ok(self
            .table
            .rows()
            .iter()
            .map(|row| {
                row.iter()
                    .zip(&printers)
                    .map(|(cell, printer)| printer.print(cell))
                    .collect()
            })
            .collect())
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn state(&self) -> SortState {
        self.state
    }

    pub fn options(&self) -> &TableOptions {
        &self.options
    }
}

impl fmt::Debug for SortableTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SortableTable")
            .field("headers", &self.table.headers())
            .field("rows", &self.table.height())
            .field("columns", &self.columns)
            .field("state", &self.state)
            .finish()
    }
}
