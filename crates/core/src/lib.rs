//! Column type inference and sorting for spreadsheet tables.
//!
//! Raw rows go through three steps on every render:
//!
//! 1. [`profile`] assigns each column a [`TypeTag`] (explicit override or
//!    majority vote of per-cell guesses) and its pinned values, once per
//!    load.
//! 2. [`sort`] stably reorders rows by one column, honouring pinned
//!    minimum/maximum values before the type comparator.
//! 3. [`Printer::print`] normalizes each cell for display.
//!
//! [`SortableTable`] bundles the three with a per-table [`Registry`] and
//! the current [`SortState`].
//!
//! # Examples
//!
//! ```
//! use sortable_core::{Cell, Registry, SortableTable, Table, TableOptions};
//!
//! let table = Table::new(
//!     vec!["n".into(), "s".into()],
//!     vec![
//!         vec![Cell::from("3"), Cell::from("b")],
//!         vec![Cell::from("1"), Cell::from("a")],
//!         vec![Cell::from("2"), Cell::from("c")],
//!     ],
//! )
//! .unwrap();
//!
//! let mut widget = SortableTable::new(table, TableOptions::default(), Registry::default()).unwrap();
//! widget.request_sort(0).unwrap();
//! assert_eq!(widget.display_rows().unwrap()[0], vec!["1", "a"]);
//! ```
//!
//! ## Pinned values
//!
//! ```
//! use sortable_core::{Cell, Registry, SortableTable, Table, TableOptions};
//!
//! let table = Table::new(
//!     vec!["score".into()],
//!     vec![vec![Cell::from("7")], vec![Cell::from("N/A")], vec![Cell::from("5")]],
//! )
//! .unwrap();
//! let options = TableOptions::from_attributes([("minValueA", "N/A")]).unwrap();
//!
//! let mut widget = SortableTable::new(table, options, Registry::default()).unwrap();
//! widget.request_sort(0).unwrap();
//! widget.request_sort(0).unwrap(); // desc
//! let first: Vec<_> = widget.display_rows().unwrap().into_iter().map(|r| r[0].clone()).collect();
//! assert_eq!(first, vec!["7", "5", "N/A"]);
//! ```

mod cell;
mod compare;
mod error;
mod guess;
mod html;
mod letters;
mod options;
mod print;
mod profile;
mod registry;
mod sort;
mod table;
mod tag;
mod widget;

pub use cell::Cell;
pub use compare::{normalize_date, CompareFn, Comparator, ComparatorRegistry, Direction};
pub use error::{Result, SortableError};
pub use guess::{guess_builtin, parse_float, GuessFn, TypeGuesser};
pub use html::escape as escape_html;
pub use letters::{column_index, column_letters};
pub use options::{
    AttributeValue, ColumnOptions, TableOptions, DEFAULT_SORT_CLASS, DEFAULT_TABLE_CLASS,
};
pub use print::{PrintFn, Printer, PrinterRegistry};
pub use profile::{profile, Column};
pub use registry::{Registry, RegistryBuilder};
pub use sort::{sort, sort_order, SortState};
pub use table::{Record, Row, Table};
pub use tag::TypeTag;
pub use widget::{Listener, SortableTable};
