//! Column profiling: one type tag and optional pinned values per column.

use crate::guess::TypeGuesser;
use crate::letters::column_letters;
use crate::options::TableOptions;
use crate::table::Table;
use crate::tag::TypeTag;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Resolved metadata for one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    /// Type tag selecting comparator and printer
    pub kind: TypeTag,
    /// Pinned minimum, compared against the cell text verbatim
    pub min_value: Option<String>,
    /// Pinned maximum, compared against the cell text verbatim
    pub max_value: Option<String>,
    pub sortable: bool,
}

impl Default for Column {
    fn default() -> Self {
        Self {
            kind: TypeTag::String,
            min_value: None,
            max_value: None,
            sortable: true,
        }
    }
}

/// Profile every column of a table.
///
/// A column's type is its override when one is given, otherwise the most
/// frequent guess across all of its cells. Ties go to the type seen first
/// while scanning rows top to bottom; a column without rows is `string`.
pub fn profile(table: &Table, options: &TableOptions, guesser: &TypeGuesser) -> Vec<Column> {
    (0..table.width())
        .map(|index| {
            let column_options = options.column(index);
            let kind = match column_options.and_then(|c| c.kind.clone()) {
                Some(kind) => {
                    tracing::debug!(column = %column_letters(index), %kind, "using type override");
                    kind
                }
                None => majority_type(table, index, guesser),
            };

            Column {
                kind,
                min_value: column_options.and_then(|c| c.min_value.clone()),
                max_value: column_options.and_then(|c| c.max_value.clone()),
                sortable: column_options.map_or(true, |c| c.sortable),
            }
        })
        .collect()
}

fn majority_type(table: &Table, index: usize, guesser: &TypeGuesser) -> TypeTag {
    let mut tally: IndexMap<TypeTag, usize> = IndexMap::new();
    for row in table.rows() {
        *tally.entry(guesser.guess(&row[index], index)).or_insert(0) += 1;
    }

    let mut best: Option<(&TypeTag, usize)> = None;
    for (kind, &count) in &tally {
        if best.map_or(true, |(_, top)| count > top) {
            best = Some((kind, count));
        }
    }

    let kind = best.map(|(k, _)| k.clone()).unwrap_or(TypeTag::String);
    tracing::debug!(
        column = %column_letters(index),
        %kind,
        tally = ?tally,
        "inferred column type"
    );
    kind
}
