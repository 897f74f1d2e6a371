//! The sort engine.
//!
//! Rows are ordered by a single active column. Pinned minimum and maximum
//! values are checked before the column's comparator, in that order, and
//! keep their end of the column in either direction relative to the rest:
//! a pinned minimum leads under `asc` and trails under `desc`. The sort is
//! stable, so rows that compare equal keep their previous relative order.
//!
//! The `number` comparator treats unparseable operands as equal to anything,
//! which is not a total order, and caller comparators may not be one either.
//! Rows are therefore ordered with a merge sort that only ever asks "is the
//! right element strictly smaller" and never relies on transitivity.

use crate::cell::Cell;
use crate::compare::{Comparator, Direction};
use crate::error::{Result, SortableError};
use crate::profile::Column;
use crate::registry::Registry;
use crate::table::{Row, Table};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Active sort column and direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SortState {
    pub column: Option<usize>,
    pub direction: Direction,
}

impl SortState {
    /// No active sort
    pub fn none() -> Self {
        Self::default()
    }

    pub fn new(column: usize, direction: Direction) -> Self {
        Self {
            column: Some(column),
            direction,
        }
    }

    /// State after a sort request on `column`.
    ///
    /// Requesting the active column flips the direction; any other column
    /// becomes active in `asc`.
    #[must_use]
    pub fn request(self, column: usize) -> Self {
        match self.column {
            Some(active) if active == column => Self::new(column, self.direction.toggled()),
            _ => Self::new(column, Direction::Asc),
        }
    }

    pub fn is_active(&self) -> bool {
        self.column.is_some()
    }
}

/// Resolved comparison for one column: pinned values plus type comparator.
struct ColumnOrder<'a> {
    index: usize,
    column: &'a Column,
    comparator: Comparator,
    direction: Direction,
}

impl ColumnOrder<'_> {
    fn compare(&self, a: &Row, b: &Row) -> Ordering {
        let a = &a[self.index];
        let b = &b[self.index];

        if let Some(min) = &self.column.min_value {
            if let Some(ordering) = pinned(a, b, min) {
                return self.direction.apply(ordering);
            }
        }
        if let Some(max) = &self.column.max_value {
            if let Some(ordering) = pinned(a, b, max) {
                return self.direction.apply(ordering.reverse());
            }
        }

        self.comparator.compare(a, b, self.direction)
    }
}

/// Ascending placement of a pinned minimum, or `None` when neither cell is
/// pinned.
fn pinned(a: &Cell, b: &Cell, value: &str) -> Option<Ordering> {
    match (a.text() == value, b.text() == value) {
        (true, true) => Some(Ordering::Equal),
        (true, false) => Some(Ordering::Less),
        (false, true) => Some(Ordering::Greater),
        (false, false) => None,
    }
}

/// Compute the stable order of `rows` under `state`.
///
/// Returns row indices into `rows`. With no active column the input order
/// is kept.
pub fn sort_order(
    rows: &[Row],
    columns: &[Column],
    registry: &Registry,
    state: SortState,
) -> Result<Vec<usize>> {
    let mut order: Vec<usize> = (0..rows.len()).collect();
    let Some(index) = state.column else {
        return Ok(order);
    };

    let column = columns.get(index).ok_or(SortableError::ColumnOutOfBounds {
        index,
        count: columns.len(),
    })?;
    let by = ColumnOrder {
        index,
        column,
        comparator: registry.comparator(&column.kind)?,
        direction: state.direction,
    };

    tracing::debug!(
        column = index,
        kind = %column.kind,
        direction = %state.direction,
        rows = rows.len(),
        "sorting rows"
    );

    merge_sort_by(&mut order, |&a, &b| by.compare(&rows[a], &rows[b]));
    Ok(order)
}

/// Stable bottom-up merge sort.
fn merge_sort_by<T: Copy>(items: &mut [T], mut compare: impl FnMut(&T, &T) -> Ordering) {
    let len = items.len();
    if len < 2 {
        return;
    }

    let mut buffer = items.to_vec();
    let mut width = 1;
    while width < len {
        for start in (0..len).step_by(2 * width) {
            let mid = (start + width).min(len);
            let end = (start + 2 * width).min(len);
            merge(&items[start..mid], &items[mid..end], &mut buffer[start..end], &mut compare);
        }
        items.copy_from_slice(&buffer);
        width *= 2;
    }
}

/// Merge two sorted runs into `out`; ties take from `left`.
fn merge<T: Copy>(
    left: &[T],
    right: &[T],
    out: &mut [T],
    compare: &mut impl FnMut(&T, &T) -> Ordering,
) {
    let (mut i, mut j) = (0, 0);
    for slot in out.iter_mut() {
        let take_left = j >= right.len()
            || (i < left.len() && compare(&left[i], &right[j]) != Ordering::Greater);
        if take_left {
            *slot = left[i];
            i += 1;
        } else {
            *slot = right[j];
            j += 1;
        }
    }
}

/// Order the rows of a table under `state`, returning the original rows.
pub fn sort<'t>(
    table: &'t Table,
    columns: &[Column],
    registry: &Registry,
    state: SortState,
) -> Result<Vec<&'t Row>> {
    let rows = table.rows();
    let order = sort_order(rows, columns, registry, state)?;
    Ok(order.into_iter().map(|i| &rows[i]).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tag::TypeTag;

    fn rows(values: &[&str]) -> Vec<Row> {
        values.iter().map(|v| vec![Cell::from(*v)]).collect()
    }

    fn column(kind: TypeTag) -> Column {
        Column {
            kind,
            ..Column::default()
        }
    }

    fn sorted(values: &[&str], column: &Column, direction: Direction) -> Vec<String> {
        let rows = rows(values);
        let order = sort_order(
            &rows,
            std::slice::from_ref(column),
            &Registry::default(),
            SortState::new(0, direction),
        )
        .unwrap();
        order.into_iter().map(|i| values[i].to_string()).collect()
    }

    #[test]
    fn test_request_toggles() {
        let state = SortState::none().request(0);
        assert_eq!(state, SortState::new(0, Direction::Asc));
        let state = state.request(0);
        assert_eq!(state, SortState::new(0, Direction::Desc));
        let state = state.request(0);
        assert_eq!(state, SortState::new(0, Direction::Asc));
        let state = state.request(0).request(2);
        assert_eq!(state, SortState::new(2, Direction::Asc));
    }

    #[test]
    fn test_no_active_column_keeps_order() {
        let r = rows(&["b", "a"]);
        let order = sort_order(&r, &[column(TypeTag::String)], &Registry::default(), SortState::none())
            .unwrap();
        assert_eq!(order, vec![0, 1]);
    }

    #[test]
    fn test_numeric_sort() {
        let c = column(TypeTag::Number);
        assert_eq!(sorted(&["10", "9", "100"], &c, Direction::Asc), ["9", "10", "100"]);
        assert_eq!(sorted(&["10", "9", "100"], &c, Direction::Desc), ["100", "10", "9"]);
    }

    #[test]
    fn test_pinned_min_leads_asc_and_trails_desc() {
        let c = Column {
            min_value: Some("N/A".to_string()),
            ..column(TypeTag::Number)
        };
        assert_eq!(
            sorted(&["3", "N/A", "1", "2"], &c, Direction::Asc),
            ["N/A", "1", "2", "3"]
        );
        assert_eq!(
            sorted(&["3", "N/A", "1", "2"], &c, Direction::Desc),
            ["3", "2", "1", "N/A"]
        );
    }

    #[test]
    fn test_pinned_max_trails_asc_and_leads_desc() {
        let c = Column {
            max_value: Some("0".to_string()),
            ..column(TypeTag::Number)
        };
        assert_eq!(sorted(&["3", "0", "1"], &c, Direction::Asc), ["1", "3", "0"]);
        assert_eq!(sorted(&["3", "0", "1"], &c, Direction::Desc), ["0", "3", "1"]);
    }

    #[test]
    fn test_pinned_min_takes_priority_over_max() {
        let c = Column {
            min_value: Some("-".to_string()),
            max_value: Some("x".to_string()),
            ..column(TypeTag::String)
        };
        assert_eq!(sorted(&["x", "b", "-", "a"], &c, Direction::Asc), ["-", "a", "b", "x"]);
        assert_eq!(sorted(&["a", "x", "-"], &c, Direction::Desc), ["x", "a", "-"]);

        let same = Column {
            min_value: Some("z".to_string()),
            max_value: Some("z".to_string()),
            ..column(TypeTag::String)
        };
        assert_eq!(sorted(&["b", "z", "a"], &same, Direction::Asc), ["z", "a", "b"]);
    }

    #[test]
    fn test_equal_pinned_rows_keep_order() {
        let c = Column {
            min_value: Some("N/A".to_string()),
            ..column(TypeTag::String)
        };
        let r = vec![
            vec![Cell::from("N/A"), Cell::from("first")],
            vec![Cell::from("b"), Cell::from("x")],
            vec![Cell::from("N/A"), Cell::from("second")],
        ];
        let columns = vec![c, column(TypeTag::String)];
        for direction in [Direction::Asc, Direction::Desc] {
            let order =
                sort_order(&r, &columns, &Registry::default(), SortState::new(0, direction)).unwrap();
            let pinned: Vec<_> = order.iter().filter(|&&i| i != 1).copied().collect();
            assert_eq!(pinned, vec![0, 2]);
        }
    }

    #[test]
    fn test_out_of_bounds_column() {
        let r = rows(&["a"]);
        let err = sort_order(&r, &[column(TypeTag::String)], &Registry::default(), SortState::new(3, Direction::Asc))
            .unwrap_err();
        assert!(matches!(err, SortableError::ColumnOutOfBounds { index: 3, count: 1 }));
    }

    #[test]
    fn test_unknown_comparator_fails_before_sorting() {
        let r = rows(&["a", "b"]);
        let err = sort_order(
            &r,
            &[column(TypeTag::custom("money"))],
            &Registry::default(),
            SortState::new(0, Direction::Asc),
        )
        .unwrap_err();
        assert!(matches!(err, SortableError::UnknownComparator { .. }));
    }

    #[test]
    fn test_merge_sort_matches_std_stable_sort() {
        let keys: Vec<(u32, usize)> = (0..1000).map(|i| ((i * 7919 % 13) as u32, i)).collect();
        let mut ours = keys.clone();
        merge_sort_by(&mut ours, |a, b| a.0.cmp(&b.0));
        let mut expected = keys;
        expected.sort_by(|a, b| a.0.cmp(&b.0));
        assert_eq!(ours, expected);

        let mut single = [1];
        merge_sort_by(&mut single, |a: &i32, b: &i32| a.cmp(b));
        assert_eq!(single, [1]);
    }

    #[test]
    fn test_unparseable_numbers_do_not_break_sorting() {
        let values: Vec<String> = (0..300)
            .map(|i| {
                if i % 3 == 0 {
                    "n/a".to_string()
                } else {
                    ((i * 37) % 101).to_string()
                }
            })
            .collect();
        let refs: Vec<&str> = values.iter().map(String::as_str).collect();
        let c = column(TypeTag::Number);

        for direction in [Direction::Asc, Direction::Desc] {
            let mut result = sorted(&refs, &c, direction);
            assert_eq!(result.len(), refs.len());
            result.sort();
            let mut input: Vec<String> = values.clone();
            input.sort();
            assert_eq!(result, input);
        }
    }

    #[test]
    fn test_pinned_unparseable_leaves_numbers_ordered() {
        let values: Vec<String> = (0..200)
            .map(|i| {
                if i % 4 == 0 {
                    "n/a".to_string()
                } else {
                    ((i * 53) % 97).to_string()
                }
            })
            .collect();
        let refs: Vec<&str> = values.iter().map(String::as_str).collect();
        let c = Column {
            min_value: Some("n/a".to_string()),
            ..column(TypeTag::Number)
        };

        let asc = sorted(&refs, &c, Direction::Asc);
        assert!(asc[..50].iter().all(|v| v == "n/a"));
        let numbers: Vec<f64> = asc[50..].iter().map(|v| v.parse().unwrap()).collect();
        assert!(numbers.windows(2).all(|w| w[0] <= w[1]));

        let desc = sorted(&refs, &c, Direction::Desc);
        assert!(desc[150..].iter().all(|v| v == "n/a"));
        let numbers: Vec<f64> = desc[..150].iter().map(|v| v.parse().unwrap()).collect();
        assert!(numbers.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn test_large_sort_is_stable() {
        let r: Vec<Row> = (0..500)
            .map(|i| vec![Cell::from(((i * 31) % 7).to_string()), Cell::Number(i as f64)])
            .collect();
        let columns = vec![column(TypeTag::Number), column(TypeTag::Number)];

        for direction in [Direction::Asc, Direction::Desc] {
            let order =
                sort_order(&r, &columns, &Registry::default(), SortState::new(0, direction)).unwrap();
            for pair in order.windows(2) {
                let (a, b) = (&r[pair[0]], &r[pair[1]]);
                if a[0] == b[0] {
                    assert!(pair[0] < pair[1], "equal keys reordered");
                } else {
                    let expected = direction.apply(Ordering::Less);
                    assert_eq!(a[0].as_float().partial_cmp(&b[0].as_float()), Some(expected));
                }
            }
        }
    }

    #[test]
    fn test_sorting_sorted_rows_is_identity() {
        let r: Vec<Row> = (0..400)
            .map(|i| vec![Cell::from(format!("k{}", (i * 17) % 23))])
            .collect();
        let columns = vec![column(TypeTag::String)];
        let state = SortState::new(0, Direction::Desc);
        let registry = Registry::default();

        let first = sort_order(&r, &columns, &registry, state).unwrap();
        assert_eq!(first, sort_order(&r, &columns, &registry, state).unwrap());

        let sorted_rows: Vec<Row> = first.iter().map(|&i| r[i].clone()).collect();
        let again = sort_order(&sorted_rows, &columns, &registry, state).unwrap();
        assert_eq!(again, (0..sorted_rows.len()).collect::<Vec<_>>());
    }

    #[test]
    fn test_sort_returns_original_rows() {
        let table = Table::new(vec!["n".into()], rows(&["b", "a"])).unwrap();
        let sorted = sort(&table, &[column(TypeTag::String)], &Registry::default(), SortState::new(0, Direction::Asc))
            .unwrap();
        assert!(std::ptr::eq(sorted[0], &table.rows()[1]));
        assert!(std::ptr::eq(sorted[1], &table.rows()[0]));
    }
}
