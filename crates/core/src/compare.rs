//! Type-keyed comparators.

use crate::cell::Cell;
use crate::error::{Result, SortableError};
use crate::tag::TypeTag;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, OnceLock};

/// Ascending comparison registered by a caller for a type tag.
pub type CompareFn = Arc<dyn Fn(&Cell, &Cell) -> Ordering + Send + Sync>;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl Direction {
    /// The opposite direction
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Direction::Asc => Direction::Desc,
            Direction::Desc => Direction::Asc,
        }
    }

    /// Orient an ascending ordering
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Direction::Asc => ordering,
            Direction::Desc => ordering.reverse(),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Asc => "asc",
            Direction::Desc => "desc",
        }
    }
}

impl FromStr for Direction {
    type Err = SortableError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(Direction::Asc),
            "desc" => Ok(Direction::Desc),
            other => Err(SortableError::invalid_option(
                "sortDir",
                format!("expected 'asc' or 'desc', got '{other}'"),
            )),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A resolved comparator for one column type.
#[derive(Clone)]
pub enum Comparator {
    /// Leading-prefix float comparison; unparseable operands compare equal.
    Number,
    /// Plain comparison of the cell text (`string`, `time`).
    Lexical,
    /// Text comparison after rewriting `D.M.Y` to `Y-M-D` (`date`, `datetime`).
    Chronological,
    /// Caller registered comparison.
    Custom(CompareFn),
}

impl Comparator {
    /// Built-in comparator for a built-in tag
    pub fn builtin(tag: &TypeTag) -> Option<Self> {
        match tag {
            TypeTag::Number => Some(Comparator::Number),
            TypeTag::String | TypeTag::Time => Some(Comparator::Lexical),
            TypeTag::Date | TypeTag::DateTime => Some(Comparator::Chronological),
            TypeTag::Custom(_) => None,
        }
    }

    /// Compare in ascending order
    pub fn ascending(&self, a: &Cell, b: &Cell) -> Ordering {
        match self {
            Comparator::Number => match (a.as_float(), b.as_float()) {
                (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
                _ => Ordering::Equal,
            },
            Comparator::Lexical => a.text().cmp(&b.text()),
            Comparator::Chronological => {
                let a = a.text();
                let b = b.text();
                normalize_date(&a).cmp(&normalize_date(&b))
            }
            Comparator::Custom(f) => f(a, b),
        }
    }

    /// Compare in the given direction; `Desc` is exactly the reverse of `Asc`
    pub fn compare(&self, a: &Cell, b: &Cell, direction: Direction) -> Ordering {
        direction.apply(self.ascending(a, b))
    }
}

impl fmt::Debug for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Comparator::Number => f.write_str("Number"),
            Comparator::Lexical => f.write_str("Lexical"),
            Comparator::Chronological => f.write_str("Chronological"),
            Comparator::Custom(_) => f.write_str("Custom"),
        }
    }
}

/// Comparators keyed by type tag: caller overrides layered over the built-ins.
#[derive(Clone, Default)]
pub struct ComparatorRegistry {
    overrides: HashMap<String, CompareFn>,
}

impl ComparatorRegistry {
    /// Register or override the comparator for a tag
    pub fn register(&mut self, tag: impl Into<TypeTag>, compare: CompareFn) {
        self.overrides.insert(tag.into().as_str().to_string(), compare);
    }

    /// Resolve the comparator for a tag
    pub fn lookup(&self, tag: &TypeTag) -> Result<Comparator> {
        if let Some(f) = self.overrides.get(tag.as_str()) {
            return Ok(Comparator::Custom(Arc::clone(f)));
        }
        Comparator::builtin(tag).ok_or_else(|| SortableError::unknown_comparator(tag.as_str()))
    }

    /// Check if a tag resolves
    pub fn contains(&self, tag: &TypeTag) -> bool {
        self.overrides.contains_key(tag.as_str()) || tag.is_builtin()
    }
}

impl fmt::Debug for ComparatorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComparatorRegistry")
            .field("overrides", &self.overrides.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Rewrite the first `D[./-]D[./-]D` run to `Y-M-D` by swapping the outer
/// fields.
///
/// Fields are not zero padded, so ordering is only chronological when field
/// widths agree within a column.
pub fn normalize_date(text: &str) -> Cow<'_, str> {
    date_parts_regex().replace(text, "${3}-${2}-${1}")
}

fn date_parts_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\d+)[./-](\d+)[./-](\d+)").expect("valid regex"))
}
