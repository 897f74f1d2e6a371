use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// A single untyped value read from a sheet.
///
/// Cells are never mutated after the table is built; every recognizer,
/// comparator and pinned-value check works on [`Cell::text`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Number(f64),
    Text(String),
    Empty,
}

impl Cell {
    /// Check if the cell is the empty placeholder
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// Textual form of the cell, rendered the way a spreadsheet shows it.
    ///
    /// Integral numbers drop the fractional part (`5.0` becomes `"5"`),
    /// magnitudes from `1e21` up or below `1e-6` use exponent notation
    /// (`"1e+21"`, `"1e-7"`) and empty cells render as `""`.
    #[must_use]
    pub fn text(&self) -> Cow<'_, str> {
        match self {
            Cell::Number(n) => Cow::Owned(format_number(*n)),
            Cell::Text(s) => Cow::Borrowed(s.as_str()),
            Cell::Empty => Cow::Borrowed(""),
        }
    }

    /// Try to get the value as a float using leading-prefix parsing
    #[must_use]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Cell::Number(n) => Some(*n),
            Cell::Text(s) => crate::guess::parse_float(s),
            Cell::Empty => None,
        }
    }
}

fn format_number(n: f64) -> String {
    if n.is_infinite() {
        if n > 0.0 {
            "Infinity".to_string()
        } else {
            "-Infinity".to_string()
        }
    } else if n == 0.0 {
        "0".to_string()
    } else if n.abs() >= 1e21 || n.abs() < 1e-6 {
        let exp = format!("{n:e}");
        match exp.split_once('e') {
            Some((mantissa, power)) if !power.starts_with('-') => format!("{mantissa}e+{power}"),
            _ => exp,
        }
    } else {
        n.to_string()
    }
}

impl Default for Cell {
    fn default() -> Self {
        Cell::Empty
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text())
    }
}

impl From<f64> for Cell {
    fn from(n: f64) -> Self {
        Cell::Number(n)
    }
}

impl From<i64> for Cell {
    fn from(i: i64) -> Self {
        Cell::Number(i as f64)
    }
}

impl From<i32> for Cell {
    fn from(i: i32) -> Self {
        Cell::Number(f64::from(i))
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        Cell::Text(s)
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

impl<T: Into<Cell>> From<Option<T>> for Cell {
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => v.into(),
            None => Cell::Empty,
        }
    }
}
