//! Per-cell type recognition.
//!
//! Recognizers run in priority order and the first match wins. Caller
//! supplied recognizers always run before the built-ins, which are (most
//! specific first) `datetime`, `date`, `time`, `number` and the `string`
//! fallback.

use crate::cell::Cell;
use crate::tag::TypeTag;
use regex::Regex;
use std::fmt;
use std::sync::{Arc, OnceLock};

/// A recognizer: returns a tag when it claims the value.
///
/// The second argument is the zero-based column index of the value.
pub type GuessFn = Arc<dyn Fn(&Cell, usize) -> Option<TypeTag> + Send + Sync>;

/// Applies extra recognizers, then the built-ins, to a sample value.
#[derive(Clone, Default)]
pub struct TypeGuesser {
    extra: Vec<GuessFn>,
}

impl TypeGuesser {
    /// Create a guesser with extra recognizers evaluated before the built-ins
    pub fn with_extra(extra: Vec<GuessFn>) -> Self {
        Self { extra }
    }

    /// Number of caller supplied recognizers
    pub fn extra_count(&self) -> usize {
        self.extra.len()
    }

    /// Guess the type tag of a single value
    pub fn guess(&self, value: &Cell, column: usize) -> TypeTag {
        self.extra
            .iter()
            .find_map(|f| f(value, column))
            .unwrap_or_else(|| guess_builtin(value))
    }
}

impl fmt::Debug for TypeGuesser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeGuesser")
            .field("extra", &self.extra.len())
            .finish()
    }
}

/// Run only the built-in recognizers.
pub fn guess_builtin(value: &Cell) -> TypeTag {
    let text = value.text();
    if datetime_regex().is_match(&text) {
        TypeTag::DateTime
    } else if date_regex().is_match(&text) {
        TypeTag::Date
    } else if time_regex().is_match(&text) {
        TypeTag::Time
    } else if value.as_float().is_some() {
        TypeTag::Number
    } else {
        TypeTag::String
    }
}

/// Parse the leading floating-point prefix of `text`.
///
/// Leading whitespace and trailing garbage are ignored (`" 12.5kg"` is
/// `12.5`); text without a numeric prefix yields `None`.
pub fn parse_float(text: &str) -> Option<f64> {
    let matched = float_prefix_regex().find(text.trim_start())?;
    matched.as_str().parse().ok()
}

fn datetime_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\d+[./-]\d+[./-]\d+ \d+:\d+(:\d+)?$").expect("valid regex")
    })
}

fn date_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d+[./-]\d+[./-]\d+$").expect("valid regex"))
}

fn time_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d+:\d+(:\d+)?$").expect("valid regex"))
}

fn float_prefix_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[+-]?(?:Infinity|(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][+-]?\d+)?)")
            .expect("valid regex")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn guess(text: &str) -> TypeTag {
        TypeGuesser::default().guess(&Cell::from(text), 0)
    }

    #[test]
    fn test_builtin_priority() {
        assert_eq!(guess("01.03.2021 10:15"), TypeTag::DateTime);
        assert_eq!(guess("1/3/2021 10:15:59"), TypeTag::DateTime);
        assert_eq!(guess("01.03.2021"), TypeTag::Date);
        assert_eq!(guess("2021-03-01"), TypeTag::Date);
        assert_eq!(guess("10:15"), TypeTag::Time);
        assert_eq!(guess("10:15:30"), TypeTag::Time);
        assert_eq!(guess("42"), TypeTag::Number);
        assert_eq!(guess("-4.2e3"), TypeTag::Number);
        assert_eq!(guess("hello"), TypeTag::String);
    }

    #[test]
    fn test_numeric_prefix_is_number() {
        assert_eq!(guess("12kg"), TypeTag::Number);
        assert_eq!(guess("x12"), TypeTag::String);
    }

    #[test]
    fn test_malformed_dates_fall_through() {
        assert_eq!(guess("01.03."), TypeTag::Number);
        assert_eq!(guess("01.03.2021 10"), TypeTag::Number);
        assert_eq!(guess("1.2.3.4"), TypeTag::Number);
        assert_eq!(guess("March 1st"), TypeTag::String);
    }

    #[test]
    fn test_empty_and_numeric_cells() {
        let guesser = TypeGuesser::default();
        assert_eq!(guesser.guess(&Cell::Empty, 0), TypeTag::String);
        assert_eq!(guesser.guess(&Cell::Number(3.0), 0), TypeTag::Number);
    }

    #[test]
    fn test_extra_recognizers_run_first() {
        let money: GuessFn = Arc::new(|value: &Cell, _: usize| {
            value
                .text()
                .starts_with('$')
                .then(|| TypeTag::custom("money"))
        });
        let only_col_one: GuessFn = Arc::new(|_: &Cell, column: usize| {
            (column == 1).then(|| TypeTag::custom("col1"))
        });
        let guesser = TypeGuesser::with_extra(vec![money, only_col_one]);

        assert_eq!(guesser.extra_count(), 2);
        assert_eq!(guesser.guess(&Cell::from("$5"), 0), TypeTag::custom("money"));
        assert_eq!(guesser.guess(&Cell::from("5"), 1), TypeTag::custom("col1"));
        assert_eq!(guesser.guess(&Cell::from("5"), 0), TypeTag::Number);
    }

    #[test]
    fn test_parse_float() {
        assert_eq!(parse_float("3.5"), Some(3.5));
        assert_eq!(parse_float("  -7"), Some(-7.0));
        assert_eq!(parse_float("1e3x"), Some(1000.0));
        assert_eq!(parse_float("1e"), Some(1.0));
        assert_eq!(parse_float(".5"), Some(0.5));
        assert_eq!(parse_float("Infinity"), Some(f64::INFINITY));
        assert_eq!(parse_float("abc"), None);
        assert_eq!(parse_float(""), None);
        assert_eq!(parse_float("-"), None);
    }
}
