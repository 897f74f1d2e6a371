//! Display normalization keyed by type tag.
//!
//! Printers only shape what is shown; sorting always sees the raw cells.

use crate::cell::Cell;
use crate::error::{Result, SortableError};
use crate::tag::TypeTag;
use regex::Regex;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock};

/// Display function registered by a caller for a type tag.
pub type PrintFn = Arc<dyn Fn(&Cell) -> String + Send + Sync>;

/// A resolved printer for one column type.
#[derive(Clone)]
pub enum Printer {
    /// Cell text unchanged (`number`, `string`, `time`).
    Plain,
    /// `Y-M-D` or `D/M/Y` to `D.M.Y`.
    Date,
    /// Like [`Printer::Date`], keeping the time part.
    DateTime,
    /// Caller registered printer.
    Custom(PrintFn),
}

impl Printer {
    /// Built-in printer for a built-in tag
    pub fn builtin(tag: &TypeTag) -> Option<Self> {
        match tag {
            TypeTag::Number | TypeTag::String | TypeTag::Time => Some(Printer::Plain),
            TypeTag::Date => Some(Printer::Date),
            TypeTag::DateTime => Some(Printer::DateTime),
            TypeTag::Custom(_) => None,
        }
    }

    /// Produce the display value of a cell
    pub fn print(&self, value: &Cell) -> String {
        match self {
            Printer::Plain => value.text().into_owned(),
            Printer::Date => print_date(&value.text()),
            Printer::DateTime => print_datetime(&value.text()),
            Printer::Custom(f) => f(value),
        }
    }
}

impl fmt::Debug for Printer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Printer::Plain => f.write_str("Plain"),
            Printer::Date => f.write_str("Date"),
            Printer::DateTime => f.write_str("DateTime"),
            Printer::Custom(_) => f.write_str("Custom"),
        }
    }
}

/// Printers keyed by type tag: caller overrides layered over the built-ins.
#[derive(Clone, Default)]
pub struct PrinterRegistry {
    overrides: HashMap<String, PrintFn>,
}

impl PrinterRegistry {
    /// Register or override the printer for a tag
    pub fn register(&mut self, tag: impl Into<TypeTag>, print: PrintFn) {
        self.overrides.insert(tag.into().as_str().to_string(), print);
    }

    /// Resolve the printer for a tag
    pub fn lookup(&self, tag: &TypeTag) -> Result<Printer> {
        if let Some(f) = self.overrides.get(tag.as_str()) {
            return Ok(Printer::Custom(Arc::clone(f)));
        }
        Printer::builtin(tag).ok_or_else(|| SortableError::unknown_printer(tag.as_str()))
    }

    /// Check if a tag resolves
    pub fn contains(&self, tag: &TypeTag) -> bool {
        self.overrides.contains_key(tag.as_str()) || tag.is_builtin()
    }
}

impl fmt::Debug for PrinterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrinterRegistry")
            .field("overrides", &self.overrides.keys().collect::<Vec<_>>())
            .finish()
    }
}

fn print_date(text: &str) -> String {
    if hyphen_date_regex().is_match(text) {
        return text.split('-').rev().collect::<Vec<_>>().join(".");
    }
    if slash_date_regex().is_match(text) {
        return text.replace('/', ".");
    }
    text.to_string()
}

fn print_datetime(text: &str) -> String {
    let mut value = hyphen_date_regex()
        .replace(text, "${3}.${2}.${1}")
        .into_owned();
    if slash_date_regex().is_match(&value) {
        value = value.replace('/', ".");
    }
    value
}

fn hyphen_date_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\d+)-(\d+)-(\d+)").expect("valid regex"))
}

fn slash_date_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\d+/\d+/\d+").expect("valid regex"))
}
