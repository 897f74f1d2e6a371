//! Per-table registry of recognizers, comparators and printers.
//!
//! Each table owns its registry. Caller additions are layered over the
//! built-in defaults when the registry is built; nothing is shared or
//! mutated across tables.

use crate::compare::{Comparator, ComparatorRegistry, CompareFn};
use crate::error::Result;
use crate::guess::{GuessFn, TypeGuesser};
use crate::print::{PrintFn, Printer, PrinterRegistry};
use crate::profile::Column;
use crate::tag::TypeTag;

/// Recognizers, comparators and printers for one table.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    guesser: TypeGuesser,
    comparators: ComparatorRegistry,
    printers: PrinterRegistry,
}

impl Registry {
    /// Start building a registry on top of the built-ins
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    pub fn guesser(&self) -> &TypeGuesser {
        &self.guesser
    }

    /// Resolve the comparator for a tag
    pub fn comparator(&self, tag: &TypeTag) -> Result<Comparator> {
        self.comparators.lookup(tag)
    }

    /// Resolve the printer for a tag
    pub fn printer(&self, tag: &TypeTag) -> Result<Printer> {
        self.printers.lookup(tag)
    }

    /// Check that every column type has both a comparator and a printer.
    pub fn validate(&self, columns: &[Column]) -> Result<()> {
        for column in columns {
            self.comparators.lookup(&column.kind)?;
            self.printers.lookup(&column.kind)?;
        }
        Ok(())
    }
}

/// Builder for [`Registry`].
#[derive(Default)]
pub struct RegistryBuilder {
    guesses: Vec<GuessFn>,
    comparators: ComparatorRegistry,
    printers: PrinterRegistry,
}

impl RegistryBuilder {
    /// Add a recognizer; recognizers run in the order they were added,
    /// all before the built-ins
    #[must_use]
    pub fn guess(mut self, f: GuessFn) -> Self {
        self.guesses.push(f);
        self
    }

    /// Add or override a comparator
    #[must_use]
    pub fn comparator(mut self, tag: impl Into<TypeTag>, f: CompareFn) -> Self {
        self.comparators.register(tag, f);
        self
    }

    /// Add or override a printer
    #[must_use]
    pub fn printer(mut self, tag: impl Into<TypeTag>, f: PrintFn) -> Self {
        self.printers.register(tag, f);
        self
    }

    pub fn build(self) -> Registry {
        Registry {
            guesser: TypeGuesser::with_extra(self.guesses),
            comparators: self.comparators,
            printers: self.printers,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::Cell;
    use crate::error::SortableError;
    use std::sync::Arc;

    fn column(kind: TypeTag) -> Column {
        Column {
            kind,
            ..Column::default()
        }
    }

    #[test]
    fn test_default_registry_validates_builtins() {
        let registry = Registry::default();
        let columns: Vec<_> = ["datetime", "date", "time", "number", "string"]
            .into_iter()
            .map(|t| column(TypeTag::from(t)))
            .collect();
        assert!(registry.validate(&columns).is_ok());
    }

    #[test]
    fn test_custom_tag_needs_comparator_and_printer() {
        let compare_only = Registry::builder()
            .comparator("rank", Arc::new(|a: &Cell, b: &Cell| a.text().cmp(&b.text())))
            .build();
        let err = compare_only
            .validate(&[column(TypeTag::custom("rank"))])
            .unwrap_err();
        assert!(matches!(err, SortableError::UnknownPrinter { .. }));

        let complete = Registry::builder()
            .comparator("rank", Arc::new(|a: &Cell, b: &Cell| a.text().cmp(&b.text())))
            .printer("rank", Arc::new(|c: &Cell| format!("#{c}")))
            .build();
        assert!(complete.validate(&[column(TypeTag::custom("rank"))]).is_ok());
    }

    #[test]
    fn test_registries_are_independent() {
        let custom = Registry::builder()
            .printer(TypeTag::Number, Arc::new(|_: &Cell| "n".to_string()))
            .build();
        let plain = Registry::default();

        let value = Cell::from("5");
        assert_eq!(custom.printer(&TypeTag::Number).unwrap().print(&value), "n");
        assert_eq!(plain.printer(&TypeTag::Number).unwrap().print(&value), "5");
    }

    #[test]
    fn test_guess_order_is_kept() {
        let registry = Registry::builder()
            .guess(Arc::new(|_: &Cell, _: usize| Some(TypeTag::custom("first"))))
            .guess(Arc::new(|_: &Cell, _: usize| Some(TypeTag::custom("second"))))
            .build();
        assert_eq!(registry.guesser().extra_count(), 2);
        assert_eq!(
            registry.guesser().guess(&Cell::from("1"), 0),
            TypeTag::custom("first")
        );
    }
}
