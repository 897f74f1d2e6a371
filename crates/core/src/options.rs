//! Per-table options.
//!
//! Options arrive as a flat attribute map, the way an embedding page
//! passes them: `typeB=number`, `minValueC=N/A`, `maxValueC=-`,
//! `noSort=A,D`, `sortBy=1`, `sortDir=desc`, `tableClass`, `tableSortClass`,
//! `theme` and `file`. Column keys use spreadsheet letters; internally
//! options are stored by zero-based column index.

use crate::compare::Direction;
use crate::error::{Result, SortableError};
use crate::letters::{column_index, column_letters};
use crate::tag::TypeTag;
use indexmap::IndexMap;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;

/// Default class of the rendered `<table>` element.
pub const DEFAULT_TABLE_CLASS: &str = "xlsSortable-table";
/// Default class of sortable header cells.
pub const DEFAULT_SORT_CLASS: &str = "xlsSortable-sortable";

/// Options for a single column.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnOptions {
    /// Explicit type; disables guessing for the column
    pub kind: Option<TypeTag>,
    /// Value that always sorts first under `asc`
    pub min_value: Option<String>,
    /// Value that always sorts last under `asc`
    pub max_value: Option<String>,
    /// Whether header clicks may sort by this column
    pub sortable: bool,
}

impl Default for ColumnOptions {
    fn default() -> Self {
        Self {
            kind: None,
            min_value: None,
            max_value: None,
            sortable: true,
        }
    }
}

/// Options for a whole table.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "IndexMap<String, AttributeValue>")]
pub struct TableOptions {
    columns: BTreeMap<usize, ColumnOptions>,
    /// Initial sort column
    pub sort_by: Option<usize>,
    /// Initial sort direction
    pub sort_dir: Option<Direction>,
    pub table_class: String,
    pub sort_class: String,
    pub theme: Option<String>,
    /// Location of the workbook to load
    pub file: Option<String>,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            columns: BTreeMap::new(),
            sort_by: None,
            sort_dir: None,
            table_class: DEFAULT_TABLE_CLASS.to_string(),
            sort_class: DEFAULT_SORT_CLASS.to_string(),
            theme: None,
            file: None,
        }
    }
}

impl TableOptions {
    /// Parse options from flat attributes.
    pub fn from_attributes<I, K, V>(attributes: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut options = Self::default();
        for (key, value) in attributes {
            options.apply_attribute(key.as_ref(), value.as_ref())?;
        }
        Ok(options)
    }

    /// Parse options from a JSON object of attributes
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse options from a YAML mapping of attributes
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Apply one attribute; later attributes override earlier ones.
    pub fn apply_attribute(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "sortBy" => {
                let index = value.trim().parse::<usize>().map_err(|_| {
                    SortableError::invalid_option(key, format!("not a column index: '{value}'"))
                })?;
                self.sort_by = Some(index);
            }
            "sortDir" => self.sort_dir = Some(value.parse()?),
            "noSort" => {
                for letters in value.split(',').map(str::trim).filter(|s| !s.is_empty()) {
                    let index = column_index(letters)
                        .map_err(|e| SortableError::invalid_option(key, e.to_string()))?;
                    self.column_entry(index).sortable = false;
                }
            }
            "tableClass" => self.table_class = value.to_string(),
            "tableSortClass" => self.sort_class = value.to_string(),
            "theme" => self.theme = (!value.is_empty()).then(|| value.to_string()),
            "file" => self.file = Some(value.to_string()),
            _ => {
                if let Some(letters) = key.strip_prefix("type") {
                    let index = Self::key_column(key, letters)?;
                    self.column_entry(index).kind = Some(TypeTag::from(value));
                } else if let Some(letters) = key.strip_prefix("minValue") {
                    let index = Self::key_column(key, letters)?;
                    self.column_entry(index).min_value = Some(value.to_string());
                } else if let Some(letters) = key.strip_prefix("maxValue") {
                    let index = Self::key_column(key, letters)?;
                    self.column_entry(index).max_value = Some(value.to_string());
                } else {
                    tracing::debug!(key, "ignoring unknown table option");
                }
            }
        }
        Ok(())
    }

    fn key_column(key: &str, letters: &str) -> Result<usize> {
        column_index(letters).map_err(|e| SortableError::invalid_option(key, e.to_string()))
    }

    fn column_entry(&mut self, index: usize) -> &mut ColumnOptions {
        self.columns.entry(index).or_default()
    }

    /// Options for a column, if any were given
    pub fn column(&self, index: usize) -> Option<&ColumnOptions> {
        self.columns.get(&index)
    }

    /// Options for a column addressed by its letters
    pub fn column_by_letters(&self, letters: &str) -> Result<Option<&ColumnOptions>> {
        Ok(self.columns.get(&column_index(letters)?))
    }

    /// Whether header clicks may sort by a column
    pub fn is_sortable(&self, index: usize) -> bool {
        self.column(index).map_or(true, |c| c.sortable)
    }

    /// Columns with explicit options, by index
    pub fn columns(&self) -> impl Iterator<Item = (usize, &ColumnOptions)> {
        self.columns.iter().map(|(i, c)| (*i, c))
    }

    /// Override the type of a column
    #[must_use]
    pub fn with_type(mut self, index: usize, kind: impl Into<TypeTag>) -> Self {
        self.column_entry(index).kind = Some(kind.into());
        self
    }

    /// Pin a value to the start of a column under `asc`
    #[must_use]
    pub fn with_min_value(mut self, index: usize, value: impl Into<String>) -> Self {
        self.column_entry(index).min_value = Some(value.into());
        self
    }

    /// Pin a value to the end of a column under `asc`
    #[must_use]
    pub fn with_max_value(mut self, index: usize, value: impl Into<String>) -> Self {
        self.column_entry(index).max_value = Some(value.into());
        self
    }

    /// Exclude a column from header sorting
    #[must_use]
    pub fn with_no_sort(mut self, index: usize) -> Self {
        self.column_entry(index).sortable = false;
        self
    }

    /// Sort by a column once the table is loaded
    #[must_use]
    pub fn with_initial_sort(mut self, index: usize, direction: Direction) -> Self {
        self.sort_by = Some(index);
        self.sort_dir = Some(direction);
        self
    }

    /// Flat attribute form of these options.
    pub fn to_attributes(&self) -> Vec<(String, String)> {
        let mut attributes = Vec::new();
        for (index, column) in &self.columns {
            let letters = column_letters(*index);
            if let Some(kind) = &column.kind {
                attributes.push((format!("type{letters}"), kind.to_string()));
            }
            if let Some(min) = &column.min_value {
                attributes.push((format!("minValue{letters}"), min.clone()));
            }
            if let Some(max) = &column.max_value {
                attributes.push((format!("maxValue{letters}"), max.clone()));
            }
        }
        let no_sort: Vec<_> = self
            .columns
            .iter()
            .filter(|(_, c)| !c.sortable)
            .map(|(i, _)| column_letters(*i))
            .collect();
        if !no_sort.is_empty() {
            attributes.push(("noSort".to_string(), no_sort.join(",")));
        }
        if let Some(sort_by) = self.sort_by {
            attributes.push(("sortBy".to_string(), sort_by.to_string()));
        }
        if let Some(dir) = self.sort_dir {
            attributes.push(("sortDir".to_string(), dir.to_string()));
        }
        attributes
    }
}

/// A scalar or list attribute value as found in JSON or YAML documents.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    List(Vec<String>),
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Text(s) => f.write_str(s),
            AttributeValue::Integer(i) => write!(f, "{i}"),
            AttributeValue::Float(x) => write!(f, "{x}"),
            AttributeValue::Bool(b) => write!(f, "{b}"),
            AttributeValue::List(items) => f.write_str(&items.join(",")),
        }
    }
}

impl TryFrom<IndexMap<String, AttributeValue>> for TableOptions {
    type Error = SortableError;

    fn try_from(attributes: IndexMap<String, AttributeValue>) -> Result<Self> {
        Self::from_attributes(attributes.into_iter().map(|(k, v)| (k, v.to_string())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = TableOptions::default();
        assert_eq!(options.table_class, "xlsSortable-table");
        assert_eq!(options.sort_class, "xlsSortable-sortable");
        assert!(options.column(0).is_none());
        assert!(options.is_sortable(0));
    }

    #[test]
    fn test_from_attributes() {
        let options = TableOptions::from_attributes([
            ("typeB", "number"),
            ("minValueB", "N/A"),
            ("maxValueAA", "-"),
            ("noSort", "a, c"),
            ("sortBy", "1"),
            ("sortDir", "desc"),
            ("theme", "dark"),
            ("file", "prices.xlsx"),
        ])
        .unwrap();

        let b = options.column(1).unwrap();
        assert_eq!(b.kind, Some(TypeTag::Number));
        assert_eq!(b.min_value.as_deref(), Some("N/A"));
        assert_eq!(options.column(26).unwrap().max_value.as_deref(), Some("-"));
        assert!(!options.is_sortable(0));
        assert!(options.is_sortable(1));
        assert!(!options.is_sortable(2));
        assert_eq!(options.sort_by, Some(1));
        assert_eq!(options.sort_dir, Some(Direction::Desc));
        assert_eq!(options.theme.as_deref(), Some("dark"));
        assert_eq!(options.file.as_deref(), Some("prices.xlsx"));
        assert_eq!(
            options.column_by_letters("b").unwrap().unwrap().kind,
            Some(TypeTag::Number)
        );
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let options = TableOptions::from_attributes([("autostart", "true")]).unwrap();
        assert_eq!(options, TableOptions::default());
    }

    #[test]
    fn test_malformed_values() {
        assert!(TableOptions::from_attributes([("sortBy", "x")]).is_err());
        assert!(TableOptions::from_attributes([("sortDir", "up")]).is_err());
        assert!(TableOptions::from_attributes([("type1", "number")]).is_err());
        assert!(TableOptions::from_attributes([("noSort", "A,B2")]).is_err());
    }

    #[test]
    fn test_from_json() {
        let options = TableOptions::from_json_str(
            r#"{"typeA": "date", "sortBy": 0, "sortDir": "asc", "noSort": ["B"]}"#,
        )
        .unwrap();
        assert_eq!(options.column(0).unwrap().kind, Some(TypeTag::Date));
        assert_eq!(options.sort_by, Some(0));
        assert!(!options.is_sortable(1));
    }

    #[test]
    fn test_from_yaml() {
        let options = TableOptions::from_yaml_str("typeC: money\nmaxValueC: n/a\nsortBy: 2\n").unwrap();
        let c = options.column(2).unwrap();
        assert_eq!(c.kind, Some(TypeTag::custom("money")));
        assert_eq!(c.max_value.as_deref(), Some("n/a"));
        assert_eq!(options.sort_by, Some(2));
    }

    #[test]
    fn test_invalid_json_document() {
        assert!(TableOptions::from_json_str(r#"{"sortBy": "first"}"#).is_err());
        assert!(TableOptions::from_json_str("[1, 2]").is_err());
    }

    #[test]
    fn test_attributes_round_trip() {
        let options = TableOptions::default()
            .with_type(0, TypeTag::Number)
            .with_min_value(0, "N/A")
            .with_max_value(27, "zzz")
            .with_no_sort(3)
            .with_initial_sort(0, Direction::Desc);
        let parsed = TableOptions::from_attributes(options.to_attributes()).unwrap();
        assert_eq!(parsed, options);
    }
}
