use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Semantic type assigned to a column.
///
/// Built-in tags are closed variants; anything else a caller registers is
/// carried as [`TypeTag::Custom`] and resolved by name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TypeTag {
    DateTime,
    Date,
    Time,
    Number,
    String,
    Custom(String),
}

impl TypeTag {
    /// Wire name of the tag
    pub fn as_str(&self) -> &str {
        match self {
            TypeTag::DateTime => "datetime",
            TypeTag::Date => "date",
            TypeTag::Time => "time",
            TypeTag::Number => "number",
            TypeTag::String => "string",
            TypeTag::Custom(name) => name,
        }
    }

    /// Create a custom tag
    pub fn custom(name: impl Into<String>) -> Self {
        TypeTag::from(name.into())
    }

    /// Check if the tag is one of the built-ins
    pub fn is_builtin(&self) -> bool {
        !matches!(self, TypeTag::Custom(_))
    }
}

impl From<&str> for TypeTag {
    fn from(name: &str) -> Self {
        match name {
            "datetime" => TypeTag::DateTime,
            "date" => TypeTag::Date,
            "time" => TypeTag::Time,
            "number" => TypeTag::Number,
            "string" => TypeTag::String,
            other => TypeTag::Custom(other.to_string()),
        }
    }
}

impl From<String> for TypeTag {
    fn from(name: String) -> Self {
        TypeTag::from(name.as_str())
    }
}

impl From<TypeTag> for String {
    fn from(tag: TypeTag) -> Self {
        match tag {
            TypeTag::Custom(name) => name,
            builtin => builtin.as_str().to_string(),
        }
    }
}

impl FromStr for TypeTag {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(TypeTag::from(s))
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
