//! Runtime kinds of document values

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Discriminant of a decoded document value.
///
/// Dispatch tables are keyed by this; integers and floats are distinct kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Null,
    Boolean,
    Integer,
    Float,
    String,
    List,
    Object,
}

impl ValueKind {
    /// Every kind, in discriminant order
    pub const ALL: [ValueKind; 7] = [
        ValueKind::Null,
        ValueKind::Boolean,
        ValueKind::Integer,
        ValueKind::Float,
        ValueKind::String,
        ValueKind::List,
        ValueKind::Object,
    ];

    /// Kind of a decoded value
    #[must_use]
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Boolean,
            Value::Number(n) if n.is_f64() => ValueKind::Float,
            Value::Number(_) => ValueKind::Integer,
            Value::String(_) => ValueKind::String,
            Value::Array(_) => ValueKind::List,
            Value::Object(_) => ValueKind::Object,
        }
    }

    /// Canonical lowercase name
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ValueKind::Null => "null",
            ValueKind::Boolean => "boolean",
            ValueKind::Integer => "integer",
            ValueKind::Float => "float",
            ValueKind::String => "string",
            ValueKind::List => "list",
            ValueKind::Object => "object",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ValueKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "null" | "none" => Ok(ValueKind::Null),
            "boolean" | "bool" => Ok(ValueKind::Boolean),
            "integer" | "int" => Ok(ValueKind::Integer),
            "float" => Ok(ValueKind::Float),
            "string" | "str" => Ok(ValueKind::String),
            "list" | "array" => Ok(ValueKind::List),
            "object" | "dict" | "mapping" => Ok(ValueKind::Object),
            other => Err(format!("unknown value kind '{other}'")),
        }
    }
}

/// Type a field expects its value to have
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExpectedType {
    /// Exactly this kind
    Kind(ValueKind),
    /// Any kind; used by polymorphic fields
    Any,
}

impl ExpectedType {
    /// Whether a value of `kind` satisfies this expectation
    #[must_use]
    pub fn admits(self, kind: ValueKind) -> bool {
        match self {
            ExpectedType::Kind(expected) => expected == kind,
            ExpectedType::Any => true,
        }
    }

    /// The concrete kind, if there is one
    #[must_use]
    pub fn kind(self) -> Option<ValueKind> {
        match self {
            ExpectedType::Kind(kind) => Some(kind),
            ExpectedType::Any => None,
        }
    }
}

impl fmt::Display for ExpectedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpectedType::Kind(kind) => fmt::Display::fmt(kind, f),
            ExpectedType::Any => f.write_str("any"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_kind_of_values() {
        assert_eq!(ValueKind::of(&json!(null)), ValueKind::Null);
        assert_eq!(ValueKind::of(&json!(true)), ValueKind::Boolean);
        assert_eq!(ValueKind::of(&json!(22)), ValueKind::Integer);
        assert_eq!(ValueKind::of(&json!(-3)), ValueKind::Integer);
        assert_eq!(ValueKind::of(&json!(1.5)), ValueKind::Float);
        assert_eq!(ValueKind::of(&json!("174cm")), ValueKind::String);
        assert_eq!(ValueKind::of(&json!([1, 2])), ValueKind::List);
        assert_eq!(ValueKind::of(&json!({"a": 1})), ValueKind::Object);
    }

    #[test]
    fn test_kind_names_and_aliases() {
        assert_eq!("dict".parse::<ValueKind>(), Ok(ValueKind::Object));
        assert_eq!("STR".parse::<ValueKind>(), Ok(ValueKind::String));
        assert_eq!("int".parse::<ValueKind>(), Ok(ValueKind::Integer));
        assert_eq!("array".parse::<ValueKind>(), Ok(ValueKind::List));
        assert!("tuple".parse::<ValueKind>().is_err());

        for kind in ValueKind::ALL {
            assert_eq!(kind.as_str().parse::<ValueKind>(), Ok(kind));
        }
    }

    #[test]
    fn test_expected_type_admits() {
        assert!(ExpectedType::Any.admits(ValueKind::List));
        assert!(ExpectedType::Kind(ValueKind::String).admits(ValueKind::String));
        assert!(!ExpectedType::Kind(ValueKind::Integer).admits(ValueKind::Float));
        assert_eq!(ExpectedType::Any.to_string(), "any");
        assert_eq!(ExpectedType::Kind(ValueKind::Object).kind(), Some(ValueKind::Object));
    }
}
