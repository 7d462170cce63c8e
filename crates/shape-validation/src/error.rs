//! Validation error details

use serde::Serialize;
use serde_json::Value;
use shape_schema::{ExpectedType, ValueKind};
use std::fmt;

/// What kind of violation a [`ValidationError`] reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValidationErrorKind {
    /// A required field is absent
    MissingKey,
    /// A field holds a value of the wrong kind
    WrongType,
    /// A required field is present but empty
    EmptyValue,
    /// A field is present without the siblings it requires
    RequiredTogether,
    /// A value's kind has no entry in a type mapping
    UnmappedType,
    /// The document itself is not an object
    IncorrectRootType,
}

impl ValidationErrorKind {
    /// Stable error code
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::MissingKey => "MISSING_KEY",
            Self::WrongType => "WRONG_TYPE",
            Self::EmptyValue => "EMPTY_VALUE",
            Self::RequiredTogether => "REQUIRED_TOGETHER",
            Self::UnmappedType => "UNMAPPED_TYPE",
            Self::IncorrectRootType => "INCORRECT_ROOT_TYPE",
        }
    }
}

impl fmt::Display for ValidationErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// The first violation found in a document
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationError {
    pub kind: ValidationErrorKind,
    /// Human-readable description
    pub message: String,
    /// Slash-delimited path from the document root; empty for the root itself
    pub path: String,
    /// The offending value, when there is one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

impl ValidationError {
    pub(crate) fn missing_key(path: String, name: &str) -> Self {
        Self {
            kind: ValidationErrorKind::MissingKey,
            message: format!("Missing key \"{name}\""),
            path,
            value: None,
        }
    }

    pub(crate) fn wrong_type(path: String, name: &str, expected: ExpectedType, value: &Value) -> Self {
        Self {
            kind: ValidationErrorKind::WrongType,
            message: format!(
                "Incorrect data type for key \"{name}\": expected {expected}, found {}",
                ValueKind::of(value)
            ),
            path,
            value: Some(value.clone()),
        }
    }

    pub(crate) fn empty_value(path: String, name: &str, value: &Value) -> Self {
        Self {
            kind: ValidationErrorKind::EmptyValue,
            message: format!("Empty value for key \"{name}\""),
            path,
            value: Some(value.clone()),
        }
    }

    pub(crate) fn required_together(path: String, name: &str, missing: &[&str]) -> Self {
        Self {
            kind: ValidationErrorKind::RequiredTogether,
            message: format!(
                "Attribute \"{name}\" required together with \"{}\"",
                missing.join(", ")
            ),
            path,
            value: None,
        }
    }

    pub(crate) fn unmapped_type(path: String, name: &str, value: &Value) -> Self {
        Self {
            kind: ValidationErrorKind::UnmappedType,
            message: format!(
                "Data type {} for key \"{name}\" not in types mapping",
                ValueKind::of(value)
            ),
            path,
            value: Some(value.clone()),
        }
    }

    pub(crate) fn incorrect_root_type(value: &Value) -> Self {
        Self {
            kind: ValidationErrorKind::IncorrectRootType,
            message: format!(
                "Incorrect root data type: expected object, found {}",
                ValueKind::of(value)
            ),
            path: String::new(),
            value: Some(value.clone()),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{} at '{}'", self.message, self.path)
        }
    }
}

impl std::error::Error for ValidationError {}
