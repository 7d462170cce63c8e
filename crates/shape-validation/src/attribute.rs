//! Leaf validation: presence, kind, emptiness and required-together checks

use crate::error::ValidationError;
use serde_json::{Map, Value};
use shape_schema::{ExpectedType, ValueKind};

/// The container a field is looked up in.
///
/// Collection elements are validated as the single entry of an item parent
/// keyed by their index, so every validator sees the same contract.
#[derive(Debug, Clone, Copy)]
pub enum Parent<'v> {
    Mapping(&'v Map<String, Value>),
    Item { key: &'v str, value: &'v Value },
}

impl<'v> Parent<'v> {
    /// Value stored under `name`
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&'v Value> {
        match *self {
            Parent::Mapping(map) => map.get(name),
            Parent::Item { key, value } => (key == name).then_some(value),
        }
    }

    /// Whether `name` is a key of this parent, whatever its value
    #[must_use]
    pub fn contains_key(&self, name: &str) -> bool {
        match *self {
            Parent::Mapping(map) => map.contains_key(name),
            Parent::Item { key, .. } => key == name,
        }
    }
}

/// Error path of `name` inside `path`
pub(crate) fn join_path(path: &str, name: &str) -> String {
    if path.is_empty() {
        name.to_string()
    } else {
        format!("{path}/{name}")
    }
}

/// Empty strings, lists and objects, numeric zero and `false`
pub(crate) fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

/// Validates a single field value
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeValidator {
    expected: ExpectedType,
    required: bool,
    required_with: Vec<String>,
}

impl AttributeValidator {
    #[must_use]
    pub fn new(expected: ExpectedType, required: bool, required_with: Vec<String>) -> Self {
        Self {
            expected,
            required,
            required_with,
        }
    }

    #[must_use]
    pub fn expected_type(&self) -> ExpectedType {
        self.expected
    }

    #[must_use]
    pub fn is_required(&self) -> bool {
        self.required
    }

    #[must_use]
    pub fn required_with(&self) -> &[String] {
        &self.required_with
    }

    /// Validate the field `name` of `parent`
    ///
    /// # Errors
    ///
    /// Returns the first violation found.
    pub fn validate(&self, name: &str, parent: Parent<'_>, path: &str) -> Result<(), ValidationError> {
        self.check(name, parent, path).map(|_| ())
    }

    /// Runs the leaf checks and hands back the value when it is present.
    ///
    /// A JSON `null` counts as absent.
    pub(crate) fn check<'v>(
        &self,
        name: &str,
        parent: Parent<'v>,
        path: &str,
    ) -> Result<Option<&'v Value>, ValidationError> {
        let raw = parent.get(name).filter(|value| !value.is_null());

        let Some(value) = raw else {
            if self.required {
                return Err(ValidationError::missing_key(join_path(path, name), name));
            }
            return Ok(None);
        };

        if !self.expected.admits(ValueKind::of(value)) {
            return Err(ValidationError::wrong_type(
                join_path(path, name),
                name,
                self.expected,
                value,
            ));
        }

        if self.required && is_falsy(value) {
            return Err(ValidationError::empty_value(join_path(path, name), name, value));
        }

        let missing: Vec<&str> = self
            .required_with
            .iter()
            .map(String::as_str)
            .filter(|companion| !parent.contains_key(companion))
            .collect();
        if !missing.is_empty() {
            return Err(ValidationError::required_together(
                join_path(path, name),
                name,
                &missing,
            ));
        }

        Ok(Some(value))
    }
}
