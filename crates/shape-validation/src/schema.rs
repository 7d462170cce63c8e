//! Root validator of a compiled schema

use crate::attribute::Parent;
use crate::error::ValidationError;
use crate::node::Validator;
use serde_json::Value;
use tracing::debug;

/// Compiled form of a [`shape_schema::Schema`].
///
/// Holds no per-call state, so one instance can be shared between threads
/// and reused for any number of documents.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaValidator {
    name: String,
    children: Vec<(String, Validator)>,
}

impl SchemaValidator {
    #[must_use]
    pub fn new(name: impl Into<String>, children: Vec<(String, Validator)>) -> Self {
        Self {
            name: name.into(),
            children,
        }
    }

    /// Name of the schema this was compiled from
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Top-level validators in declaration order
    #[must_use]
    pub fn children(&self) -> &[(String, Validator)] {
        &self.children
    }

    /// Validate a whole document.
    ///
    /// # Errors
    ///
    /// Returns the first violation found, walking fields depth-first in
    /// declaration order. A document that is not an object fails with
    /// `IncorrectRootType`.
    pub fn validate(&self, document: &Value) -> Result<(), ValidationError> {
        let result = self.validate_root(document);
        if let Err(err) = &result {
            debug!(
                schema = %self.name,
                kind = %err.kind,
                path = %err.path,
                "Document failed validation"
            );
        }
        result
    }

    /// Whether `document` passes validation
    #[must_use]
    pub fn is_valid(&self, document: &Value) -> bool {
        self.validate_root(document).is_ok()
    }

    fn validate_root(&self, document: &Value) -> Result<(), ValidationError> {
        let Some(map) = document.as_object() else {
            return Err(ValidationError::incorrect_root_type(document));
        };

        for (name, validator) in &self.children {
            validator.validate(name, Parent::Mapping(map), "")?;
        }
        Ok(())
    }
}
