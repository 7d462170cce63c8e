//! Compile-once cache of schema validators

use crate::compile::compile;
use crate::schema::SchemaValidator;
use crate::{Error, Result};
use dashmap::DashMap;
use serde_json::Value;
use shape_schema::{Schema, SchemaConfigurationError};
use std::sync::Arc;
use tracing::{debug, info};

/// Thread-safe name to compiled validator cache
#[derive(Debug, Default)]
pub struct ValidatorRegistry {
    validators: DashMap<String, Arc<SchemaValidator>>,
}

impl ValidatorRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Compiled validator for `schema`, compiling it on first use.
    ///
    /// Schemas are keyed by name; a later schema with an already registered
    /// name gets the existing validator.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaConfigurationError`] when the schema cannot be compiled.
    pub fn get_or_compile(
        &self,
        schema: &Schema,
    ) -> std::result::Result<Arc<SchemaValidator>, SchemaConfigurationError> {
        if let Some(existing) = self.get(&schema.name) {
            debug!("Cache hit for validator: {}", schema.name);
            return Ok(existing);
        }

        let compiled = Arc::new(compile(schema)?);
        info!(
            "Compiled validator for schema '{}' ({} top-level fields)",
            schema.name,
            compiled.children().len()
        );
        let entry = self
            .validators
            .entry(schema.name.clone())
            .or_insert(compiled);
        Ok(Arc::clone(entry.value()))
    }

    /// Compiled validator registered under `name`
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Arc<SchemaValidator>> {
        self.validators.get(name).map(|entry| Arc::clone(entry.value()))
    }

    /// Validate `document` with the validator registered under `name`
    ///
    /// # Errors
    ///
    /// Returns [`Error::Schema`] when nothing is registered under `name`, or
    /// [`Error::Validation`] with the first violation found.
    pub fn validate(&self, name: &str, document: &Value) -> Result<()> {
        let validator = self.get(name).ok_or_else(|| {
            shape_schema::Error::NotFound(format!("no compiled validator named '{name}'"))
        })?;
        validator.validate(document).map_err(Error::from)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.validators.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use shape_schema::FieldSpec;

    fn user() -> Schema {
        Schema::new("user").field("username", FieldSpec::string())
    }

    #[test]
    fn test_compiles_once() {
        let registry = ValidatorRegistry::new();
        assert!(registry.is_empty());

        let first = registry.get_or_compile(&user()).unwrap();
        let second = registry.get_or_compile(&user()).unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_configuration_errors_are_not_cached() {
        let registry = ValidatorRegistry::new();
        let broken = Schema::new("broken")
            .field("a", FieldSpec::string())
            .field("a", FieldSpec::string());

        assert!(registry.get_or_compile(&broken).is_err());
        assert!(registry.get("broken").is_none());
    }

    #[test]
    fn test_validate_by_name() {
        let registry = ValidatorRegistry::new();
        registry.get_or_compile(&user()).unwrap();

        assert!(registry.validate("user", &json!({"username": "kd"})).is_ok());

        let err = registry.validate("user", &json!({})).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));

        let err = registry.validate("post", &json!({})).unwrap_err();
        assert!(matches!(err, Error::Schema(shape_schema::Error::NotFound(_))));
    }
}
