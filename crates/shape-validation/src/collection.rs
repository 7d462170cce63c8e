//! Homogeneous lists

use crate::attribute::{AttributeValidator, Parent, join_path};
use crate::error::ValidationError;
use crate::node::Validator;
use shape_schema::{ExpectedType, ValueKind};

/// Validates a list field, applying one validator to every element
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionValidator {
    attribute: AttributeValidator,
    items: Box<Validator>,
}

impl CollectionValidator {
    #[must_use]
    pub fn new(required: bool, required_with: Vec<String>, items: Validator) -> Self {
        Self {
            attribute: AttributeValidator::new(
                ExpectedType::Kind(ValueKind::List),
                required,
                required_with,
            ),
            items: Box::new(items),
        }
    }

    #[must_use]
    pub fn attribute(&self) -> &AttributeValidator {
        &self.attribute
    }

    /// Validator applied to each element
    #[must_use]
    pub fn items(&self) -> &Validator {
        &self.items
    }

    /// Validate the list field `name` of `parent`.
    ///
    /// Each element is checked as the only entry of an item parent keyed by
    /// its index, so element paths read `<path>/<name>/<index>`.
    ///
    /// # Errors
    ///
    /// Returns the first violation found, elements checked in order.
    pub fn validate(&self, name: &str, parent: Parent<'_>, path: &str) -> Result<(), ValidationError> {
        let Some(raw) = self.attribute.check(name, parent, path)? else {
            return Ok(());
        };
        let Some(elements) = raw.as_array() else {
            return Ok(());
        };

        let item_path = join_path(path, name);
        for (index, value) in elements.iter().enumerate() {
            let key = index.to_string();
            self.items
                .validate(&key, Parent::Item { key: &key, value }, &item_path)?;
        }
        Ok(())
    }
}
