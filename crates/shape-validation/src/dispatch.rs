//! Kind-keyed dispatch tables and polymorphic fields

use crate::attribute::{AttributeValidator, Parent, join_path};
use crate::error::ValidationError;
use crate::node::Validator;
use shape_schema::{ExpectedType, ValueKind};
use tracing::trace;

/// Maps a value kind to the validator responsible for it.
///
/// Entries are unnamed: the name is supplied on every call, so one table can
/// serve any number of keys and documents at once.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DispatchTable {
    entries: Vec<(ValueKind, Validator)>,
}

impl DispatchTable {
    #[must_use]
    pub fn new(entries: Vec<(ValueKind, Validator)>) -> Self {
        Self { entries }
    }

    /// Validator mapped to `kind`
    #[must_use]
    pub fn get(&self, kind: ValueKind) -> Option<&Validator> {
        self.entries
            .iter()
            .find(|(mapped, _)| *mapped == kind)
            .map(|(_, validator)| validator)
    }

    pub fn kinds(&self) -> impl Iterator<Item = ValueKind> + '_ {
        self.entries.iter().map(|(kind, _)| *kind)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Validates a field whose own value kind picks the validator to apply
#[derive(Debug, Clone, PartialEq)]
pub struct PolymorphicValidator {
    attribute: AttributeValidator,
    mapping: DispatchTable,
}

impl PolymorphicValidator {
    #[must_use]
    pub fn new(required: bool, required_with: Vec<String>, mapping: DispatchTable) -> Self {
        Self {
            attribute: AttributeValidator::new(ExpectedType::Any, required, required_with),
            mapping,
        }
    }

    #[must_use]
    pub fn attribute(&self) -> &AttributeValidator {
        &self.attribute
    }

    #[must_use]
    pub fn mapping(&self) -> &DispatchTable {
        &self.mapping
    }

    /// Validate the field `name` of `parent` with the validator mapped to
    /// its kind. The mapped validator reads the value from `parent` itself.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] with kind `UnmappedType` when the value's
    /// kind has no entry, or the first violation the mapped validator finds.
    pub fn validate(&self, name: &str, parent: Parent<'_>, path: &str) -> Result<(), ValidationError> {
        let Some(value) = self.attribute.check(name, parent, path)? else {
            return Ok(());
        };

        let kind = ValueKind::of(value);
        match self.mapping.get(kind) {
            Some(validator) => {
                trace!("Polymorphic field '{}' dispatched as {}", name, kind);
                validator.validate(name, parent, path)
            }
            None => Err(ValidationError::unmapped_type(join_path(path, name), name, value)),
        }
    }
}
