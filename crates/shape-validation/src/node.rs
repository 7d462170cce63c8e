//! Compiled validator tree nodes

use crate::attribute::{AttributeValidator, Parent};
use crate::collection::CollectionValidator;
use crate::compound::{CompoundedValidator, OpenContentValidator};
use crate::dispatch::PolymorphicValidator;
use crate::error::ValidationError;
use shape_schema::ExpectedType;

/// One executable node, compiled from one field spec
#[derive(Debug, Clone, PartialEq)]
pub enum Validator {
    Attribute(AttributeValidator),
    Compounded(CompoundedValidator),
    OpenContent(OpenContentValidator),
    Polymorphic(PolymorphicValidator),
    Collection(CollectionValidator),
}

impl Validator {
    /// Validate the field `name` of `parent`, where `path` is the error path
    /// of `parent` itself.
    ///
    /// # Errors
    ///
    /// Returns the first violation found.
    pub fn validate(&self, name: &str, parent: Parent<'_>, path: &str) -> Result<(), ValidationError> {
        match self {
            Validator::Attribute(v) => v.validate(name, parent, path),
            Validator::Compounded(v) => v.validate(name, parent, path),
            Validator::OpenContent(v) => v.validate(name, parent, path),
            Validator::Polymorphic(v) => v.validate(name, parent, path),
            Validator::Collection(v) => v.validate(name, parent, path),
        }
    }

    /// The shared leaf checks of this node
    #[must_use]
    pub fn attribute(&self) -> &AttributeValidator {
        match self {
            Validator::Attribute(v) => v,
            Validator::Compounded(v) => v.attribute(),
            Validator::OpenContent(v) => v.compounded().attribute(),
            Validator::Polymorphic(v) => v.attribute(),
            Validator::Collection(v) => v.attribute(),
        }
    }

    #[must_use]
    pub fn expected_type(&self) -> ExpectedType {
        self.attribute().expected_type()
    }

    /// Short name of the node kind
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            Validator::Attribute(_) => "attribute",
            Validator::Compounded(_) => "compounded",
            Validator::OpenContent(_) => "open_content",
            Validator::Polymorphic(_) => "polymorphic",
            Validator::Collection(_) => "collection",
        }
    }

    /// Declared children; empty for nodes without any
    #[must_use]
    pub fn children(&self) -> &[(String, Validator)] {
        match self {
            Validator::Compounded(v) => v.children(),
            Validator::OpenContent(v) => v.compounded().children(),
            _ => &[],
        }
    }
}

impl From<AttributeValidator> for Validator {
    fn from(validator: AttributeValidator) -> Self {
        Validator::Attribute(validator)
    }
}

impl From<CompoundedValidator> for Validator {
    fn from(validator: CompoundedValidator) -> Self {
        Validator::Compounded(validator)
    }
}

impl From<OpenContentValidator> for Validator {
    fn from(validator: OpenContentValidator) -> Self {
        Validator::OpenContent(validator)
    }
}

impl From<PolymorphicValidator> for Validator {
    fn from(validator: PolymorphicValidator) -> Self {
        Validator::Polymorphic(validator)
    }
}

impl From<CollectionValidator> for Validator {
    fn from(validator: CollectionValidator) -> Self {
        Validator::Collection(validator)
    }
}
