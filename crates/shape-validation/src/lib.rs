#![deny(rust_2018_idioms)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

//! # shape-validation
//!
//! Compiles a [`shape_schema::Schema`] into a tree of validators and runs it
//! against decoded documents.
//!
//! Validation is fail-fast: the walk is depth-first in declaration order and
//! stops at the first violation, reported as a [`ValidationError`] with a
//! slash-delimited path from the document root. A broken schema is reported
//! separately, at compile time, as a [`SchemaConfigurationError`].
//!
//! ## Example Usage
//!
//! ```rust
//! use serde_json::json;
//! use shape_schema::{FieldSpec, ObjectSpec, Schema};
//! use shape_validation::{ValidationErrorKind, compile};
//!
//! let schema = Schema::new("account").field(
//!     "profile",
//!     FieldSpec::object(ObjectSpec::new().field(
//!         "settings",
//!         FieldSpec::object(ObjectSpec::new().field("stay_logged", FieldSpec::boolean())),
//!     )),
//! );
//! let validator = compile(&schema).unwrap();
//!
//! let doc = json!({"profile": {"settings": {"stay_logged": "yes"}}});
//! let err = validator.validate(&doc).unwrap_err();
//! assert_eq!(err.kind, ValidationErrorKind::WrongType);
//! assert_eq!(err.path, "profile/settings/stay_logged");
//! ```

pub mod attribute;
pub mod collection;
pub mod compile;
pub mod compound;
pub mod dispatch;
pub mod error;
pub mod node;
pub mod registry;
pub mod schema;

// Re-export main types
pub use attribute::{AttributeValidator, Parent};
pub use collection::CollectionValidator;
pub use compile::compile;
pub use compound::{CompoundedValidator, OpenContentValidator};
pub use dispatch::{DispatchTable, PolymorphicValidator};
pub use error::{ValidationError, ValidationErrorKind};
pub use node::Validator;
pub use registry::ValidatorRegistry;
pub use schema::SchemaValidator;
pub use shape_schema::SchemaConfigurationError;

use thiserror::Error;

/// Errors from operations that can fail in more than one way
#[derive(Error, Debug)]
pub enum Error {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Configuration(#[from] SchemaConfigurationError),

    #[error(transparent)]
    Schema(#[from] shape_schema::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Convenience function to compile `schema` and validate `document` with it
///
/// # Errors
///
/// Returns [`Error::Configuration`] for a broken schema, or
/// [`Error::Validation`] with the first violation in `document`.
pub fn validate(schema: &shape_schema::Schema, document: &serde_json::Value) -> Result<()> {
    let validator = compile(schema)?;
    validator.validate(document)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use shape_schema::{FieldSpec, Schema};

    #[test]
    fn test_convenience_validate() {
        let schema = Schema::new("user").field("username", FieldSpec::string());

        assert!(validate(&schema, &json!({"username": "faderskd"})).is_ok());

        let err = validate(&schema, &json!({"username": ""})).unwrap_err();
        match err {
            Error::Validation(e) => assert_eq!(e.kind, ValidationErrorKind::EmptyValue),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_convenience_validate_reports_broken_schema() {
        let schema = Schema::new("broken").field("data", FieldSpec::polymorphic(Default::default()));

        let err = validate(&schema, &json!({"data": 1})).unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
        assert!(err.to_string().starts_with("Schema configuration error"));
    }
}
