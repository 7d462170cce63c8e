#![deny(rust_2018_idioms)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

//! # shape-schema
//!
//! Field specifications, schema builder, and schema file loader.
//!
//! A [`Schema`] is an ordered list of named [`FieldSpec`]s. Specs compose into
//! trees: nested objects, open-content objects whose undeclared keys are
//! checked by runtime kind, polymorphic fields, and homogeneous lists. The
//! validator layer (`shape-validation`) compiles a schema into an executable
//! tree once and runs it against many documents.
//!
//! ```rust
//! use shape_schema::{FieldSpec, ObjectSpec, Schema};
//!
//! let schema = Schema::new("user")
//!     .field("username", FieldSpec::string())
//!     .field(
//!         "first_name",
//!         FieldSpec::string().optional().required_with(["birth_date"]),
//!     )
//!     .field("birth_date", FieldSpec::string().optional())
//!     .field(
//!         "profile",
//!         FieldSpec::object(ObjectSpec::new().field("active", FieldSpec::boolean())),
//!     );
//!
//! assert_eq!(schema.fields().len(), 4);
//! ```

pub mod kind;
pub mod loader;
pub mod model;
pub mod registry;

pub use kind::{ExpectedType, ValueKind};
pub use loader::SchemaLoader;
pub use model::{Field, FieldSpec, ObjectSpec, OpenObjectSpec, Schema, Shape, TypeMapping};
pub use registry::SchemaRegistry;

use thiserror::Error;

/// A broken schema definition, detected when a schema is compiled.
///
/// Never produced while validating data.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Schema configuration error at '{path}': {reason}")]
pub struct SchemaConfigurationError {
    /// Slash-delimited location of the offending spec inside the schema
    pub path: String,
    /// What is wrong with it
    pub reason: String,
}

impl SchemaConfigurationError {
    pub fn new(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// Errors that can occur when working with schemas
#[derive(Error, Debug)]
pub enum Error {
    #[error("Schema not found: {0}")]
    NotFound(String),

    #[error("Invalid schema format: {0}")]
    InvalidFormat(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
