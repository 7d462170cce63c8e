//! Compilation of schema specs into validator trees

use crate::attribute::{AttributeValidator, join_path};
use crate::collection::CollectionValidator;
use crate::compound::{CompoundedValidator, OpenContentValidator};
use crate::dispatch::{DispatchTable, PolymorphicValidator};
use crate::node::Validator;
use crate::schema::SchemaValidator;
use shape_schema::{
    ExpectedType, Field, FieldSpec, Schema, SchemaConfigurationError, Shape, TypeMapping,
    ValueKind,
};
use std::collections::HashSet;
use tracing::trace;

/// Compile a schema into its validator tree.
///
/// # Errors
///
/// Returns [`SchemaConfigurationError`] when the schema itself is broken:
/// duplicate names in a container, a field expecting `null`, or a type
/// mapping that is empty, repeats a kind, maps `null`, or maps a kind to a
/// spec expecting something else.
pub fn compile(schema: &Schema) -> Result<SchemaValidator, SchemaConfigurationError> {
    let children = compile_fields(&schema.fields, "")?;
    trace!("Compiled schema '{}' ({} top-level fields)", schema.name, children.len());
    Ok(SchemaValidator::new(schema.name.clone(), children))
}

impl TryFrom<&Schema> for SchemaValidator {
    type Error = SchemaConfigurationError;

    fn try_from(schema: &Schema) -> Result<Self, Self::Error> {
        compile(schema)
    }
}

fn compile_fields(
    fields: &[Field],
    path: &str,
) -> Result<Vec<(String, Validator)>, SchemaConfigurationError> {
    let mut seen = HashSet::new();
    fields
        .iter()
        .map(|field| {
            if !seen.insert(field.name.as_str()) {
                return Err(SchemaConfigurationError::new(
                    path,
                    format!("duplicate field name '{}'", field.name),
                ));
            }
            let validator = compile_field(&field.spec, &join_path(path, &field.name))?;
            Ok((field.name.clone(), validator))
        })
        .collect()
}

fn compile_field(spec: &FieldSpec, path: &str) -> Result<Validator, SchemaConfigurationError> {
    let required = spec.required;
    let required_with = spec.required_with.clone();

    let validator = match &spec.shape {
        Shape::Typed(ValueKind::Null) => {
            return Err(SchemaConfigurationError::new(
                path,
                "fields cannot expect null; null values are treated as absent",
            ));
        }
        Shape::Typed(kind) => Validator::Attribute(AttributeValidator::new(
            ExpectedType::Kind(*kind),
            required,
            required_with,
        )),
        Shape::Object(object) => Validator::Compounded(CompoundedValidator::new(
            required,
            required_with,
            compile_fields(&object.fields, path)?,
        )),
        Shape::OpenObject(open) => {
            let compounded = CompoundedValidator::new(
                required,
                required_with,
                compile_fields(&open.object.fields, path)?,
            );
            let mapping = compile_mapping(&open.mapping, path)?;
            Validator::OpenContent(OpenContentValidator::new(compounded, mapping))
        }
        Shape::Polymorphic(mapping) => Validator::Polymorphic(PolymorphicValidator::new(
            required,
            required_with,
            compile_mapping(mapping, path)?,
        )),
        Shape::Collection(items) => {
            let items = compile_field(items, &join_path(path, "<item>"))?;
            Validator::Collection(CollectionValidator::new(required, required_with, items))
        }
    };

    Ok(validator)
}

fn compile_mapping(
    mapping: &TypeMapping,
    path: &str,
) -> Result<DispatchTable, SchemaConfigurationError> {
    if mapping.is_empty() {
        return Err(SchemaConfigurationError::new(
            path,
            "type mapping must not be empty",
        ));
    }

    let mut seen = HashSet::new();
    let mut entries = Vec::with_capacity(mapping.len());
    for (kind, spec) in &mapping.entries {
        let entry_path = join_path(path, &format!("<{kind}>"));
        if *kind == ValueKind::Null {
            return Err(SchemaConfigurationError::new(
                entry_path,
                "null cannot be mapped; null values are treated as absent",
            ));
        }
        if !seen.insert(*kind) {
            return Err(SchemaConfigurationError::new(
                path,
                format!("type {kind} mapped more than once"),
            ));
        }
        match spec.expected_type() {
            ExpectedType::Any => {
                return Err(SchemaConfigurationError::new(
                    entry_path,
                    "mapped fields must expect a concrete type",
                ));
            }
            ExpectedType::Kind(expected) if expected != *kind => {
                return Err(SchemaConfigurationError::new(
                    entry_path,
                    format!("type {kind} mapped to a field expecting {expected}"),
                ));
            }
            ExpectedType::Kind(_) => {}
        }
        entries.push((*kind, compile_field(spec, &entry_path)?));
    }

    Ok(DispatchTable::new(entries))
}
