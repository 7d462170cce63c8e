//! Schema model definitions
#![allow(clippy::must_use_candidate)] // Builder API mirrors the rest of the workspace.
#![allow(clippy::return_self_not_must_use)]

use crate::kind::{ExpectedType, ValueKind};

/// A complete payload schema: the ordered top-level fields of a document
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    pub name: String,
    pub fields: Vec<Field>,
}

/// A field spec bound to the name it has inside its container
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    pub spec: FieldSpec,
}

/// Declared shape of one field
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    /// Whether the field must be present with a non-empty value
    pub required: bool,
    /// Sibling keys that must be present whenever this field is
    pub required_with: Vec<String>,
    /// What the value must look like
    pub shape: Shape,
}

/// The structural part of a [`FieldSpec`]
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// A value of exactly this kind, with no further structure checks
    Typed(ValueKind),
    /// A mapping with a fixed set of declared fields
    Object(ObjectSpec),
    /// A mapping with declared fields plus undeclared keys checked by kind
    OpenObject(OpenObjectSpec),
    /// A value whose own kind selects the spec that checks it
    Polymorphic(TypeMapping),
    /// A list whose every element is checked by the inner spec
    Collection(Box<FieldSpec>),
}

/// Ordered named fields of a nested object
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectSpec {
    pub fields: Vec<Field>,
}

/// Declared fields plus the mapping applied to every other key
#[derive(Debug, Clone, PartialEq)]
pub struct OpenObjectSpec {
    pub object: ObjectSpec,
    pub mapping: TypeMapping,
}

/// Runtime kind to spec dispatch table
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TypeMapping {
    pub entries: Vec<(ValueKind, FieldSpec)>,
}

impl Schema {
    /// Create an empty schema
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Append a top-level field
    pub fn field(mut self, name: impl Into<String>, spec: FieldSpec) -> Self {
        self.fields.push(Field::new(name, spec));
        self
    }

    /// Replace the top-level fields
    pub fn with_fields(mut self, fields: Vec<Field>) -> Self {
        self.fields = fields;
        self
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Find a top-level field by name
    pub fn find_field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }
}

impl Field {
    pub fn new(name: impl Into<String>, spec: FieldSpec) -> Self {
        Self {
            name: name.into(),
            spec,
        }
    }
}

impl FieldSpec {
    fn with_shape(shape: Shape) -> Self {
        Self {
            required: true,
            required_with: Vec::new(),
            shape,
        }
    }

    /// A required field of exactly `kind`
    pub fn typed(kind: ValueKind) -> Self {
        Self::with_shape(Shape::Typed(kind))
    }

    pub fn string() -> Self {
        Self::typed(ValueKind::String)
    }

    pub fn integer() -> Self {
        Self::typed(ValueKind::Integer)
    }

    pub fn float() -> Self {
        Self::typed(ValueKind::Float)
    }

    pub fn boolean() -> Self {
        Self::typed(ValueKind::Boolean)
    }

    /// A list of anything
    pub fn list() -> Self {
        Self::typed(ValueKind::List)
    }

    /// A mapping with no declared structure
    pub fn mapping() -> Self {
        Self::typed(ValueKind::Object)
    }

    /// A nested object with a fixed shape
    pub fn object(object: ObjectSpec) -> Self {
        Self::with_shape(Shape::Object(object))
    }

    /// A nested object that also accepts undeclared keys whose kind is in `mapping`
    pub fn open_object(object: ObjectSpec, mapping: TypeMapping) -> Self {
        Self::with_shape(Shape::OpenObject(OpenObjectSpec { object, mapping }))
    }

    /// A field whose value kind selects its spec from `mapping`
    pub fn polymorphic(mapping: TypeMapping) -> Self {
        Self::with_shape(Shape::Polymorphic(mapping))
    }

    /// A list whose elements all match `items`
    pub fn list_of(items: FieldSpec) -> Self {
        Self::with_shape(Shape::Collection(Box::new(items)))
    }

    /// Mark as not required
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Set the required flag
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Require the named siblings whenever this field is present
    pub fn required_with<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for name in names {
            let name = name.into();
            if !self.required_with.contains(&name) {
                self.required_with.push(name);
            }
        }
        self
    }

    /// The type the raw value is checked against
    pub fn expected_type(&self) -> ExpectedType {
        match &self.shape {
            Shape::Typed(kind) => ExpectedType::Kind(*kind),
            Shape::Object(_) | Shape::OpenObject(_) => ExpectedType::Kind(ValueKind::Object),
            Shape::Polymorphic(_) => ExpectedType::Any,
            Shape::Collection(_) => ExpectedType::Kind(ValueKind::List),
        }
    }
}

impl ObjectSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a declared field
    pub fn field(mut self, name: impl Into<String>, spec: FieldSpec) -> Self {
        self.fields.push(Field::new(name, spec));
        self
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }
}

impl TypeMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map values of `kind` to `spec`
    pub fn map(mut self, kind: ValueKind, spec: FieldSpec) -> Self {
        self.entries.push((kind, spec));
        self
    }

    /// Spec for `kind`, if mapped
    pub fn get(&self, kind: ValueKind) -> Option<&FieldSpec> {
        self.entries
            .iter()
            .find(|(mapped, _)| *mapped == kind)
            .map(|(_, spec)| spec)
    }

    pub fn kinds(&self) -> impl Iterator<Item = ValueKind> + '_ {
        self.entries.iter().map(|(kind, _)| *kind)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
