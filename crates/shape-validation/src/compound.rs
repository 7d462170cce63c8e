//! Nested objects and open-content objects

use crate::attribute::{AttributeValidator, Parent, join_path};
use crate::dispatch::DispatchTable;
use crate::error::ValidationError;
use crate::node::Validator;
use serde_json::{Map, Value};
use shape_schema::{ExpectedType, ValueKind};
use std::collections::HashSet;
use tracing::trace;

/// Validates a mapping with a fixed set of declared children
#[derive(Debug, Clone, PartialEq)]
pub struct CompoundedValidator {
    attribute: AttributeValidator,
    children: Vec<(String, Validator)>,
}

impl CompoundedValidator {
    #[must_use]
    pub fn new(required: bool, required_with: Vec<String>, children: Vec<(String, Validator)>) -> Self {
        Self {
            attribute: AttributeValidator::new(
                ExpectedType::Kind(ValueKind::Object),
                required,
                required_with,
            ),
            children,
        }
    }

    #[must_use]
    pub fn attribute(&self) -> &AttributeValidator {
        &self.attribute
    }

    /// Declared children in declaration order
    #[must_use]
    pub fn children(&self) -> &[(String, Validator)] {
        &self.children
    }

    /// Validate the object field `name` of `parent`
    ///
    /// # Errors
    ///
    /// Returns the first violation found in the field or its children.
    pub fn validate(&self, name: &str, parent: Parent<'_>, path: &str) -> Result<(), ValidationError> {
        if let Some((map, child_path)) = self.check(name, parent, path)? {
            self.validate_children(map, &child_path)?;
        }
        Ok(())
    }

    fn check<'v>(
        &self,
        name: &str,
        parent: Parent<'v>,
        path: &str,
    ) -> Result<Option<(&'v Map<String, Value>, String)>, ValidationError> {
        let raw = self.attribute.check(name, parent, path)?;
        Ok(raw
            .and_then(Value::as_object)
            .map(|map| (map, join_path(path, name))))
    }

    fn validate_children(&self, map: &Map<String, Value>, path: &str) -> Result<(), ValidationError> {
        for (child_name, child) in &self.children {
            child.validate(child_name, Parent::Mapping(map), path)?;
        }
        Ok(())
    }
}

/// A compounded validator that also checks undeclared keys by their kind
#[derive(Debug, Clone, PartialEq)]
pub struct OpenContentValidator {
    compounded: CompoundedValidator,
    declared: HashSet<String>,
    mapping: DispatchTable,
}

impl OpenContentValidator {
    #[must_use]
    pub fn new(compounded: CompoundedValidator, mapping: DispatchTable) -> Self {
        let declared = compounded
            .children
            .iter()
            .map(|(name, _)| name.clone())
            .collect();
        Self {
            compounded,
            declared,
            mapping,
        }
    }

    #[must_use]
    pub fn compounded(&self) -> &CompoundedValidator {
        &self.compounded
    }

    #[must_use]
    pub fn mapping(&self) -> &DispatchTable {
        &self.mapping
    }

    /// Validate the open object field `name` of `parent`
    ///
    /// # Errors
    ///
    /// Returns the first violation among the declared children, then among
    /// the remaining keys in document order.
    pub fn validate(&self, name: &str, parent: Parent<'_>, path: &str) -> Result<(), ValidationError> {
        let Some((map, child_path)) = self.compounded.check(name, parent, path)? else {
            return Ok(());
        };
        self.compounded.validate_children(map, &child_path)?;

        for (key, value) in map {
            if self.declared.contains(key) {
                continue;
            }
            let kind = ValueKind::of(value);
            let Some(validator) = self.mapping.get(kind) else {
                return Err(ValidationError::unmapped_type(
                    join_path(&child_path, key),
                    key,
                    value,
                ));
            };
            trace!("Open content key '{}' dispatched as {}", key, kind);
            validator.validate(key, Parent::Mapping(map), &child_path)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationErrorKind;
    use serde_json::json;

    fn leaf(kind: ValueKind) -> Validator {
        Validator::Attribute(AttributeValidator::new(ExpectedType::Kind(kind), true, Vec::new()))
    }

    fn settings() -> CompoundedValidator {
        CompoundedValidator::new(
            true,
            Vec::new(),
            vec![("stay_logged".to_string(), leaf(ValueKind::Boolean))],
        )
    }

    fn profile() -> CompoundedValidator {
        CompoundedValidator::new(
            true,
            Vec::new(),
            vec![
                ("nickname".to_string(), leaf(ValueKind::String)),
                ("settings".to_string(), Validator::Compounded(settings())),
            ],
        )
    }

    fn appearance() -> Validator {
        Validator::Compounded(CompoundedValidator::new(
            true,
            Vec::new(),
            vec![
                ("height".to_string(), leaf(ValueKind::String)),
                ("age".to_string(), leaf(ValueKind::Integer)),
            ],
        ))
    }

    fn attributes() -> OpenContentValidator {
        let declared = CompoundedValidator::new(
            true,
            Vec::new(),
            vec![("surname".to_string(), leaf(ValueKind::String))],
        );
        let mapping = DispatchTable::new(vec![
            (ValueKind::String, leaf(ValueKind::String)),
            (ValueKind::Object, appearance()),
        ]);
        OpenContentValidator::new(declared, mapping)
    }

    fn root(doc: &Value) -> Parent<'_> {
        Parent::Mapping(doc.as_object().unwrap())
    }

    #[test]
    fn test_nested_paths() {
        let doc = json!({"profile": {"nickname": "kd", "settings": {"stay_logged": "yes"}}});
        let err = profile().validate("profile", root(&doc), "").unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::WrongType);
        assert_eq!(err.path, "profile/settings/stay_logged");
    }

    #[test]
    fn test_children_checked_in_declaration_order() {
        let doc = json!({"profile": {"settings": {}}});
        let err = profile().validate("profile", root(&doc), "").unwrap_err();
        assert_eq!(err.path, "profile/nickname");
    }

    #[test]
    fn test_absent_optional_object_skips_children() {
        let optional = CompoundedValidator::new(false, Vec::new(), settings().children().to_vec());
        assert!(optional.validate("settings", root(&json!({})), "").is_ok());
    }

    #[test]
    fn test_open_content_accepts_mapped_kinds() {
        let doc = json!({
            "attributes": {
                "surname": "Kolik",
                "appearance": {"height": "174cm", "age": 22},
                "nickname": "kk"
            }
        });
        assert!(attributes().validate("attributes", root(&doc), "").is_ok());
    }

    #[test]
    fn test_open_content_extra_object_is_validated_under_its_key() {
        let doc = json!({
            "attributes": {"surname": "Kolik", "appearance": {"height": "174cm"}}
        });
        let err = attributes().validate("attributes", root(&doc), "").unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::MissingKey);
        assert_eq!(err.path, "attributes/appearance/age");
    }

    #[test]
    fn test_open_content_unmapped_kind() {
        let doc = json!({"attributes": {"surname": "Kolik", "appearance": [1, 2]}});
        let err = attributes().validate("attributes", root(&doc), "").unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::UnmappedType);
        assert_eq!(err.path, "attributes/appearance");
    }

    #[test]
    fn test_open_content_declared_children_first() {
        let doc = json!({"attributes": {"appearance": [1], "surname": 5}});
        let err = attributes().validate("attributes", root(&doc), "").unwrap_err();
        assert_eq!(err.path, "attributes/surname");
        assert_eq!(err.kind, ValidationErrorKind::WrongType);
    }

    #[test]
    fn test_open_content_extra_keys_in_document_order() {
        let doc = json!({"attributes": {"surname": "Kolik", "b": 1, "a": true}});
        let err = attributes().validate("attributes", root(&doc), "").unwrap_err();
        assert_eq!(err.path, "attributes/b");
    }

    #[test]
    fn test_open_content_does_not_mutate_document() {
        let doc = json!({"attributes": {"surname": "Kolik", "eyes": "blue"}});
        let before = doc.clone();
        attributes().validate("attributes", root(&doc), "").unwrap();
        assert_eq!(doc, before);
    }
}
