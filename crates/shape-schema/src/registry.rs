//! Concurrent schema registry

use crate::model::Schema;
use dashmap::DashMap;

/// Thread-safe name to schema cache used by the loader
#[derive(Debug, Default)]
pub struct SchemaRegistry {
    schemas: DashMap<String, Schema>,
}

impl SchemaRegistry {
    /// Create a new empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a schema, replacing any previous one with the same name
    pub fn register(&self, name: impl Into<String>, schema: Schema) {
        self.schemas.insert(name.into(), schema);
    }

    /// Get a copy of a schema by name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Schema> {
        self.schemas.get(name).map(|entry| entry.value().clone())
    }

    /// Check if a schema exists
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.schemas.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FieldSpec;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_register_and_get() {
        let registry = SchemaRegistry::new();
        assert!(registry.is_empty());

        registry.register("user", Schema::new("user").field("username", FieldSpec::string()));

        assert!(registry.contains("user"));
        assert_eq!(registry.len(), 1);
        let schema = registry.get("user").unwrap();
        assert_eq!(schema.fields().len(), 1);
        assert!(registry.get("post").is_none());
    }

    #[test]
    fn test_concurrent_registration() {
        let registry = Arc::new(SchemaRegistry::new());

        let handles: Vec<_> = (0..4)
            .map(|i| {
                let registry = Arc::clone(&registry);
                thread::spawn(move || {
                    let name = format!("schema_{i}");
                    registry.register(name.clone(), Schema::new(name));
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(registry.len(), 4);
        assert!(registry.contains("schema_3"));
    }
}
