//! Schema loader for YAML and JSON schema files

use crate::kind::ValueKind;
use crate::model::{Field, FieldSpec, ObjectSpec, Schema, TypeMapping};
use crate::registry::SchemaRegistry;
use crate::{Error, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, trace};

const SCHEMA_EXTENSIONS: [&str; 3] = ["yaml", "yml", "json"];

/// Serializable schema format for loading from files
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SchemaFile {
    name: String,
    #[serde(default)]
    fields: Vec<FieldFile>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FieldFile {
    #[serde(default)]
    name: Option<String>,
    #[serde(rename = "type")]
    field_type: String,
    #[serde(default = "default_required")]
    required: bool,
    #[serde(default)]
    required_with: Vec<String>,
    #[serde(default)]
    fields: Option<Vec<FieldFile>>,
    #[serde(default)]
    mapping: Option<BTreeMap<String, FieldFile>>,
    #[serde(default)]
    items: Option<Box<FieldFile>>,
}

fn default_required() -> bool {
    true
}

/// Loads schemas from files, caching them by name
pub struct SchemaLoader {
    registry: Arc<SchemaRegistry>,
    schema_paths: Vec<PathBuf>,
}

impl SchemaLoader {
    /// Create a new schema loader with the given search paths
    #[must_use]
    pub fn new(schema_paths: Vec<PathBuf>) -> Self {
        Self {
            registry: Arc::new(SchemaRegistry::new()),
            schema_paths,
        }
    }

    /// Create a new schema loader with a pre-configured registry
    #[must_use]
    pub fn with_registry(registry: Arc<SchemaRegistry>, schema_paths: Vec<PathBuf>) -> Self {
        Self {
            registry,
            schema_paths,
        }
    }

    /// Load a schema by name.
    /// First checks the cache, then looks for `<name>.yaml`, `<name>.yml` or
    /// `<name>.json` in the search paths.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] when no search path holds the schema,
    /// [`Error::InvalidFormat`] when the file found declares another name, or
    /// the error of reading and parsing it.
    pub fn load(&self, name: &str) -> Result<Schema> {
        if let Some(cached) = self.registry.get(name) {
            debug!("Cache hit for schema: {}", name);
            return Ok(cached);
        }

        trace!("Cache miss for schema: {}", name);
        let schema = self.load_from_disk(name)?;
        self.registry.register(name, schema.clone());

        Ok(schema)
    }

    /// Load a schema from a specific file path
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be read or is not a valid schema.
    pub fn load_from_file(&self, path: &Path) -> Result<Schema> {
        trace!("Loading schema from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;

        let schema = if path
            .extension()
            .is_some_and(|e| e == "yaml" || e == "yml")
        {
            self.load_from_yaml(&content)?
        } else {
            self.load_from_json(&content)?
        };

        info!("Loaded schema '{}' from {}", schema.name, path.display());
        Ok(schema)
    }

    /// Load a schema from JSON string
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidFormat`] for malformed JSON or schema content.
    pub fn load_from_json(&self, json: &str) -> Result<Schema> {
        let schema_file: SchemaFile = serde_json::from_str(json)
            .map_err(|e| Error::InvalidFormat(format!("JSON parse error: {e}")))?;

        convert_schema_file(schema_file)
    }

    /// Load a schema from YAML string
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidFormat`] for malformed YAML or schema content.
    pub fn load_from_yaml(&self, yaml: &str) -> Result<Schema> {
        let schema_file: SchemaFile = serde_yaml::from_str(yaml)
            .map_err(|e| Error::InvalidFormat(format!("YAML parse error: {e}")))?;

        convert_schema_file(schema_file)
    }

    fn load_from_disk(&self, name: &str) -> Result<Schema> {
        for path in &self.schema_paths {
            for extension in SCHEMA_EXTENSIONS {
                let file_path = path.join(format!("{name}.{extension}"));
                if file_path.exists() {
                    trace!("Found schema file: {:?}", file_path);
                    let schema = self.load_from_file(&file_path)?;
                    if schema.name != name {
                        return Err(Error::InvalidFormat(format!(
                            "{} declares schema '{}', expected '{}'",
                            file_path.display(),
                            schema.name,
                            name
                        )));
                    }
                    return Ok(schema);
                }
            }
        }

        Err(Error::NotFound(format!(
            "Schema {} not found in search paths: {:?}",
            name, self.schema_paths
        )))
    }

    /// Add a search path for schema files
    pub fn add_path(&mut self, path: PathBuf) {
        self.schema_paths.push(path);
    }

    pub fn schema_paths(&self) -> &[PathBuf] {
        &self.schema_paths
    }

    /// Get the registry (for testing/debugging)
    #[must_use]
    pub fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }
}

impl Default for SchemaLoader {
    fn default() -> Self {
        Self::new(vec![PathBuf::from(".")])
    }
}

fn convert_schema_file(schema_file: SchemaFile) -> Result<Schema> {
    let fields = convert_fields(schema_file.fields, "")?;
    Ok(Schema::new(schema_file.name).with_fields(fields))
}

fn convert_fields(files: Vec<FieldFile>, parent_path: &str) -> Result<Vec<Field>> {
    files
        .into_iter()
        .map(|mut file| {
            let name = file.name.take().ok_or_else(|| {
                invalid_format(parent_path, "declared fields must have a 'name'")
            })?;
            let path = join(parent_path, &name);
            let spec = convert_field(file, &path)?;
            Ok(Field::new(name, spec))
        })
        .collect()
}

fn convert_unnamed(file: FieldFile, path: &str) -> Result<FieldSpec> {
    if file.name.is_some() {
        return Err(invalid_format(
            path,
            "mapping entries and list items take their name from the document",
        ));
    }
    convert_field(file, path)
}

fn convert_mapping(entries: BTreeMap<String, FieldFile>, path: &str) -> Result<TypeMapping> {
    let mut mapping = TypeMapping::new();
    for (kind_name, file) in entries {
        let kind: ValueKind = kind_name
            .parse()
            .map_err(|e: String| invalid_format(path, &e))?;
        let entry_path = join(path, &format!("<{kind}>"));
        mapping = mapping.map(kind, convert_unnamed(file, &entry_path)?);
    }
    Ok(mapping)
}

fn convert_field(file: FieldFile, path: &str) -> Result<FieldSpec> {
    let FieldFile {
        field_type,
        required,
        required_with,
        fields,
        mapping,
        items,
        ..
    } = file;

    let field_type = field_type.to_ascii_lowercase();
    let spec = match field_type.as_str() {
        "open_object" => {
            let mapping = mapping
                .ok_or_else(|| invalid_format(path, "open_object requires a 'mapping'"))?;
            reject_items(items.as_deref(), path)?;
            let object = ObjectSpec {
                fields: convert_fields(fields.unwrap_or_default(), path)?,
            };
            FieldSpec::open_object(object, convert_mapping(mapping, path)?)
        }
        "polymorphic" => {
            let mapping = mapping
                .ok_or_else(|| invalid_format(path, "polymorphic requires a 'mapping'"))?;
            reject_fields(fields.as_deref(), path)?;
            reject_items(items.as_deref(), path)?;
            FieldSpec::polymorphic(convert_mapping(mapping, path)?)
        }
        other => {
            let kind: ValueKind = other.parse().map_err(|e: String| invalid_format(path, &e))?;
            reject_mapping(mapping.as_ref(), path)?;
            match kind {
                ValueKind::Object => {
                    reject_items(items.as_deref(), path)?;
                    match fields {
                        Some(fields) => FieldSpec::object(ObjectSpec {
                            fields: convert_fields(fields, path)?,
                        }),
                        None => FieldSpec::mapping(),
                    }
                }
                ValueKind::List => {
                    reject_fields(fields.as_deref(), path)?;
                    match items {
                        Some(items) => {
                            let item_path = join(path, "<item>");
                            FieldSpec::list_of(convert_unnamed(*items, &item_path)?)
                        }
                        None => FieldSpec::list(),
                    }
                }
                scalar => {
                    reject_fields(fields.as_deref(), path)?;
                    reject_items(items.as_deref(), path)?;
                    FieldSpec::typed(scalar)
                }
            }
        }
    };

    Ok(spec.required(required).required_with(required_with))
}

fn reject_fields(fields: Option<&[FieldFile]>, path: &str) -> Result<()> {
    match fields {
        Some(_) => Err(invalid_format(path, "'fields' is only valid for object types")),
        None => Ok(()),
    }
}

fn reject_items(items: Option<&FieldFile>, path: &str) -> Result<()> {
    match items {
        Some(_) => Err(invalid_format(path, "'items' is only valid for list types")),
        None => Ok(()),
    }
}

fn reject_mapping(mapping: Option<&BTreeMap<String, FieldFile>>, path: &str) -> Result<()> {
    match mapping {
        Some(_) => Err(invalid_format(
            path,
            "'mapping' is only valid for open_object and polymorphic types",
        )),
        None => Ok(()),
    }
}

fn invalid_format(path: &str, message: &str) -> Error {
    if path.is_empty() {
        Error::InvalidFormat(message.to_string())
    } else {
        Error::InvalidFormat(format!("field '{path}': {message}"))
    }
}

fn join(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{parent}/{name}")
    }
}
