//! Metadata block parsing and schema checks
//!
//! The metadata block is parsed as YAML into a tagged [`MetadataValue`]
//! tree. The top level must be a mapping whose keys belong to a fixed
//! allow-list; each known field has an expected [`FieldShape`] checked by
//! pattern matching. `name` and `description` are handed to the field
//! validators once the block parses.

use crate::config::Limits;
use crate::fields::{validate_description, validate_name};
use crate::outcome::{CheckCategory, CheckOutcome};
use crate::package::Package;
use indexmap::IndexMap;
use serde::Serialize;
use tracing::{debug, trace};

/// Expected shape of a metadata field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldShape {
    /// A scalar string
    Text,
    /// A space-separated string or a list of strings
    TextOrList,
    /// A nested mapping
    Mapping,
}

impl FieldShape {
    /// Check a value against this shape
    pub fn accepts(&self, value: &MetadataValue) -> bool {
        match (self, value) {
            (FieldShape::Text, MetadataValue::String(_)) => true,
            (FieldShape::TextOrList, MetadataValue::String(_)) => true,
            (FieldShape::TextOrList, MetadataValue::List(items)) => items
                .iter()
                .all(|item| matches!(item, MetadataValue::String(_))),
            (FieldShape::Mapping, MetadataValue::Mapping(_)) => true,
            _ => false,
        }
    }

    pub fn describe(&self) -> &'static str {
        match self {
            FieldShape::Text => "a string",
            FieldShape::TextOrList => "a string or a list of strings",
            FieldShape::Mapping => "a mapping",
        }
    }
}

/// One entry of the metadata schema
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub shape: FieldShape,
    pub required: bool,
}

/// The allowed metadata fields, in the order they are listed in messages
pub static SCHEMA: [FieldSpec; 5] = [
    FieldSpec {
        name: "name",
        shape: FieldShape::Text,
        required: true,
    },
    FieldSpec {
        name: "description",
        shape: FieldShape::Text,
        required: true,
    },
    FieldSpec {
        name: "license",
        shape: FieldShape::Text,
        required: false,
    },
    FieldSpec {
        name: "allowed-tools",
        shape: FieldShape::TextOrList,
        required: false,
    },
    FieldSpec {
        name: "metadata",
        shape: FieldShape::Mapping,
        required: false,
    },
];

/// Look up a field in the schema
pub fn field_spec(name: &str) -> Option<&'static FieldSpec> {
    SCHEMA.iter().find(|spec| spec.name == name)
}

/// Comma-separated list of allowed field names
pub fn allowed_fields() -> String {
    SCHEMA
        .iter()
        .map(|spec| spec.name)
        .collect::<Vec<_>>()
        .join(", ")
}

/// A parsed metadata value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MetadataValue {
    Null,
    Bool(bool),
    Number(String),
    String(String),
    List(Vec<MetadataValue>),
    Mapping(IndexMap<String, MetadataValue>),
}

impl MetadataValue {
    /// Type name used in messages
    pub fn type_name(&self) -> &'static str {
        match self {
            MetadataValue::Null => "null",
            MetadataValue::Bool(_) => "bool",
            MetadataValue::Number(_) => "number",
            MetadataValue::String(_) => "string",
            MetadataValue::List(_) => "list",
            MetadataValue::Mapping(_) => "mapping",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            MetadataValue::String(s) => Some(s),
            _ => None,
        }
    }

    fn from_yaml(value: serde_yaml_ng::Value) -> Result<Self, String> {
        use serde_yaml_ng::Value;

        Ok(match value {
            Value::Null => MetadataValue::Null,
            Value::Bool(b) => MetadataValue::Bool(b),
            Value::Number(n) => MetadataValue::Number(n.to_string()),
            Value::String(s) => MetadataValue::String(s),
            Value::Sequence(items) => MetadataValue::List(
                items
                    .into_iter()
                    .map(MetadataValue::from_yaml)
                    .collect::<Result<_, _>>()?,
            ),
            Value::Mapping(mapping) => {
                let mut entries = IndexMap::with_capacity(mapping.len());
                for (key, value) in mapping {
                    entries.insert(key_to_string(key)?, MetadataValue::from_yaml(value)?);
                }
                MetadataValue::Mapping(entries)
            }
            Value::Tagged(tagged) => MetadataValue::from_yaml(tagged.value)?,
        })
    }
}

fn key_to_string(key: serde_yaml_ng::Value) -> Result<String, String> {
    use serde_yaml_ng::Value;

    match key {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Null => Ok("null".to_string()),
        other => Err(format!(
            "Frontmatter keys must be strings, got: {}",
            match other {
                Value::Sequence(_) => "list",
                Value::Mapping(_) => "mapping",
                _ => "tagged value",
            }
        )),
    }
}

/// A parsed metadata block: field name to value, in document order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Metadata {
    fields: IndexMap<String, MetadataValue>,
}

impl Metadata {
    /// Parse a metadata block into a mapping.
    ///
    /// Fails with a message when the YAML is malformed or the top level is
    /// not a mapping.
    pub fn parse(block: &str) -> Result<Self, String> {
        let value: serde_yaml_ng::Value = serde_yaml_ng::from_str(block)
            .map_err(|e| format!("Invalid YAML in frontmatter: {}", e))?;

        match MetadataValue::from_yaml(value)? {
            MetadataValue::Mapping(fields) => Ok(Self { fields }),
            other => Err(format!(
                "Frontmatter must be a YAML mapping, got: {}",
                other.type_name()
            )),
        }
    }

    pub fn get(&self, key: &str) -> Option<&MetadataValue> {
        self.fields.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Field names in document order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Parse the metadata block and check it against the schema.
///
/// A block that does not parse yields a single error and no metadata; the
/// caller keeps validating the rest of the package either way.
pub fn parse_and_check(
    block: &str,
    package: &Package,
    limits: &Limits,
) -> (Option<Metadata>, Vec<CheckOutcome>) {
    let mut outcomes = Vec::new();

    let metadata = match Metadata::parse(block) {
        Ok(metadata) => metadata,
        Err(message) => {
            debug!("Metadata block rejected: {}", message);
            outcomes.push(CheckOutcome::error(CheckCategory::Schema, message));
            return (None, outcomes);
        }
    };

    debug!("Parsed metadata block with {} field(s)", metadata.len());
    outcomes.push(CheckOutcome::pass(
        CheckCategory::Schema,
        "Valid YAML frontmatter",
    ));

    match metadata.get("name") {
        Some(value) => outcomes.extend(validate_name(value, package.directory_name(), limits)),
        None => outcomes.push(missing_field("name")),
    }

    match metadata.get("description") {
        Some(value) => outcomes.extend(validate_description(value, limits)),
        None => outcomes.push(missing_field("description")),
    }

    for key in metadata.keys() {
        if field_spec(key).is_none() {
            trace!("Unexpected metadata key '{}'", key);
            outcomes.push(CheckOutcome::error(
                CheckCategory::Schema,
                format!(
                    "Unexpected frontmatter field: '{}' (allowed: {})",
                    key,
                    allowed_fields()
                ),
            ));
        }
    }

    for spec in SCHEMA.iter().filter(|spec| !spec.required) {
        if let Some(value) = metadata.get(spec.name) {
            if !spec.shape.accepts(value) {
                outcomes.push(CheckOutcome::error(
                    CheckCategory::Schema,
                    format!(
                        "'{}' must be {}, got: {}",
                        spec.name,
                        spec.shape.describe(),
                        value.type_name()
                    ),
                ));
            }
        }
    }

    (Some(metadata), outcomes)
}

fn missing_field(name: &str) -> CheckOutcome {
    CheckOutcome::error(
        CheckCategory::Schema,
        format!("Missing required field: '{}'", name),
    )
}
