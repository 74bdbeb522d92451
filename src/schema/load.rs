//! Schema document (config_schema.yaml).
//!
//! YAML shape:
//! ```yaml
//! port:
//!   type: int                 # optional Go type, or "duration"
//!   default: 8080             # any YAML value
//!   description: Server port  # optional
//! timeout:
//!   type: duration
//!   default: 5s
//! ```
//!
//! Field names are kept in a BTreeMap so every run visits them in the same
//! order regardless of how the document was written.

use crate::error::GenError;
use crate::schema::Value;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Field name -> spec, sorted by name.
pub type Schema = BTreeMap<String, FieldSpec>;

/// Raw entry shape as it appears in the document.
#[derive(Debug, Clone, Deserialize)]
struct RawFieldSpec {
    #[serde(rename = "type", default)]
    type_tag: Option<String>,

    #[serde(default)]
    default: serde_yaml::Value,

    #[serde(default)]
    description: Option<String>,
}

/// One schema entry, ready for descriptor construction.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    pub type_tag: Option<String>,
    pub default_value: Value,
    pub description: String,
}

impl From<RawFieldSpec> for FieldSpec {
    fn from(raw: RawFieldSpec) -> Self {
        Self {
            type_tag: raw.type_tag.filter(|t| !t.trim().is_empty()),
            default_value: Value::from(raw.default),
            description: raw.description.unwrap_or_default(),
        }
    }
}

/// Read and parse a schema file.
pub fn load_schema(path: &Path) -> Result<Schema, GenError> {
    let text = fs::read_to_string(path).map_err(|source| GenError::SchemaRead {
        path: path.to_path_buf(),
        source,
    })?;

    let schema = parse_schema(&text).map_err(|source| GenError::SchemaParse {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::debug!(path = %path.display(), fields = schema.len(), "loaded schema");
    Ok(schema)
}

/// Parse schema text. An empty document is an empty schema.
pub fn parse_schema(text: &str) -> Result<Schema, serde_yaml::Error> {
    let doc: serde_yaml::Value = serde_yaml::from_str(text)?;
    if doc.is_null() {
        tracing::warn!("schema document is empty");
        return Ok(Schema::new());
    }

    let raw: BTreeMap<String, RawFieldSpec> = serde_yaml::from_value(doc)?;
    Ok(raw
        .into_iter()
        .map(|(name, spec)| (name, FieldSpec::from(spec)))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_entries_sorted_by_name() {
        let schema = parse_schema(
            r#"
port:
  type: int
  default: 8080
  description: Server port
app_name:
  type: string
  default: myapp
"#,
        )
        .unwrap();

        let names: Vec<&str> = schema.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["app_name", "port"]);
        assert_eq!(
            schema["port"],
            FieldSpec {
                type_tag: Some("int".to_string()),
                default_value: Value::Int(8080),
                description: "Server port".to_string(),
            }
        );
        assert_eq!(schema["app_name"].description, "");
    }

    #[test]
    fn missing_keys_default() {
        let schema = parse_schema("flag: {}\n").unwrap();
        assert_eq!(
            schema["flag"],
            FieldSpec {
                type_tag: None,
                default_value: Value::Null,
                description: String::new(),
            }
        );
    }

    #[test]
    fn rejects_non_mapping_documents() {
        assert!(parse_schema("- a\n- b\n").is_err());
        assert!(parse_schema("port: [1, 2\n").is_err());
    }

    #[test]
    fn reports_missing_file() {
        let err = load_schema(Path::new("definitely/not/here.yaml")).unwrap_err();
        assert!(matches!(err, GenError::SchemaRead { .. }));
        assert!(err.to_string().contains("definitely/not/here.yaml"));
    }
}
