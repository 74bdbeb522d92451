//! Field descriptors: combine schema entries with synthesized literals.

pub mod naming;

use crate::duration;
use crate::error::GenError;
use crate::literal::{DURATION_TAG, DurationStrings, GO_DURATION, Synthesizer, infer};
use crate::schema::{FieldSpec, Schema, Value};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

pub use naming::{to_camel, to_lower_camel};

/// Go package of the generated files.
pub const PACKAGE_NAME: &str = "config";
/// Name of the generated settings interface.
pub const STRUCT_NAME: &str = "AppConfig";

const GO_KEYWORDS: &[&str] = &[
    "break", "case", "chan", "const", "continue", "default", "defer", "else", "fallthrough",
    "for", "func", "go", "goto", "if", "import", "interface", "map", "package", "range",
    "return", "select", "struct", "switch", "type", "var",
];

/// Generation-ready view of one schema entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Field {
    /// Key in the schema and in the key/value store.
    pub original_name: String,
    /// Exported identifier (`GetXxx`, fake struct fields).
    pub name: String,
    /// Unexported struct field name.
    pub var_name: String,
    pub resolved_type: String,
    pub default_literal: String,
    pub description: String,
    /// Standard packages the default literal or type refers to.
    pub imports: BTreeSet<&'static str>,
}

/// Everything the emitter needs, in output order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationPlan {
    pub package_name: String,
    pub struct_name: String,
    pub fields: Vec<Field>,
    pub imports: BTreeSet<&'static str>,
}

impl GenerationPlan {
    /// Whether the generated code needs `import "time"`.
    pub fn uses_time(&self) -> bool {
        self.imports.contains("time")
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FieldBuilder {
    synth: Synthesizer,
}

impl FieldBuilder {
    pub fn new(duration_strings: DurationStrings) -> Self {
        Self {
            synth: Synthesizer::new(duration_strings),
        }
    }

    /// Build the descriptor for a single schema entry.
    pub fn build(&self, field_name: &str, spec: &FieldSpec) -> Result<Field, GenError> {
        let resolved_type = match spec.type_tag.as_deref() {
            Some(DURATION_TAG) => GO_DURATION.to_string(),
            Some(tag) => tag.to_string(),
            None => self.infer_field_type(&spec.default_value).to_string(),
        };
        let declared = spec.type_tag.as_deref().unwrap_or(&resolved_type);

        self.warn_on_duration_string(
            field_name,
            spec.type_tag.as_deref(),
            &spec.default_value,
        );

        let literal = self
            .synth
            .synthesize(&spec.default_value, declared)
            .map_err(|source| GenError::DurationFormat {
                field: field_name.to_string(),
                source,
            })?;

        let mut imports = literal.imports;
        if resolved_type.contains("time.") {
            imports.insert("time");
        }

        let name = to_camel(field_name);
        let mut var_name = to_lower_camel(field_name);
        if GO_KEYWORDS.contains(&var_name.as_str()) {
            var_name.push('_');
        }

        Ok(Field {
            original_name: field_name.to_string(),
            name,
            var_name,
            resolved_type,
            default_literal: literal.expr,
            description: spec.description.trim().to_string(),
            imports,
        })
    }

    /// Build descriptors for the whole schema, in field-name order.
    ///
    /// Stops at the first error. Each field claims `Name` (fake struct field)
    /// and `GetName` (accessor); two fields claiming the same identifier is
    /// an error.
    pub fn build_all(&self, schema: &Schema) -> Result<GenerationPlan, GenError> {
        let mut fields = Vec::with_capacity(schema.len());
        let mut imports = BTreeSet::new();
        let mut owner: BTreeMap<String, &str> = BTreeMap::new();

        for (field_name, spec) in schema {
            let field = self.build(field_name, spec)?;

            for ident in [field.name.clone(), format!("Get{}", field.name)] {
                if let Some(prev) = owner.insert(ident.clone(), field_name.as_str()) {
                    return Err(GenError::NameCollision {
                        first: prev.to_string(),
                        second: field_name.clone(),
                        ident,
                    });
                }
            }

            tracing::debug!(
                field = %field.original_name,
                ty = %field.resolved_type,
                default = %field.default_literal,
                "built field"
            );
            imports.extend(field.imports.iter().copied());
            fields.push(field);
        }

        Ok(GenerationPlan {
            package_name: PACKAGE_NAME.to_string(),
            struct_name: STRUCT_NAME.to_string(),
            fields,
            imports,
        })
    }

    /// Type for a field without a `type` tag.
    fn infer_field_type(&self, value: &Value) -> &'static str {
        match value {
            Value::String(s) if self.synth.parses_at_startup(s, "") => GO_DURATION,
            other => infer(other),
        }
    }

    fn warn_on_duration_string(&self, field_name: &str, type_tag: Option<&str>, value: &Value) {
        let Value::String(s) = value else {
            return;
        };
        if matches!(type_tag, Some(DURATION_TAG | GO_DURATION | "string")) {
            return;
        }
        if self.synth.duration_strings == DurationStrings::Quote
            && duration::looks_like_duration(s)
        {
            tracing::warn!(
                field = field_name,
                default = %s,
                "default looks like a duration but is emitted as a string; declare `type: duration`"
            );
        }
    }
}
