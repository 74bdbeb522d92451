//! Default values as they appear in the schema.
//!
//! YAML is dynamically typed; we convert it once into a closed enum so the
//! literal synthesizer can match on every kind exhaustively.

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    /// Integers above `i64::MAX`.
    UInt(u64),
    Float(f64),
    String(String),
    List(Vec<Value>),
    /// Entries in document order.
    Map(Vec<(Value, Value)>),
}

impl Value {
    /// Short kind name for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) | Value::UInt(_) => "integer",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::List(_) => "list",
            Value::Map(_) => "map",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_empty_map(&self) -> bool {
        matches!(self, Value::Map(entries) if entries.is_empty())
    }
}

impl From<serde_yaml::Value> for Value {
    fn from(v: serde_yaml::Value) -> Self {
        use serde_yaml::Value as Yaml;

        match v {
            Yaml::Null => Value::Null,
            Yaml::Bool(b) => Value::Bool(b),
            Yaml::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Int(i)
                } else if let Some(u) = n.as_u64() {
                    Value::UInt(u)
                } else {
                    n.as_f64().map_or(Value::Null, Value::Float)
                }
            }
            Yaml::String(s) => Value::String(s),
            Yaml::Sequence(seq) => Value::List(seq.into_iter().map(Value::from).collect()),
            Yaml::Mapping(map) => Value::Map(
                map.into_iter()
                    .map(|(k, v)| (Value::from(k), Value::from(v)))
                    .collect(),
            ),
            // `!tag value`: the tag carries no meaning for defaults.
            Yaml::Tagged(tagged) => Value::from(tagged.value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn yaml(text: &str) -> Value {
        Value::from(serde_yaml::from_str::<serde_yaml::Value>(text).unwrap())
    }

    #[test]
    fn scalars() {
        assert_eq!(yaml("~"), Value::Null);
        assert_eq!(yaml("true"), Value::Bool(true));
        assert_eq!(yaml("8080"), Value::Int(8080));
        assert_eq!(yaml("-3"), Value::Int(-3));
        assert_eq!(yaml("18446744073709551615"), Value::UInt(u64::MAX));
        assert_eq!(yaml("0.25"), Value::Float(0.25));
        assert_eq!(yaml("myapp"), Value::String("myapp".to_string()));
        assert_eq!(yaml("\"42\""), Value::String("42".to_string()));
    }

    #[test]
    fn containers_keep_document_order() {
        assert_eq!(
            yaml("{b: 1, a: [x, 2]}"),
            Value::Map(vec![
                (Value::String("b".to_string()), Value::Int(1)),
                (
                    Value::String("a".to_string()),
                    Value::List(vec![Value::String("x".to_string()), Value::Int(2)])
                ),
            ])
        );
        assert!(yaml("{}").is_empty_map());
        assert!(!yaml("[]").is_empty_map());
    }

    #[test]
    fn tags_are_dropped() {
        assert_eq!(yaml("!secret hunter2"), Value::String("hunter2".to_string()));
    }
}
