use crate::schema::Value;

/// Go type for values whose kind is not known statically.
pub const ANY: &str = "any";
pub const GO_STRING: &str = "string";
/// Generic list type; element literals may be of any kind.
pub const ANY_LIST: &str = "[]any";
/// Generic map type; keys must be strings, values may be of any kind.
pub const ANY_MAP: &str = "map[string]any";

/// Canonical Go type name for a dynamic value.
pub fn infer(value: &Value) -> &'static str {
    match value {
        Value::String(_) => GO_STRING,
        Value::Int(_) => "int",
        // Does not fit Go's int.
        Value::UInt(_) => "uint64",
        Value::Float(_) => "float64",
        Value::Bool(_) => "bool",
        Value::Map(_) => ANY_MAP,
        Value::List(_) => ANY_LIST,
        Value::Null => ANY,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn infers_every_kind() {
        assert_eq!(infer(&Value::String("x".into())), "string");
        assert_eq!(infer(&Value::Int(1)), "int");
        assert_eq!(infer(&Value::UInt(u64::MAX)), "uint64");
        assert_eq!(infer(&Value::Float(0.5)), "float64");
        assert_eq!(infer(&Value::Bool(false)), "bool");
        assert_eq!(infer(&Value::Map(vec![])), "map[string]any");
        assert_eq!(infer(&Value::List(vec![Value::Int(1)])), "[]any");
        assert_eq!(infer(&Value::Null), "any");
    }
}
