//! Recursive default-value -> Go literal conversion.
//!
//! The declared type steers a few things:
//! - `duration` and `time.Duration` string defaults become a nanosecond
//!   constant.
//! - Generic container types (`[]any`, `map[string]any`) are kept so nested
//!   literals stay assignable. Non-string keys of a `map[string]any` are
//!   written as strings.
//! - Empty containers take the declared container type.
//!
//! Everything else is inferred from the value itself.

use crate::duration;
use crate::error::DurationError;
use crate::literal::infer::{ANY, ANY_LIST, ANY_MAP, GO_STRING};
use crate::literal::{DURATION_TAG, GO_DURATION, Literal, go_quote, infer};
use crate::schema::Value;
use std::cmp::Ordering;

/// What to do with string defaults that happen to parse as Go durations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DurationStrings {
    /// Keep them as plain string literals.
    #[default]
    Quote,
    /// Unless the field is declared `string`, parse them with
    /// `time.ParseDuration` when the generated config is constructed.
    ParseAtStartup,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Synthesizer {
    pub duration_strings: DurationStrings,
}

impl Synthesizer {
    pub fn new(duration_strings: DurationStrings) -> Self {
        Self { duration_strings }
    }

    /// True if a string default should be turned into a runtime-parsed
    /// `time.Duration` rather than quoted.
    pub fn parses_at_startup(&self, s: &str, declared: &str) -> bool {
        self.duration_strings == DurationStrings::ParseAtStartup
            && declared != GO_STRING
            && duration::looks_like_duration(s)
    }

    /// Build a Go expression for `value` whose type matches `declared`.
    pub fn synthesize(&self, value: &Value, declared: &str) -> Result<Literal, DurationError> {
        if declared == DURATION_TAG {
            return duration_constant(value);
        }

        match value {
            Value::String(s) => self.string(s, declared),
            Value::Int(i) => Ok(Literal::plain(i.to_string())),
            Value::UInt(u) => Ok(Literal::plain(u.to_string())),
            Value::Bool(b) => Ok(Literal::plain(b.to_string())),
            Value::Float(f) => Ok(float_literal(*f)),
            Value::List(items) => self.list(items, declared),
            Value::Map(entries) => self.map(entries, declared),
            Value::Null => Ok(null_literal(declared)),
        }
    }

    fn string(&self, s: &str, declared: &str) -> Result<Literal, DurationError> {
        if self.parses_at_startup(s, declared) {
            return Ok(Literal::importing(
                format!(
                    "func() {} {{ d, _ := time.ParseDuration({}); return d }}()",
                    GO_DURATION,
                    go_quote(s)
                ),
                "time",
            ));
        }
        if declared == GO_DURATION {
            return duration_nanos(s);
        }
        Ok(Literal::plain(go_quote(s)))
    }

    fn list(&self, items: &[Value], declared: &str) -> Result<Literal, DurationError> {
        let Some(first) = items.first() else {
            let ty = if declared.starts_with("[]") { declared } else { ANY_LIST };
            return Ok(Literal::plain(format!("{}{{}}", ty)));
        };

        let elem_type = if declared == ANY_LIST { ANY } else { infer(first) };
        if elem_type != ANY && items.iter().any(|v| infer(v) != elem_type) {
            tracing::warn!(
                elem_type,
                "list default mixes element kinds; element type taken from the first element"
            );
        }

        let mut out = Literal::plain(String::new());
        let mut elems = Vec::with_capacity(items.len());
        for item in items {
            let lit = self.synthesize(item, infer(item))?;
            out.imports.extend(lit.imports);
            elems.push(lit.expr);
        }

        out.expr = format!("[]{}{{{}}}", elem_type, elems.join(", "));
        Ok(out)
    }

    fn map(&self, entries: &[(Value, Value)], declared: &str) -> Result<Literal, DurationError> {
        if entries.is_empty() {
            let ty = if declared.starts_with("map[") { declared } else { ANY_MAP };
            return Ok(Literal::plain(format!("{}{{}}", ty)));
        }

        let string_keys = entries.iter().all(|(k, _)| matches!(k, Value::String(_)));
        let generic = declared == ANY_MAP;

        // {"a": {}, "b": {}} is a set of strings.
        if string_keys && entries.iter().all(|(_, v)| v.is_empty_map()) {
            let mut keys: Vec<&str> = entries.iter().filter_map(|(k, _)| k.as_str()).collect();
            keys.sort_unstable();
            let items: Vec<String> = keys
                .iter()
                .map(|k| format!("{}: struct{{}}{{}}", go_quote(k)))
                .collect();
            let ty = if generic { ANY_MAP } else { "map[string]struct{}" };
            return Ok(Literal::plain(format!("{}{{{}}}", ty, items.join(", "))));
        }

        let mut out = Literal::plain(String::new());
        let mut rendered = Vec::with_capacity(entries.len());
        for (k, v) in entries {
            let key = self.synthesize(k, infer(k))?;
            let expr = match k {
                Value::String(_) => key.expr,
                // map[string]any keys: 1 -> "1".
                _ if generic => go_quote(&key.expr),
                _ => {
                    out.imports.extend(key.imports);
                    key.expr
                }
            };
            rendered.push((k, expr, v));
        }
        if generic {
            rendered.sort_by(|a, b| a.1.cmp(&b.1));
        } else {
            rendered.sort_by(|a, b| key_order(a.0, b.0).then_with(|| a.1.cmp(&b.1)));
        }
        let before = rendered.len();
        rendered.dedup_by(|later, first| later.1 == first.1);
        if rendered.len() != before {
            tracing::warn!(
                dropped = before - rendered.len(),
                "map default has keys that render identically; keeping the first"
            );
        }

        // Deterministic pick: types come from the smallest key and its value.
        let (key_type, value_type) = if generic {
            (GO_STRING, ANY)
        } else {
            let (k0, _, v0) = &rendered[0];
            (infer(k0), infer(v0))
        };
        if !generic
            && rendered
                .iter()
                .any(|(k, _, v)| infer(k) != key_type || infer(v) != value_type)
        {
            tracing::warn!(
                key_type,
                value_type,
                "map default mixes key or value kinds; types taken from the smallest key"
            );
        }

        let mut items = Vec::with_capacity(rendered.len());
        for (_, key, v) in &rendered {
            let val = self.synthesize(v, infer(v))?;
            out.imports.extend(val.imports);
            items.push(format!("{}: {}", key, val.expr));
        }

        out.expr = format!("map[{}]{}{{{}}}", key_type, value_type, items.join(", "));
        Ok(out)
    }
}

/// `duration` fields: resolve at generation time, emit nanoseconds.
fn duration_constant(value: &Value) -> Result<Literal, DurationError> {
    let raw = value.as_str().ok_or(DurationError::NotAString {
        found: value.kind(),
    })?;
    duration_nanos(raw)
}

fn duration_nanos(raw: &str) -> Result<Literal, DurationError> {
    let nanos = duration::resolve(raw)?;
    Ok(Literal::importing(format!("{} * time.Nanosecond", nanos), "time"))
}

fn float_literal(f: f64) -> Literal {
    if f.is_nan() {
        Literal::importing("math.NaN()", "math")
    } else if f.is_infinite() {
        let sign = if f > 0.0 { 1 } else { -1 };
        Literal::importing(format!("math.Inf({})", sign), "math")
    } else if f == 0.0 && f.is_sign_negative() {
        // Go folds the constant -0.0 to +0.
        Literal::importing("math.Copysign(0, -1)", "math")
    } else {
        // Debug keeps a '.' or exponent, so Go sees a float constant.
        Literal::plain(format!("{:?}", f))
    }
}

/// No Go literal exists for a schema null; fall back to the zero value.
fn null_literal(declared: &str) -> Literal {
    tracing::warn!(declared, "null default has no typed literal; using the zero value");
    if declared.is_empty() || declared == ANY {
        Literal::plain("nil")
    } else {
        Literal::plain(format!("*new({})", declared))
    }
}

fn kind_rank(v: &Value) -> u8 {
    match v {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Int(_) | Value::UInt(_) => 2,
        Value::Float(_) => 3,
        Value::String(_) => 4,
        Value::List(_) => 5,
        Value::Map(_) => 6,
    }
}

/// Order map keys by kind, then by value. Containers compare equal here and
/// fall back to their literal text.
fn key_order(a: &Value, b: &Value) -> Ordering {
    let wide = |v: &Value| match v {
        Value::Int(i) => i128::from(*i),
        Value::UInt(u) => i128::from(*u),
        _ => 0,
    };

    kind_rank(a).cmp(&kind_rank(b)).then_with(|| match (a, b) {
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Float(x), Value::Float(y)) => x.total_cmp(y),
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Int(_) | Value::UInt(_), Value::Int(_) | Value::UInt(_)) => wide(a).cmp(&wide(b)),
        _ => Ordering::Equal,
    })
}
