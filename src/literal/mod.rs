//! Go literal synthesis for schema defaults.
//!
//! - `infer`: dynamic value -> Go type name
//! - `synth`: (value, declared type) -> Go expression

pub mod infer;
pub mod synth;

pub use infer::infer;
pub use synth::{DurationStrings, Synthesizer};

use std::collections::BTreeSet;

/// Schema tag for duration fields.
pub const DURATION_TAG: &str = "duration";
/// Go type that `duration` fields resolve to.
pub const GO_DURATION: &str = "time.Duration";

/// A Go expression plus the standard packages it references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Literal {
    pub expr: String,
    pub imports: BTreeSet<&'static str>,
}

impl Literal {
    pub fn plain(expr: impl Into<String>) -> Self {
        Self {
            expr: expr.into(),
            imports: BTreeSet::new(),
        }
    }

    pub fn importing(expr: impl Into<String>, package: &'static str) -> Self {
        Self {
            expr: expr.into(),
            imports: BTreeSet::from([package]),
        }
    }
}

/// Quote a string the way Go's `%q` does.
pub fn go_quote(s: &str) -> String {
    use std::fmt::Write;

    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\u{7}' => out.push_str("\\a"),
            '\u{8}' => out.push_str("\\b"),
            '\u{c}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{b}' => out.push_str("\\v"),
            c if c.is_control() || !is_printable(c) => {
                let cp = c as u32;
                // Writing to a String cannot fail.
                let _ = if cp < 0x80 {
                    write!(out, "\\x{:02x}", cp)
                } else if cp < 0x1_0000 {
                    write!(out, "\\u{:04x}", cp)
                } else {
                    write!(out, "\\U{:08x}", cp)
                };
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Format (Cf), separator (Z*, except ' ') and private-use (Co) code points.
/// Go's `%q` escapes these; some, like a stray U+FEFF, are also rejected by
/// the Go compiler.
const NON_PRINTABLE: &[(u32, u32)] = &[
    (0x00a0, 0x00a0),
    (0x00ad, 0x00ad),
    (0x0600, 0x0605),
    (0x061c, 0x061c),
    (0x06dd, 0x06dd),
    (0x070f, 0x070f),
    (0x0890, 0x0891),
    (0x08e2, 0x08e2),
    (0x1680, 0x1680),
    (0x180e, 0x180e),
    (0x2000, 0x200f),
    (0x2028, 0x202f),
    (0x205f, 0x2064),
    (0x2066, 0x206f),
    (0x3000, 0x3000),
    (0xe000, 0xf8ff),
    (0xfeff, 0xfeff),
    (0xfff9, 0xfffb),
    (0x110bd, 0x110bd),
    (0x110cd, 0x110cd),
    (0x13430, 0x1343f),
    (0x1bca0, 0x1bca3),
    (0x1d173, 0x1d17a),
    (0xe0001, 0xe0001),
    (0xe0020, 0xe007f),
    (0xf0000, 0x10ffff),
];

fn is_printable(c: char) -> bool {
    let cp = c as u32;
    !NON_PRINTABLE.iter().any(|&(lo, hi)| (lo..=hi).contains(&cp))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn quotes_like_go() {
        assert_eq!(go_quote("myapp"), r#""myapp""#);
        assert_eq!(go_quote(r#"say "hi""#), r#""say \"hi\"""#);
        assert_eq!(go_quote("a\\b"), r#""a\\b""#);
        assert_eq!(go_quote("line\nnext\t!"), r#""line\nnext\t!""#);
        assert_eq!(go_quote("\u{1}\u{7f}"), r#""\x01\x7f""#);
        assert_eq!(go_quote("\u{85}"), r#""\u0085""#);
        assert_eq!(go_quote("Пороговые"), "\"Пороговые\"");
    }

    #[test]
    fn escapes_invisible_code_points() {
        assert_eq!(go_quote("a\u{feff}b"), r#""a\ufeffb""#);
        assert_eq!(go_quote("\u{2028}\u{2029}"), r#""\u2028\u2029""#);
        assert_eq!(go_quote("no\u{a0}break"), r#""no\u00a0break""#);
        assert_eq!(go_quote("zw\u{200b}j"), r#""zw\u200bj""#);
        assert_eq!(go_quote("\u{e0041}"), r#""\U000e0041""#);
        assert_eq!(go_quote("snow ☃ 😀"), "\"snow ☃ 😀\"");
    }
}
