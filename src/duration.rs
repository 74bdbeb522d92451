//! Duration defaults.
//!
//! Schema authors may write `7d` or `2w`; Go's `time.ParseDuration` only
//! knows `ns`, `us`, `ms`, `s`, `m` and `h`. `normalize` rewrites the
//! extended units to hours and `parse_native` then follows Go's parser so
//! the generated constant matches what the Go runtime would compute.

use crate::error::DurationError;

const NANOSECOND: u64 = 1;
const MICROSECOND: u64 = 1_000 * NANOSECOND;
const MILLISECOND: u64 = 1_000 * MICROSECOND;
const SECOND: u64 = 1_000 * MILLISECOND;
const MINUTE: u64 = 60 * SECOND;
const HOUR: u64 = 60 * MINUTE;

/// Largest magnitude a Go `time.Duration` can hold (as an unsigned value).
const LIMIT: u64 = 1 << 63;

/// Rewrite `d`/`w` suffixes into hours; pass native suffixes through.
///
/// Examples:
/// - `"1d"` => `"24h"`
/// - `"2w"` => `"336h"`
/// - `"250ms"` => `"250ms"`
pub fn normalize(raw: &str) -> Result<String, DurationError> {
    let s = raw.trim();

    if let Some(num) = s.strip_suffix('d') {
        return Ok(format!("{}h", scale_extended(s, num, 24)?));
    }
    if let Some(num) = s.strip_suffix('w') {
        return Ok(format!("{}h", scale_extended(s, num, 24 * 7)?));
    }

    // "ms", "ns" and "us" all end in 's'.
    if s.ends_with('s') || s.ends_with('m') || s.ends_with('h') {
        return Ok(s.to_string());
    }

    Err(DurationError::UnsupportedSuffix {
        input: s.to_string(),
    })
}

fn scale_extended(input: &str, num: &str, hours: i64) -> Result<i64, DurationError> {
    let n: i64 = num.parse().map_err(|e: std::num::ParseIntError| {
        DurationError::InvalidMagnitude {
            input: input.to_string(),
            reason: e.to_string(),
        }
    })?;
    n.checked_mul(hours)
        .ok_or_else(|| DurationError::InvalidMagnitude {
            input: input.to_string(),
            reason: "value out of range".to_string(),
        })
}

/// Normalize, then parse to nanoseconds.
pub fn resolve(raw: &str) -> Result<i64, DurationError> {
    parse_native(&normalize(raw)?)
}

/// True if `s` is accepted by Go's `time.ParseDuration` as written.
pub fn looks_like_duration(s: &str) -> bool {
    parse_native(s).is_ok()
}

/// Parse a Go duration string (`[-+]?([0-9]*(\.[0-9]*)?[a-zµμ]+)+`) into
/// nanoseconds.
pub fn parse_native(input: &str) -> Result<i64, DurationError> {
    let invalid = |reason: &str| DurationError::Invalid {
        input: input.to_string(),
        reason: reason.to_string(),
    };

    let mut s = input;
    let mut neg = false;
    if let Some(rest) = s.strip_prefix('-') {
        neg = true;
        s = rest;
    } else if let Some(rest) = s.strip_prefix('+') {
        s = rest;
    }

    if s == "0" {
        return Ok(0);
    }
    if s.is_empty() {
        return Err(invalid("empty duration"));
    }

    let mut total: u64 = 0;
    while !s.is_empty() {
        let first = s.as_bytes()[0];
        if !(first == b'.' || first.is_ascii_digit()) {
            return Err(invalid("expected a number"));
        }

        let before = s.len();
        let (whole, rest) = leading_int(s).ok_or_else(|| invalid("number out of range"))?;
        s = rest;
        let pre = before != s.len();

        let mut frac = 0u64;
        let mut scale = 1f64;
        let mut post = false;
        if let Some(rest) = s.strip_prefix('.') {
            let before = rest.len();
            let (f, sc, rest) = leading_fraction(rest);
            frac = f;
            scale = sc;
            s = rest;
            post = before != s.len();
        }
        if !pre && !post {
            return Err(invalid("expected digits around '.'"));
        }

        let unit_len = s
            .bytes()
            .position(|c| c == b'.' || c.is_ascii_digit())
            .unwrap_or(s.len());
        if unit_len == 0 {
            return Err(invalid("missing unit"));
        }
        let (unit_str, rest) = s.split_at(unit_len);
        s = rest;

        let unit = unit_nanos(unit_str)
            .ok_or_else(|| invalid(&format!("unknown unit {:?}", unit_str)))?;

        if whole > LIMIT / unit {
            return Err(invalid("overflow"));
        }
        let mut v = whole * unit;
        if frac > 0 {
            v += (frac as f64 * (unit as f64 / scale)) as u64;
            if v > LIMIT {
                return Err(invalid("overflow"));
            }
        }
        total = match total.checked_add(v) {
            Some(t) if t <= LIMIT => t,
            _ => return Err(invalid("overflow")),
        };
    }

    if neg {
        // -(1 << 63) is representable.
        return Ok((total as i64).wrapping_neg());
    }
    if total > LIMIT - 1 {
        return Err(invalid("overflow"));
    }
    Ok(total as i64)
}

fn unit_nanos(unit: &str) -> Option<u64> {
    match unit {
        "ns" => Some(NANOSECOND),
        "us" | "µs" | "μs" => Some(MICROSECOND),
        "ms" => Some(MILLISECOND),
        "s" => Some(SECOND),
        "m" => Some(MINUTE),
        "h" => Some(HOUR),
        _ => None,
    }
}

/// Consume leading ASCII digits. None on overflow.
fn leading_int(s: &str) -> Option<(u64, &str)> {
    let mut x: u64 = 0;
    let mut i = 0;
    for &c in s.as_bytes() {
        if !c.is_ascii_digit() {
            break;
        }
        if x > LIMIT / 10 {
            return None;
        }
        x = x * 10 + u64::from(c - b'0');
        if x > LIMIT {
            return None;
        }
        i += 1;
    }
    Some((x, &s[i..]))
}

/// Consume the digits after a '.'. Digits past the precision limit are
/// skipped but still consumed.
fn leading_fraction(s: &str) -> (u64, f64, &str) {
    let mut x: u64 = 0;
    let mut scale = 1f64;
    let mut overflow = false;
    let mut i = 0;
    for &c in s.as_bytes() {
        if !c.is_ascii_digit() {
            break;
        }
        i += 1;
        if overflow {
            continue;
        }
        if x > LIMIT / 10 {
            overflow = true;
            continue;
        }
        let y = x * 10 + u64::from(c - b'0');
        if y > LIMIT {
            overflow = true;
            continue;
        }
        x = y;
        scale *= 10.0;
    }
    (x, scale, &s[i..])
}
