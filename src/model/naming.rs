//! Go identifiers derived from snake_case field names.

/// `auth_required_methods` => `AuthRequiredMethods`.
///
/// Only the first character of each segment changes case; the rest is kept
/// as written (`http_URL` => `HttpURL`).
pub fn to_camel(input: &str) -> String {
    input.split('_').map(capitalize).collect()
}

/// `auth_required_methods` => `authRequiredMethods`.
pub fn to_lower_camel(input: &str) -> String {
    let camel = to_camel(input);
    let mut chars = camel.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => camel,
    }
}

fn capitalize(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn camel_case() {
        assert_eq!(to_camel("auth_required_methods"), "AuthRequiredMethods");
        assert_eq!(to_camel("app_name"), "AppName");
        assert_eq!(to_camel("port"), "Port");
        assert_eq!(to_camel("http_URL"), "HttpURL");
        assert_eq!(to_camel("a__b"), "AB");
        assert_eq!(to_camel("ёлка"), "Ёлка");
        assert_eq!(to_camel(""), "");
    }

    #[test]
    fn lower_camel_case() {
        assert_eq!(to_lower_camel("auth_required_methods"), "authRequiredMethods");
        assert_eq!(to_lower_camel("Port"), "port");
        assert_eq!(to_lower_camel(""), "");
    }
}
