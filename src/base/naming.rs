//! Name utilities for schema identifiers.
//!
//! GraphQL names follow `[_A-Za-z][_0-9A-Za-z]*` and names beginning with `__`
//! are reserved for introspection.

/// Check if a character may continue a GraphQL name.
#[inline]
pub fn is_name_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Check if a character may start a GraphQL name.
#[inline]
pub fn is_name_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

/// Check whether `name` matches the GraphQL name grammar.
///
/// # Example
/// ```
/// use typegraph::base::is_valid_name;
///
/// assert!(is_valid_name("createdAt"));
/// assert!(is_valid_name("_internal"));
/// assert!(!is_valid_name("2fa"));
/// assert!(!is_valid_name("first-name"));
/// ```
pub fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if is_name_start(first) => chars.all(is_name_continue),
        _ => false,
    }
}

/// Names starting with a double underscore are reserved for introspection.
pub fn is_reserved_name(name: &str) -> bool {
    name.starts_with("__")
}

/// Convert a field path segment to PascalCase.
///
/// Separators (`-`, `_`, spaces, dots) split words; existing humps are kept.
///
/// # Example
/// ```
/// use typegraph::base::to_pascal_case;
///
/// assert_eq!(to_pascal_case("profile"), "Profile");
/// assert_eq!(to_pascal_case("createUser"), "CreateUser");
/// assert_eq!(to_pascal_case("shipping_address"), "ShippingAddress");
/// ```
pub fn to_pascal_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for word in input.split(|c: char| !c.is_alphanumeric()) {
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
        }
    }
    out
}

/// Join path segments into a single PascalCase name.
pub fn pascal_path<S: AsRef<str>>(segments: &[S]) -> String {
    segments
        .iter()
        .map(|s| to_pascal_case(s.as_ref()))
        .collect()
}

/// Convert a name or value to the conventional enum value form (`SCREAMING_SNAKE`).
///
/// Word boundaries are separators, lower→upper transitions, digit→upper
/// transitions and the last capital of an acronym (`HTTPServer` → `HTTP_SERVER`).
/// Leading underscores are preserved so reserved names stay detectable.
///
/// # Example
/// ```
/// use typegraph::base::to_constant_case;
///
/// assert_eq!(to_constant_case("inProgress"), "IN_PROGRESS");
/// assert_eq!(to_constant_case("in-progress"), "IN_PROGRESS");
/// assert_eq!(to_constant_case("ACTIVE"), "ACTIVE");
/// ```
pub fn to_constant_case(input: &str) -> String {
    let body = input.trim_start_matches('_');
    let leading = input.len() - body.len();
    let mut out = "_".repeat(leading);
    let chars: Vec<char> = body.chars().collect();
    let mut pending_sep = false;
    let mut emitted = false;

    for (i, &c) in chars.iter().enumerate() {
        if !c.is_alphanumeric() {
            pending_sep = true;
            continue;
        }
        if i > 0 && c.is_uppercase() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if prev.is_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_uppercase() && next_is_lower)
            {
                pending_sep = true;
            }
        }
        if pending_sep && emitted {
            out.push('_');
        }
        pending_sep = false;
        out.extend(c.to_uppercase());
        emitted = true;
    }

    out
}

/// Lowercase the first character (`QueryResolver` → `queryResolver`).
pub fn lower_first(input: &str) -> String {
    let mut chars = input.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("active", "ACTIVE")]
    #[case("Active", "ACTIVE")]
    #[case("inProgress", "IN_PROGRESS")]
    #[case("in-progress", "IN_PROGRESS")]
    #[case("in progress", "IN_PROGRESS")]
    #[case("already_snake", "ALREADY_SNAKE")]
    #[case("HTTPServer", "HTTP_SERVER")]
    #[case("v2Beta", "V2_BETA")]
    #[case("__hidden", "__HIDDEN")]
    #[case("123abc", "123ABC")]
    fn test_constant_case(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(to_constant_case(input), expected);
    }

    #[rstest]
    #[case("User", true)]
    #[case("_private", true)]
    #[case("field_2", true)]
    #[case("", false)]
    #[case("2fast", false)]
    #[case("first-name", false)]
    #[case("café", false)]
    fn test_valid_name(#[case] name: &str, #[case] valid: bool) {
        assert_eq!(is_valid_name(name), valid);
    }

    #[test]
    fn test_reserved() {
        assert!(is_reserved_name("__typename"));
        assert!(!is_reserved_name("_id"));
    }

    #[test]
    fn test_pascal_path() {
        assert_eq!(pascal_path(&["profile", "details"]), "ProfileDetails");
        assert_eq!(pascal_path::<&str>(&[]), "");
    }

    #[test]
    fn test_lower_first() {
        assert_eq!(lower_first("QueryResolver"), "queryResolver");
        assert_eq!(lower_first(""), "");
    }
}
