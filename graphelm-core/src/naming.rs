//! Naming helpers for generated Elm code.

/// Elm reserved words that cannot be used as identifiers.
const ELM_RESERVED: &[&str] = &[
    "if", "then", "else", "case", "of", "let", "in", "type", "module", "where", "import",
    "exposing", "as", "port", "alias", "infix", "effect", "command", "subscription",
];

/// Upper-cases the first character.
#[must_use]
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Lower-cases the first character.
#[must_use]
pub fn lower_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Converts a GraphQL name into a valid Elm value identifier.
///
/// Leading underscores are dropped, the first letter is lower-cased and
/// reserved words get a trailing underscore.
#[must_use]
pub fn elm_safe_name(name: &str) -> String {
    let trimmed = name.trim_start_matches('_');
    let mut safe = lower_first(trimmed);
    if safe.is_empty() {
        safe.push('x');
    }
    if ELM_RESERVED.contains(&safe.as_str()) {
        safe.push('_');
    }
    safe
}

/// Converts a string to PascalCase.
///
/// Segments are split on `_` and `-`; an all-caps segment such as an enum
/// value `NEW_HOPE` is lower-cased before capitalizing.
#[must_use]
pub fn to_pascal_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len());

    for segment in s.split(['_', '-']).filter(|segment| !segment.is_empty()) {
        if segment.chars().any(char::is_lowercase) {
            result.push_str(&capitalize(segment));
        } else {
            result.push_str(&capitalize(&segment.to_lowercase()));
        }
    }

    result
}

/// Renders a string as a double-quoted Elm string literal.
#[must_use]
pub fn elm_string_literal(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            other => out.push(other),
        }
    }
    out.push('"');
    out
}
