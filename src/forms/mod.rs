use serde::{Deserialize, Deserializer};

pub mod auth;
pub mod categories;
pub mod products;

/// Distinguish an absent field (`None`) from an explicit `null` (`Some(None)`).
///
/// Use together with `#[serde(default)]`.
pub(crate) fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Collapse whitespace runs into single spaces and drop control characters.
pub(crate) fn sanitize_inline_text(input: &str) -> String {
    let mut sanitized = String::with_capacity(input.len());
    let mut previous_whitespace = false;

    for ch in input.trim().chars() {
        if ch.is_whitespace() {
            if !previous_whitespace {
                sanitized.push(' ');
                previous_whitespace = true;
            }
        } else if ch.is_control() {
            continue;
        } else {
            sanitized.push(ch);
            previous_whitespace = false;
        }
    }

    sanitized
}

/// Sanitize every line and squeeze blank-line runs, keeping paragraph breaks.
pub(crate) fn sanitize_multiline_text(input: &str) -> String {
    let mut result: Vec<String> = Vec::new();
    let mut previous_empty = true;

    for line in input.lines().map(sanitize_inline_text) {
        if line.is_empty() {
            if !previous_empty {
                result.push(String::new());
            }
            previous_empty = true;
        } else {
            result.push(line);
            previous_empty = false;
        }
    }

    while matches!(result.last(), Some(line) if line.is_empty()) {
        result.pop();
    }

    result.join("\n")
}

/// Trim an optional text field, treating blank input as absent.
pub(crate) fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}
