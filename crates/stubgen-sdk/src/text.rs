//! Small string helpers shared by the renderers.

/// Uppercase the first character and lowercase the rest (`"first NAME"` → `"First name"`).
pub(crate) fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Human-readable label for a field name (`"first_name"` → `"First name"`).
pub(crate) fn humanize(field: &str) -> String {
    capitalize(&field.replace('_', " "))
}

/// Escape a value for use inside a single-quoted PHP string literal.
pub(crate) fn php_single_quoted(s: &str) -> String {
    s.replace('\\', "\\\\").replace('\'', "\\'")
}

/// Escape a value for use inside a double-quoted annotation attribute.
pub(crate) fn annotation_quoted(s: &str) -> String {
    s.replace('"', "\"\"")
}

/// Prefix every non-empty line with `width` spaces.
pub(crate) fn indent_block(text: &str, width: usize) -> String {
    let pad = " ".repeat(width);
    text.lines()
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("{pad}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
