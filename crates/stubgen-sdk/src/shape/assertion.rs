//! Laravel `assertJsonStructure([...])` grammar.

use super::{ShapeEntry, ShapeNode};
use crate::text::php_single_quoted;

const INDENT: &str = "    ";

/// Render a shape as the array argument of `assertJsonStructure`.
///
/// `base_indent` is the nesting level (four spaces each) of the line the array
/// opens on; the opening `[` itself is not indented so the result can follow
/// `assertJsonStructure(` directly.
pub fn assert_json_structure(shape: &ShapeNode, base_indent: usize) -> String {
    match shape {
        ShapeNode::Object(entries) => render_object(entries, base_indent),
        ShapeNode::Each(entries) => render_wildcard(entries, base_indent),
        ShapeNode::Scalar(_) | ShapeNode::List(_) => "[]".to_string(),
    }
}

fn pad(level: usize) -> String {
    INDENT.repeat(level)
}

fn render_object(entries: &[ShapeEntry], level: usize) -> String {
    if entries.is_empty() {
        return "[]".to_string();
    }
    let items: Vec<String> = entries
        .iter()
        .map(|(key, node)| format!("{}{}", pad(level + 1), render_entry(key, node, level + 1)))
        .collect();
    format!("[\n{}\n{}]", items.join(",\n"), pad(level))
}

fn render_wildcard(entries: &[ShapeEntry], level: usize) -> String {
    format!(
        "[\n{}'*' => {}\n{}]",
        pad(level + 1),
        render_object(entries, level + 1),
        pad(level)
    )
}

fn render_entry(key: &str, node: &ShapeNode, level: usize) -> String {
    let key = format!("'{}'", php_single_quoted(key));
    match node {
        ShapeNode::Scalar(_) => key,
        ShapeNode::Object(entries) => format!("{key} => {}", render_object(entries, level)),
        ShapeNode::Each(entries) => format!("{key} => {}", render_wildcard(entries, level)),
        ShapeNode::List(_) => format!("{key} => ['*']"),
    }
}
