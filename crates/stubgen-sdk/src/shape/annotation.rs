//! `swagger-php` `@OA\JsonContent` / `@OA\Property` grammar.

use super::{ScalarKind, ShapeEntry, ShapeNode};
use crate::text::annotation_quoted;

const STEP: usize = 3;

/// Render a shape as an `@OA\JsonContent(...)` block.
///
/// Lines carry `indent` leading spaces for the outermost line and no docblock
/// prefix; the caller decides how to frame them.
pub fn annotation_lines(shape: &ShapeNode, indent: usize) -> Vec<String> {
    let pad = " ".repeat(indent);
    match shape {
        ShapeNode::Object(entries) if !entries.is_empty() => {
            let mut lines = vec![format!("{pad}@OA\\JsonContent(")];
            lines.extend(entry_lines(entries, indent + STEP));
            lines.push(format!("{pad})"));
            lines
        }
        ShapeNode::Each(entries) if !entries.is_empty() => {
            let inner = " ".repeat(indent + STEP);
            let mut lines = vec![
                format!("{pad}@OA\\JsonContent(type=\"array\","),
                format!("{inner}@OA\\Items("),
            ];
            lines.extend(entry_lines(entries, indent + 2 * STEP));
            lines.push(format!("{inner})"));
            lines.push(format!("{pad})"));
            lines
        }
        ShapeNode::Each(_) => vec![format!(
            "{pad}@OA\\JsonContent(type=\"array\", @OA\\Items(type=\"object\"))"
        )],
        ShapeNode::List(kind) => vec![format!(
            "{pad}@OA\\JsonContent(type=\"array\", {})",
            items_attr(*kind)
        )],
        ShapeNode::Object(_) | ShapeNode::Scalar(_) => vec![format!("{pad}@OA\\JsonContent()")],
    }
}

/// Property lines for each entry, comma-separated between entries.
fn entry_lines(entries: &[ShapeEntry], indent: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let count = entries.len();
    for (i, (key, node)) in entries.iter().enumerate() {
        let mut group = property_lines(key, node, indent);
        if i + 1 < count {
            if let Some(last) = group.last_mut() {
                last.push(',');
            }
        }
        lines.extend(group);
    }
    lines
}

fn property_lines(key: &str, node: &ShapeNode, indent: usize) -> Vec<String> {
    let pad = " ".repeat(indent);
    let open = format!("{pad}@OA\\Property(property=\"{}\"", annotation_quoted(key));

    match node {
        ShapeNode::Scalar(ScalarKind::Null) => {
            vec![format!("{open}, type=\"string\", nullable=true)")]
        }
        ShapeNode::Scalar(kind) => vec![format!("{open}, type=\"{}\")", kind.openapi_type())],
        ShapeNode::Object(entries) if entries.is_empty() => {
            vec![format!("{open}, type=\"object\")")]
        }
        ShapeNode::Object(entries) => {
            let mut lines = vec![format!("{open}, type=\"object\",")];
            lines.extend(entry_lines(entries, indent + STEP));
            lines.push(format!("{pad})"));
            lines
        }
        ShapeNode::Each(entries) if entries.is_empty() => {
            vec![format!("{open}, type=\"array\", @OA\\Items(type=\"object\"))")]
        }
        ShapeNode::Each(entries) => {
            let inner = " ".repeat(indent + STEP);
            let mut lines = vec![
                format!("{open}, type=\"array\","),
                format!("{inner}@OA\\Items("),
            ];
            lines.extend(entry_lines(entries, indent + 2 * STEP));
            lines.push(format!("{inner})"));
            lines.push(format!("{pad})"));
            lines
        }
        ShapeNode::List(kind) => {
            vec![format!("{open}, type=\"array\", {})", items_attr(*kind))]
        }
    }
}

fn items_attr(kind: Option<ScalarKind>) -> String {
    match kind {
        Some(kind) => format!("@OA\\Items(type=\"{}\")", kind.openapi_type()),
        None => "@OA\\Items()".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn render(value: serde_json::Value) -> String {
        annotation_lines(&ShapeNode::from_json(&value), 0).join("\n")
    }

    #[test]
    fn test_flat_object() {
        assert_eq!(
            render(json!({"id": 1, "name": "x", "deleted_at": null})),
            "\
@OA\\JsonContent(
   @OA\\Property(property=\"id\", type=\"integer\"),
   @OA\\Property(property=\"name\", type=\"string\"),
   @OA\\Property(property=\"deleted_at\", type=\"string\", nullable=true)
)"
        );
    }

    #[test]
    fn test_nested_object_and_wildcard() {
        let value = json!({
            "data": [{"id": 1}],
            "meta": {"total": 3, "tags": ["a"]}
        });
        assert_eq!(
            render(value),
            "\
@OA\\JsonContent(
   @OA\\Property(property=\"data\", type=\"array\",
      @OA\\Items(
         @OA\\Property(property=\"id\", type=\"integer\")
      )
   ),
   @OA\\Property(property=\"meta\", type=\"object\",
      @OA\\Property(property=\"total\", type=\"integer\"),
      @OA\\Property(property=\"tags\", type=\"array\", @OA\\Items(type=\"string\"))
   )
)"
        );
    }

    #[test]
    fn test_root_array() {
        assert_eq!(
            render(json!([{"ok": true}])),
            "\
@OA\\JsonContent(type=\"array\",
   @OA\\Items(
      @OA\\Property(property=\"ok\", type=\"boolean\")
   )
)"
        );
        assert_eq!(
            render(json!([])),
            "@OA\\JsonContent(type=\"array\", @OA\\Items())"
        );
    }

    #[test]
    fn test_indent_applies_to_every_line() {
        let lines = annotation_lines(&ShapeNode::from_json(&json!({"a": 1})), 8);
        assert_eq!(lines[0], "        @OA\\JsonContent(");
        assert_eq!(lines[1], "           @OA\\Property(property=\"a\", type=\"integer\")");
        assert_eq!(lines[2], "        )");
    }

    #[test]
    fn test_scalar_root() {
        assert_eq!(render(json!(42)), "@OA\\JsonContent()");
    }
}
