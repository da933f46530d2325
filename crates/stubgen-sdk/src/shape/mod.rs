//! JSON value → shape descriptor, and the two grammars it renders into.
//!
//! A shape keeps keys and nesting but drops values. Arrays are described by their
//! first element only: an array of objects becomes a wildcard (`*`) entry, anything
//! else collapses to a flat list marker.
//!
//! ```text
//! {"data": [{"id": 1}], "meta": {"total": 3}}
//!     ├── assert_json_structure  →  ['data' => ['*' => ['id']], 'meta' => ['total']]
//!     └── annotation_lines       →  @OA\JsonContent(@OA\Property(property="data", type="array", ...))
//! ```

mod annotation;
mod assertion;

pub use annotation::annotation_lines;
pub use assertion::assert_json_structure;

use serde_json::Value;

/// Kind of a scalar JSON value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarKind {
    String,
    Integer,
    Number,
    Boolean,
    Null,
}

impl ScalarKind {
    fn of(value: &Value) -> Option<Self> {
        match value {
            Value::String(_) => Some(ScalarKind::String),
            Value::Number(n) if n.is_i64() || n.is_u64() => Some(ScalarKind::Integer),
            Value::Number(_) => Some(ScalarKind::Number),
            Value::Bool(_) => Some(ScalarKind::Boolean),
            Value::Null => Some(ScalarKind::Null),
            Value::Array(_) | Value::Object(_) => None,
        }
    }

    /// OpenAPI type name (`null` is reported as a nullable string).
    pub fn openapi_type(&self) -> &'static str {
        match self {
            ScalarKind::String | ScalarKind::Null => "string",
            ScalarKind::Integer => "integer",
            ScalarKind::Number => "number",
            ScalarKind::Boolean => "boolean",
        }
    }
}

/// A single keyed entry of an object shape.
pub type ShapeEntry = (String, ShapeNode);

/// Shape descriptor for a JSON value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShapeNode {
    /// Any non-container value
    Scalar(ScalarKind),
    /// Object keys in document order
    Object(Vec<ShapeEntry>),
    /// Array whose first element is an object; fields of that element
    Each(Vec<ShapeEntry>),
    /// Empty array, array of scalars (kind of the first one), or array of arrays
    List(Option<ScalarKind>),
}

impl ShapeNode {
    /// Build the shape of a JSON value.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Object(map) => ShapeNode::Object(object_entries(map)),
            Value::Array(items) => match items.first() {
                Some(Value::Object(first)) => ShapeNode::Each(object_entries(first)),
                Some(first) => ShapeNode::List(ScalarKind::of(first)),
                None => ShapeNode::List(None),
            },
            scalar => ShapeNode::Scalar(ScalarKind::of(scalar).unwrap_or(ScalarKind::Null)),
        }
    }

    /// Whether this node has no keys to describe.
    pub fn is_empty(&self) -> bool {
        match self {
            ShapeNode::Object(entries) | ShapeNode::Each(entries) => entries.is_empty(),
            ShapeNode::Scalar(_) | ShapeNode::List(_) => true,
        }
    }
}

fn object_entries(map: &serde_json::Map<String, Value>) -> Vec<ShapeEntry> {
    map.iter()
        .map(|(key, value)| (key.clone(), ShapeNode::from_json(value)))
        .collect()
}
