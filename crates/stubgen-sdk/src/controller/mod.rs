//! Controller source → field list extraction.
//!
//! Best-effort pattern matching over a pasted Laravel controller snippet. Nothing
//! here parses PHP; the goal is a plausible field list (name, type, required) plus
//! the route parameter and any `status`/`message` response literals.

use std::collections::HashMap;
use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

/// Inferred type of a request field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    String,
    Integer,
    Number,
    Boolean,
}

impl FieldType {
    /// OpenAPI type name.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Integer => "integer",
            FieldType::Number => "number",
            FieldType::Boolean => "boolean",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single request field recovered from the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDef {
    /// Request key as read by the controller
    pub name: String,
    /// Inferred type
    pub field_type: FieldType,
    /// Whether a `required` validation rule applies
    pub required: bool,
}

/// Everything the annotation renderer needs from a controller snippet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerDetails {
    /// Fields in order of first appearance
    pub fields: Vec<FieldDef>,
    /// Route parameter name without the leading `$` (defaults to `id`)
    pub route_param: String,
    /// First `'status' => '...'` literal
    pub status: Option<String>,
    /// First `'message' => '...'` literal
    pub message: Option<String>,
}

impl ControllerDetails {
    /// Names of the fields marked required.
    pub fn required_fields(&self) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|f| f.required)
            .map(|f| f.name.as_str())
            .collect()
    }
}

/// Error during controller extraction.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("Controller input is required.")]
    EmptyInput,
}

const DEFAULT_ROUTE_PARAM: &str = "id";

/// Rule names that mark a `'key' => '...'` entry as a validation rule.
const KNOWN_RULES: &[&str] = &[
    "accepted", "after", "alpha", "alpha_dash", "alpha_num", "array", "before", "between",
    "boolean", "bool", "confirmed", "date", "date_format", "decimal", "different", "digits",
    "digits_between", "email", "exists", "file", "filled", "gt", "gte", "image", "in",
    "integer", "int", "ip", "json", "lt", "lte", "max", "mimes", "min", "not_in", "nullable",
    "numeric", "present", "regex", "required", "required_if", "required_with", "same", "size",
    "sometimes", "string", "timezone", "unique", "url", "uuid",
];

static RULE_STRING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"'([A-Za-z_][A-Za-z0-9_.*]*)'\s*=>\s*'([^']*)'").expect("valid rule regex")
});

static RULE_ARRAY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"'([A-Za-z_][A-Za-z0-9_.*]*)'\s*=>\s*\[([^\]]*)\]").expect("valid rule regex")
});

static QUOTED: Lazy<Regex> = Lazy::new(|| Regex::new(r"'([^']*)'").expect("valid quote regex"));

static REQUEST_READ: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\$request->([A-Za-z_]\w*)(\s*\()?").expect("valid request regex")
});

static REQUEST_ACCESSOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\$request->(?:input|get|query|post|boolean|integer|string|date)\(\s*'([A-Za-z_]\w*)'",
    )
    .expect("valid accessor regex")
});

static STATUS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"'status'\s*=>\s*'(\w+)'").expect("valid status regex"));

static MESSAGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"'message'\s*=>\s*'([^']+)'").expect("valid message regex"));

static FUNCTION_SIGNATURE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"function\s+\w+\s*\(([^)]*)\)").expect("valid signature regex")
});

static PARAMETER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(?:([?\\\w]+)\s+)?&?\$(\w+)").expect("valid parameter regex")
});

static BARE_REQUEST_PARAM: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\(Request \$\w+,\s*\w+ \$(\w+)").expect("valid parameter regex")
});

static BARE_TYPED_PARAM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\((\w+) \$(\w+)").expect("valid parameter regex"));

/// Extract fields, route parameter and response literals from controller source.
pub fn extract_details(source: &str) -> Result<ControllerDetails, ExtractError> {
    let source = source.trim();
    if source.is_empty() {
        return Err(ExtractError::EmptyInput);
    }

    let rules = extract_rules(source);

    // (position, name) pairs; sorted afterwards so discovery order follows the source
    let mut seen: Vec<(usize, String)> = Vec::new();

    for caps in REQUEST_READ.captures_iter(source) {
        if caps.get(2).is_some() {
            // `$request->input(...)` and friends are method calls, not fields
            continue;
        }
        let m = &caps[0];
        let start = caps.get(0).map(|c| c.start()).unwrap_or_default();
        tracing::trace!(read = m, "request property read");
        seen.push((start, caps[1].to_string()));
    }

    for caps in REQUEST_ACCESSOR.captures_iter(source) {
        let start = caps.get(0).map(|c| c.start()).unwrap_or_default();
        seen.push((start, caps[1].to_string()));
    }

    for (name, entry) in &rules {
        if name.contains('.') || name.contains('*') {
            continue;
        }
        seen.push((entry.position, name.clone()));
    }

    seen.sort_by_key(|(pos, _)| *pos);

    let mut fields: Vec<FieldDef> = Vec::new();
    for (_, name) in seen {
        if fields.iter().any(|f| f.name == name) {
            continue;
        }
        let field_rules = rules.get(&name).map(|r| r.rules.as_slice()).unwrap_or(&[]);
        fields.push(FieldDef {
            field_type: infer_type(&name, field_rules),
            required: field_rules.iter().any(|r| r == "required"),
            name,
        });
    }

    let status = STATUS.captures(source).map(|c| c[1].to_string());
    let message = MESSAGE.captures(source).map(|c| c[1].to_string());
    let route_param = extract_route_param(source);

    tracing::debug!(
        fields = fields.len(),
        route_param = %route_param,
        "extracted controller details"
    );

    Ok(ControllerDetails {
        fields,
        route_param,
        status,
        message,
    })
}

#[derive(Debug)]
struct RuleEntry {
    position: usize,
    rules: Vec<String>,
}

/// Collect `'field' => 'a|b'` and `'field' => ['a', 'b']` validation entries.
fn extract_rules(source: &str) -> HashMap<String, RuleEntry> {
    let mut rules: HashMap<String, RuleEntry> = HashMap::new();

    let string_entries = RULE_STRING.captures_iter(source).map(|caps| {
        let position = caps.get(0).map(|c| c.start()).unwrap_or_default();
        let list: Vec<String> = caps[2].split('|').map(|r| r.trim().to_string()).collect();
        (caps[1].to_string(), position, list)
    });

    let array_entries = RULE_ARRAY.captures_iter(source).map(|caps| {
        let position = caps.get(0).map(|c| c.start()).unwrap_or_default();
        let list: Vec<String> = QUOTED
            .captures_iter(&caps[2])
            .map(|q| q[1].trim().to_string())
            .collect();
        (caps[1].to_string(), position, list)
    });

    for (name, position, list) in string_entries.chain(array_entries) {
        if !list.iter().any(|r| is_known_rule(r)) {
            continue;
        }
        rules.entry(name).or_insert(RuleEntry {
            position,
            rules: list.into_iter().map(|r| rule_name(&r).to_string()).collect(),
        });
    }

    rules
}

fn rule_name(rule: &str) -> &str {
    rule.split(':').next().unwrap_or(rule).trim()
}

fn is_known_rule(rule: &str) -> bool {
    KNOWN_RULES.contains(&rule_name(rule))
}

fn infer_type(name: &str, rules: &[String]) -> FieldType {
    let has = |r: &str| rules.iter().any(|rule| rule == r);

    if has("integer") || has("int") {
        FieldType::Integer
    } else if has("numeric") || has("decimal") {
        FieldType::Number
    } else if has("boolean") || has("bool") {
        FieldType::Boolean
    } else if name.eq_ignore_ascii_case("id") || name.to_lowercase().ends_with("_id") {
        FieldType::Integer
    } else {
        FieldType::String
    }
}

fn is_request_type(ty: &str) -> bool {
    ty.trim_start_matches('?')
        .rsplit('\\')
        .next()
        .is_some_and(|name| name.ends_with("Request"))
}

/// Route parameter: first non-request parameter of the first method that has one.
fn extract_route_param(source: &str) -> String {
    for sig in FUNCTION_SIGNATURE.captures_iter(source) {
        for param in sig[1].split(',') {
            if let Some(caps) = PARAMETER.captures(param) {
                let is_request = caps.get(1).is_some_and(|ty| is_request_type(ty.as_str()));
                if !is_request {
                    return caps[2].to_string();
                }
            }
        }
    }

    if let Some(caps) = BARE_REQUEST_PARAM.captures(source) {
        return caps[1].to_string();
    }

    BARE_TYPED_PARAM
        .captures_iter(source)
        .find(|caps| !is_request_type(&caps[1]))
        .map(|caps| caps[2].to_string())
        .unwrap_or_else(|| DEFAULT_ROUTE_PARAM.to_string())
}
