//! `swagger-php` annotation blocks from extracted controller details.
//!
//! Converts [`ControllerDetails`] plus a handful of user choices (module, tag,
//! route prefix, operation kind) into the `/** @OA\... */` docblock that sits
//! above the controller method.

use std::fmt;
use std::str::FromStr;

use heck::{ToKebabCase, ToSnakeCase, ToTitleCase};
use serde::{Deserialize, Serialize};

use crate::controller::{ControllerDetails, FieldDef, FieldType};
use crate::shape::{annotation_lines, ShapeNode};
use crate::template_engine::{EngineError, TemplateEngine, SWAGGER_TEMPLATE};
use crate::text::{annotation_quoted, capitalize, humanize};

const DEFAULT_MODULE: &str = "Example";
const SECURITY: &str = r#"{{"token": {}}}"#;
const CONTENT_INDENT: usize = 8;

/// The controller action an annotation block documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    Store,
    Update,
    Index,
    Show,
    Delete,
}

impl OperationKind {
    /// Every operation kind, in menu order.
    pub const ALL: [OperationKind; 5] = [
        OperationKind::Store,
        OperationKind::Update,
        OperationKind::Index,
        OperationKind::Show,
        OperationKind::Delete,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::Store => "store",
            OperationKind::Update => "update",
            OperationKind::Index => "index",
            OperationKind::Show => "show",
            OperationKind::Delete => "delete",
        }
    }

    /// `swagger-php` annotation class for the HTTP verb.
    fn annotation_method(&self) -> &'static str {
        match self {
            OperationKind::Store | OperationKind::Update => "Post",
            OperationKind::Index | OperationKind::Show => "Get",
            OperationKind::Delete => "Delete",
        }
    }

    fn targets_resource(&self) -> bool {
        matches!(
            self,
            OperationKind::Update | OperationKind::Show | OperationKind::Delete
        )
    }

    fn has_request_body(&self) -> bool {
        matches!(self, OperationKind::Store | OperationKind::Update)
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrecognized operation name.
#[derive(Debug, thiserror::Error)]
#[error("Unknown operation '{0}'. Valid values: store, update, index, show, delete")]
pub struct UnknownOperation(pub String);

impl FromStr for OperationKind {
    type Err = UnknownOperation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "store" => Ok(OperationKind::Store),
            "update" => Ok(OperationKind::Update),
            "index" => Ok(OperationKind::Index),
            "show" => Ok(OperationKind::Show),
            "delete" | "destroy" => Ok(OperationKind::Delete),
            _ => Err(UnknownOperation(s.to_string())),
        }
    }
}

/// User choices that shape the annotation block.
#[derive(Debug, Clone)]
pub struct SwaggerRequest {
    /// Resource name (e.g. `products`); blank falls back to `Example`
    pub module_name: String,
    /// Route prefix the resource path hangs off (e.g. `/api/v1/backoffice`)
    pub route_prefix: String,
    /// Tag type appended to the module in `tags={...}`
    pub tag: String,
    pub operation: OperationKind,
    /// Shape of a sample success response, replacing the placeholder `data` property
    pub response_shape: Option<ShapeNode>,
}

/// Fixed response wording, overridable from config.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", default)]
pub struct ResponseText {
    pub unauthenticated_message: String,
    pub not_found_description: String,
    pub not_found_message: String,
    pub deleted_status: String,
    pub deleted_message: String,
}

impl Default for ResponseText {
    fn default() -> Self {
        Self {
            unauthenticated_message: "Unauthenticated".to_string(),
            not_found_description: "Error recurso no encontrado".to_string(),
            not_found_message: "Recurso no encontrado".to_string(),
            deleted_status: "successful".to_string(),
            deleted_message: "Recurso borrado".to_string(),
        }
    }
}

// =========================================================================
// Template context
// =========================================================================

#[derive(Debug, Serialize)]
struct SwaggerContext {
    method: &'static str,
    tag: String,
    path: String,
    description: String,
    security: &'static str,
    operation_id: String,
    path_parameter: Option<PathParameter>,
    query_parameters: Vec<PropertyContext>,
    request_body: Option<RequestBody>,
    success: SuccessResponse,
    unauthenticated_message: String,
    not_found: Option<NotFound>,
}

#[derive(Debug, Serialize)]
struct PathParameter {
    name: String,
    action: &'static str,
}

#[derive(Debug, Serialize)]
struct PropertyContext {
    name: String,
    schema_type: &'static str,
    description: String,
    example: String,
}

#[derive(Debug, Serialize)]
struct RequestBody {
    required: String,
    properties: Vec<PropertyContext>,
}

#[derive(Debug, Serialize)]
struct SuccessResponse {
    status: u16,
    description: String,
    content: Vec<String>,
}

#[derive(Debug, Serialize)]
struct NotFound {
    description: String,
    message: String,
}

/// Render the annotation block for one controller action.
pub fn render_swagger(
    engine: &TemplateEngine,
    details: &ControllerDetails,
    request: &SwaggerRequest,
    text: &ResponseText,
) -> Result<String, EngineError> {
    let context = build_context(details, request, text);
    tracing::debug!(
        operation = %request.operation,
        path = %context.path,
        "rendering swagger annotation"
    );
    let rendered = engine.render(SWAGGER_TEMPLATE, &context)?;
    Ok(rendered.trim_end().to_string())
}

fn build_context(
    details: &ControllerDetails,
    request: &SwaggerRequest,
    text: &ResponseText,
) -> SwaggerContext {
    let module = match request.module_name.trim() {
        "" => DEFAULT_MODULE,
        m => m,
    };
    let op = request.operation;

    let tag = match request.tag.trim() {
        "" => module.to_title_case(),
        t => format!("{} {}", module.to_title_case(), t),
    };

    let mut path = format!(
        "{}/{}",
        request.route_prefix.trim().trim_end_matches('/'),
        module.to_kebab_case()
    );
    let path_parameter = if op.targets_resource() {
        path.push_str(&format!("/{{{}}}/{}", details.route_param, op.as_str()));
        Some(PathParameter {
            name: details.route_param.clone(),
            action: op.as_str(),
        })
    } else {
        None
    };

    let query_parameters = if op == OperationKind::Index {
        details
            .fields
            .iter()
            .map(|f| property_context(f, module))
            .collect()
    } else {
        Vec::new()
    };

    let request_body = op.has_request_body().then(|| RequestBody {
        required: required_list(&details.required_fields()),
        properties: details
            .fields
            .iter()
            .map(|f| property_context(f, module))
            .collect(),
    });

    let content = match (&request.response_shape, op) {
        (Some(shape), _) => annotation_lines(shape, CONTENT_INDENT),
        (None, OperationKind::Delete) => {
            let status = details.status.as_deref().unwrap_or(&text.deleted_status);
            let message = details.message.as_deref().unwrap_or(&text.deleted_message);
            status_message_content(status, message)
        }
        (None, _) => placeholder_content(),
    };

    let success = SuccessResponse {
        status: if op == OperationKind::Store { 201 } else { 200 },
        description: if op == OperationKind::Delete {
            "Successful Deleted".to_string()
        } else {
            format!("Successful {op}")
        },
        content,
    };

    let not_found = op.targets_resource().then(|| NotFound {
        description: annotation_quoted(&text.not_found_description),
        message: annotation_quoted(&text.not_found_message),
    });

    SwaggerContext {
        method: op.annotation_method(),
        tag: annotation_quoted(&tag),
        path,
        description: format!("{} {}", capitalize(op.as_str()), module.to_title_case()),
        security: SECURITY,
        operation_id: format!("{}_{}", op, module.to_snake_case()),
        path_parameter,
        query_parameters,
        request_body,
        success,
        unauthenticated_message: annotation_quoted(&text.unauthenticated_message),
        not_found,
    }
}

fn property_context(field: &FieldDef, module: &str) -> PropertyContext {
    PropertyContext {
        name: field.name.clone(),
        schema_type: field.field_type.as_str(),
        description: humanize(&field.name),
        example: example_literal(field, module),
    }
}

/// Annotation literal for a field's example value.
fn example_literal(field: &FieldDef, module: &str) -> String {
    match field.field_type {
        FieldType::Integer => "1".to_string(),
        FieldType::Number => "1.5".to_string(),
        FieldType::Boolean => "true".to_string(),
        FieldType::String => format!(
            "\"{}\"",
            annotation_quoted(&format!("{} {}", capitalize(module), humanize(&field.name)))
        ),
    }
}

fn required_list(required: &[&str]) -> String {
    if required.is_empty() {
        return "{}".to_string();
    }
    let quoted: Vec<String> = required.iter().map(|f| format!("\"{f}\"")).collect();
    format!("{{ {} }}", quoted.join(", "))
}

fn placeholder_content() -> Vec<String> {
    let pad = " ".repeat(CONTENT_INDENT);
    vec![
        format!("{pad}@OA\\JsonContent("),
        format!("{pad}   @OA\\Property(property=\"data\", type=\"object\", example=\"[...]\")"),
        format!("{pad})"),
    ]
}

fn status_message_content(status: &str, message: &str) -> Vec<String> {
    let pad = " ".repeat(CONTENT_INDENT);
    vec![
        format!("{pad}@OA\\JsonContent("),
        format!(
            "{pad}   @OA\\Property(property=\"status\", type=\"string\", example=\"{}\"),",
            annotation_quoted(status)
        ),
        format!(
            "{pad}   @OA\\Property(property=\"message\", type=\"string\", example=\"{}\")",
            annotation_quoted(message)
        ),
        format!("{pad})"),
    ]
}
