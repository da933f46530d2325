//! PHPUnit request snippets and test-method scaffolding.
//!
//! Test methods follow the Laravel + Passport convention: act as a seeded
//! user, issue the request, assert status and `assertJsonStructure`.

use heck::ToLowerCamelCase;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::curl::{CurlRequest, HttpMethod};
use crate::shape::{assert_json_structure, ShapeNode};
use crate::template_engine::{EngineError, TemplateEngine, PHPUNIT_TEMPLATE};
use crate::text::{indent_block, php_single_quoted};

/// Nesting level of `assertJsonStructure(` inside a test method body.
const BODY_LEVEL: usize = 2;

/// Who the generated tests act as and what an unauthenticated call returns.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", default)]
pub struct TestSuiteOptions {
    pub auth_email: String,
    pub unauthenticated_status: u16,
    pub unauthenticated_message: String,
}

impl Default for TestSuiteOptions {
    fn default() -> Self {
        Self {
            auth_email: "admin@pruebas.com".to_string(),
            unauthenticated_status: 404,
            unauthenticated_message: "Ruta incorrecta o user no autenticado".to_string(),
        }
    }
}

/// PHP statements that rebuild a captured request inside a test.
///
/// GET requests become one variable per query parameter concatenated into the
/// URL; every other verb sends the form fields as a `$data` array.
pub fn request_snippet(request: &CurlRequest, method: HttpMethod) -> String {
    match method {
        HttpMethod::Get => get_snippet(request),
        other => data_snippet(request, other),
    }
}

fn get_snippet(request: &CurlRequest) -> String {
    let path = php_single_quoted(&request.path);

    // First value wins for repeated keys
    let mut params: Vec<(&str, &str)> = Vec::new();
    for (key, value) in &request.query {
        if !params.iter().any(|(k, _)| *k == key.as_str()) {
            params.push((key.as_str(), value.as_str()));
        }
    }

    if params.is_empty() {
        return format!("$response = $this->get('{path}');");
    }

    let mut variables: Vec<String> = Vec::with_capacity(params.len());
    for (i, (key, _)) in params.iter().enumerate() {
        let name = php_variable(key, i + 1, &variables);
        variables.push(name);
    }

    let mut lines: Vec<String> = params
        .iter()
        .zip(&variables)
        .map(|((_, value), var)| format!("${var} = '{}';", php_single_quoted(value)))
        .collect();

    let url = params
        .iter()
        .zip(&variables)
        .enumerate()
        .map(|(i, ((key, _), var))| {
            let sep = if i == 0 { "?" } else { "&" };
            format!("'{sep}{}='.${var}", php_single_quoted(key))
        })
        .collect::<Vec<_>>()
        .join(".");

    lines.push(String::new());
    lines.push(format!("$response = $this->get('{path}{});", &url[1..]));
    lines.join("\n")
}

/// camelCase variable for a query key, or `param{position}` when the key
/// does not make a valid PHP identifier or collides with an earlier one.
fn php_variable(key: &str, position: usize, taken: &[String]) -> String {
    let camel = key.to_lower_camel_case();
    let valid = camel
        .chars()
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_')
        && camel.chars().all(|c| c.is_alphanumeric() || c == '_');
    if valid && !taken.contains(&camel) {
        return camel;
    }

    let mut name = format!("param{position}");
    while taken.contains(&name) {
        name.push('_');
    }
    name
}

fn data_snippet(request: &CurlRequest, method: HttpMethod) -> String {
    let array = if request.form.is_empty() {
        "$data = [];".to_string()
    } else {
        let entries: Vec<String> = request
            .form
            .iter()
            .map(|(key, value)| {
                format!(
                    "    '{}' => '{}'",
                    php_single_quoted(key),
                    php_single_quoted(value)
                )
            })
            .collect();
        format!("$data = [\n{}\n];", entries.join(",\n"))
    };

    format!(
        "{array}\n\n$response = $this->{}('{}', $data);",
        method.test_helper(),
        php_single_quoted(&request.path)
    )
}

#[derive(Debug, Serialize)]
struct TestContext {
    action: &'static str,
    path: String,
    auth_email: String,
    request_block: String,
    success_status: u16,
    structure: String,
    invalid: Option<InvalidQuery>,
    unauthenticated_verb: String,
    unauthenticated_status: u16,
    unauthenticated_message: String,
}

#[derive(Debug, Serialize)]
struct InvalidQuery {
    query: String,
    structure: String,
}

/// Render the authenticated, invalid-query (GET only) and unauthenticated tests.
///
/// `structure` is the expected response shape; without one the assertion is `[]`.
pub fn render_tests(
    engine: &TemplateEngine,
    request: &CurlRequest,
    method: HttpMethod,
    structure: Option<&ShapeNode>,
    options: &TestSuiteOptions,
) -> Result<String, EngineError> {
    let is_get = method == HttpMethod::Get;

    let invalid = is_get.then(|| InvalidQuery {
        query: request
            .query
            .first()
            .map(|(key, _)| format!("?{}=invalid", php_single_quoted(key)))
            .unwrap_or_default(),
        structure: assert_json_structure(&pagination_shape(), BODY_LEVEL),
    });

    let context = TestContext {
        action: if is_get { "list" } else { "store" },
        path: php_single_quoted(&request.path),
        auth_email: php_single_quoted(&options.auth_email),
        request_block: indent_block(&request_snippet(request, method), 4 * BODY_LEVEL),
        success_status: if method == HttpMethod::Post { 201 } else { 200 },
        structure: structure
            .map(|s| assert_json_structure(s, BODY_LEVEL))
            .unwrap_or_else(|| "[]".to_string()),
        invalid,
        unauthenticated_verb: method.test_helper(),
        unauthenticated_status: options.unauthenticated_status,
        unauthenticated_message: php_single_quoted(&options.unauthenticated_message),
    };

    tracing::debug!(path = %request.path, %method, "rendering phpunit tests");
    let rendered = engine.render(PHPUNIT_TEMPLATE, &context)?;
    Ok(rendered.trim_end().to_string())
}

/// Laravel paginator envelope returned by an index endpoint.
fn pagination_shape() -> ShapeNode {
    ShapeNode::from_json(&json!({
        "data": null,
        "links": {"first": null, "last": null, "prev": null, "next": null},
        "meta": {
            "current_page": 1,
            "from": null,
            "last_page": 1,
            "links": [{"url": null, "label": "", "active": false}],
            "path": "",
            "per_page": 15,
            "to": null,
            "total": 0
        }
    }))
}
