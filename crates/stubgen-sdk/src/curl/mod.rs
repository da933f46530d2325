//! Captured `curl` commands and their responses.
//!
//! [`CurlRequest::parse`] understands the subset of `curl` syntax that browser
//! devtools and API clients emit when copying a request: quoted arguments,
//! backslash line continuations, `-X`, `--url`, `-F` and the `-d` family
//! (urlencoded pairs or a JSON object, as "Copy as cURL" emits).

use std::fmt;
use std::str::FromStr;

use percent_encoding::percent_decode_str;
use serde::Serialize;
use serde_json::Value;
use url::Url;

/// HTTP verb of a captured request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }

    /// Name of the Laravel test helper issuing this verb (`get`, `post`, ...).
    pub fn test_helper(&self) -> String {
        self.as_str().to_lowercase()
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = CurlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "GET" => Ok(HttpMethod::Get),
            "POST" => Ok(HttpMethod::Post),
            "PUT" => Ok(HttpMethod::Put),
            "PATCH" => Ok(HttpMethod::Patch),
            "DELETE" => Ok(HttpMethod::Delete),
            _ => Err(CurlError::UnsupportedMethod(s.to_string())),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CurlError {
    #[error("Please enter a valid curl command.")]
    NotCurl,
    #[error("unterminated quote in curl command")]
    UnterminatedQuote,
    #[error("option '{0}' expects a value")]
    MissingValue(String),
    #[error("no http(s) URL found in curl command")]
    MissingUrl,
    #[error("invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        source: url::ParseError,
    },
    #[error("unsupported HTTP method '{0}'")]
    UnsupportedMethod(String),
    #[error("Failed to parse JSON from curl output: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

/// Options whose value is consumed without affecting the parsed request.
const IGNORED_WITH_VALUE: &[&str] = &[
    "-H",
    "--header",
    "-u",
    "--user",
    "-o",
    "--output",
    "-A",
    "--user-agent",
    "-b",
    "--cookie",
    "-e",
    "--referer",
    "-w",
    "--write-out",
    "-m",
    "--max-time",
    "--connect-timeout",
];

/// Multipart fields: one literal `name=value` per option.
const FORM_OPTIONS: &[&str] = &["-F", "--form"];

/// Request bodies: urlencoded pairs or a JSON object.
const DATA_OPTIONS: &[&str] = &[
    "-d",
    "--data",
    "--data-raw",
    "--data-binary",
    "--data-urlencode",
    "--data-ascii",
];

/// A parsed `curl` invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurlRequest {
    pub url: String,
    /// URL path without query string (e.g. `/api/v1/products`)
    pub path: String,
    pub method: HttpMethod,
    /// Decoded query parameters in URL order
    pub query: Vec<(String, String)>,
    /// Decoded `-F`/`-d` fields in command order
    pub form: Vec<(String, String)>,
}

impl CurlRequest {
    /// Parse a `curl ...` command line.
    pub fn parse(command: &str) -> Result<Self, CurlError> {
        let command = command.trim();
        let tokens = tokenize(command)?;
        if tokens.first().map(String::as_str) != Some("curl") {
            return Err(CurlError::NotCurl);
        }

        let mut url: Option<String> = None;
        let mut explicit_method: Option<HttpMethod> = None;
        let mut form: Vec<(String, String)> = Vec::new();
        let mut has_body = false;

        let mut iter = tokens.into_iter().skip(1);
        while let Some(token) = iter.next() {
            let token = token.as_str();
            if token == "-X" || token == "--request" {
                let value = iter
                    .next()
                    .ok_or_else(|| CurlError::MissingValue(token.to_string()))?;
                explicit_method = Some(value.parse()?);
            } else if let Some(inline) = token.strip_prefix("-X").filter(|v| !v.is_empty()) {
                explicit_method = Some(inline.parse()?);
            } else if token == "--url" {
                let value = iter
                    .next()
                    .ok_or_else(|| CurlError::MissingValue(token.to_string()))?;
                url = Some(value);
            } else if FORM_OPTIONS.contains(&token) {
                let value = iter
                    .next()
                    .ok_or_else(|| CurlError::MissingValue(token.to_string()))?;
                has_body = true;
                form.push(multipart_field(&value));
            } else if DATA_OPTIONS.contains(&token) {
                let value = iter
                    .next()
                    .ok_or_else(|| CurlError::MissingValue(token.to_string()))?;
                has_body = true;
                form.extend(data_fields(&value));
            } else if IGNORED_WITH_VALUE.contains(&token) {
                iter.next();
            } else if token.starts_with('-') {
                tracing::trace!(flag = token, "ignoring curl flag");
            } else if url.is_none()
                && (token.starts_with("http://") || token.starts_with("https://"))
            {
                url = Some(token.to_string());
            }
        }

        let url = url.ok_or(CurlError::MissingUrl)?;
        let parsed = Url::parse(&url).map_err(|source| CurlError::InvalidUrl {
            url: url.clone(),
            source,
        })?;

        let method = explicit_method.unwrap_or(if has_body {
            HttpMethod::Post
        } else {
            HttpMethod::Get
        });

        let request = CurlRequest {
            path: parsed.path().to_string(),
            query: parsed
                .query_pairs()
                .map(|(k, v)| (k.into_owned(), v.into_owned()))
                .collect(),
            url,
            method,
            form,
        };
        tracing::debug!(
            method = %request.method,
            path = %request.path,
            query = request.query.len(),
            form = request.form.len(),
            "parsed curl command"
        );
        Ok(request)
    }
}

/// `-F name=value`: split at the first `=`, percent-decode both sides, keep `+` and `&`.
fn multipart_field(value: &str) -> (String, String) {
    let decode = |s: &str| percent_decode_str(s).decode_utf8_lossy().into_owned();
    match value.split_once('=') {
        Some((name, content)) => (decode(name), decode(content)),
        None => (decode(value), String::new()),
    }
}

/// `-d` body: top-level members of a JSON object, otherwise urlencoded pairs.
fn data_fields(body: &str) -> Vec<(String, String)> {
    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(body.trim()) {
        return map
            .into_iter()
            .map(|(key, value)| {
                let text = match value {
                    Value::String(s) => s,
                    Value::Null => String::new(),
                    other => other.to_string(),
                };
                (key, text)
            })
            .collect();
    }
    url::form_urlencoded::parse(body.as_bytes())
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

/// Split a command line the way a POSIX shell would for plain arguments.
fn tokenize(command: &str) -> Result<Vec<String>, CurlError> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut chars = command.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\'' => {
                in_token = true;
                loop {
                    match chars.next() {
                        Some('\'') => break,
                        Some(ch) => current.push(ch),
                        None => return Err(CurlError::UnterminatedQuote),
                    }
                }
            }
            '"' => {
                in_token = true;
                loop {
                    match chars.next() {
                        Some('"') => break,
                        Some('\\') => match chars.next() {
                            Some(ch @ ('"' | '\\' | '$' | '`')) => current.push(ch),
                            Some('\n') => {}
                            Some(ch) => {
                                current.push('\\');
                                current.push(ch);
                            }
                            None => return Err(CurlError::UnterminatedQuote),
                        },
                        Some(ch) => current.push(ch),
                        None => return Err(CurlError::UnterminatedQuote),
                    }
                }
            }
            '\\' => match chars.next() {
                // line continuation
                Some('\n') => {}
                Some('\r') if chars.peek() == Some(&'\n') => {
                    chars.next();
                }
                Some(ch) => {
                    in_token = true;
                    current.push(ch);
                }
                None => {}
            },
            c if c.is_whitespace() => {
                if in_token {
                    tokens.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            c => {
                in_token = true;
                current.push(c);
            }
        }
    }
    if in_token {
        tokens.push(current);
    }
    Ok(tokens)
}

/// Body and status code captured from `curl -s -w '\n%{http_code}'`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedResponse {
    pub body: String,
    pub status: Option<u16>,
}

impl CapturedResponse {
    /// Split the trailing status line off captured stdout.
    pub fn from_output(stdout: &str) -> Self {
        let trimmed = stdout.trim_end();
        match trimmed.rsplit_once('\n') {
            Some((body, last)) => match last.trim().parse::<u16>() {
                Ok(status) => Self {
                    body: body.trim().to_string(),
                    status: Some(status),
                },
                Err(_) => Self {
                    body: trimmed.trim().to_string(),
                    status: None,
                },
            },
            None => Self {
                body: trimmed.trim().to_string(),
                status: None,
            },
        }
    }

    pub fn json(&self) -> Result<Value, CurlError> {
        Ok(serde_json::from_str(&self.body)?)
    }
}

/// Re-serialize JSON compactly or with four-space indentation.
pub fn format_json(value: &Value, pretty: bool) -> Result<String, CurlError> {
    if !pretty {
        return Ok(serde_json::to_string(value)?);
    }
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
