//! Command handlers for the stubgen CLI.
//!
//! Each module handles one command group, delegating the text transformations to
//! `stubgen-sdk` and keeping file and terminal I/O here.

pub(crate) mod curl;
pub(crate) mod structure;
pub(crate) mod swagger;
pub(crate) mod tags;

pub(crate) use curl::handle_curl_command;
pub(crate) use structure::handle_structure_command;
pub(crate) use swagger::handle_swagger_command;
pub(crate) use tags::handle_tags_command;

use std::io::Read;
use std::path::Path;

use anyhow::Context;
use stubgen_sdk::shape::ShapeNode;

/// Read a file argument, where `-` means stdin.
pub(crate) fn read_input(source: &str) -> anyhow::Result<String> {
    if source == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read stdin")?;
        return Ok(buf);
    }
    std::fs::read_to_string(source).with_context(|| format!("failed to read '{source}'"))
}

/// Parse a JSON document and reduce it to its shape.
pub(crate) fn parse_shape(text: &str, origin: &str) -> anyhow::Result<ShapeNode> {
    let value: serde_json::Value =
        serde_json::from_str(text).with_context(|| format!("invalid JSON in '{origin}'"))?;
    Ok(ShapeNode::from_json(&value))
}

/// Load the shape of an optional sample response file.
pub(crate) fn load_shape(path: Option<&Path>) -> anyhow::Result<Option<ShapeNode>> {
    let Some(path) = path else {
        return Ok(None);
    };
    let origin = path.display().to_string();
    let text = read_input(&origin)?;
    parse_shape(&text, &origin).map(Some)
}
