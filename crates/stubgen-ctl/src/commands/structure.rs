//! `stubgen structure`: JSON document to `assertJsonStructure([...])`.

use stubgen_sdk::shape::assert_json_structure;

use super::{parse_shape, read_input};
use crate::output;

pub(crate) fn handle_structure_command(json: &str) -> anyhow::Result<()> {
    let text = read_input(json)?;
    let shape = parse_shape(&text, json)?;
    if shape.is_empty() {
        tracing::warn!(source = json, "document has no object keys, assertion is empty");
    }
    output::plain(format!(
        "assertJsonStructure({})",
        assert_json_structure(&shape, 0)
    ));
    Ok(())
}
