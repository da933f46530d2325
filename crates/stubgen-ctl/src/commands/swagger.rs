//! `stubgen swagger`: controller source to a swagger-php annotation block.

use anyhow::Context;
use stubgen_sdk::controller::extract_details;
use stubgen_sdk::swagger::{render_swagger, SwaggerRequest};
use stubgen_sdk::tags::TagStore;

use super::{load_shape, read_input};
use crate::cli_config::CliConfig;
use crate::output;
use crate::SwaggerArgs;

pub(crate) fn handle_swagger_command(args: SwaggerArgs, config: &CliConfig) -> anyhow::Result<()> {
    let source = read_input(&args.controller)?;
    let details = extract_details(&source)?;

    let store = TagStore::load(config.tags_path());
    let tag = args
        .tag
        .or_else(|| config.default_tag.clone())
        .or_else(|| store.names().first().map(|n| n.to_string()))
        .unwrap_or_default();

    // --route-prefix, then the tag's stored prefix, then the configured default
    let route_prefix = args
        .route_prefix
        .or_else(|| store.route_prefix(&tag).map(str::to_string))
        .or_else(|| config.default_route_prefix.clone())
        .unwrap_or_default();

    let request = SwaggerRequest {
        module_name: args
            .module
            .or_else(|| config.default_module.clone())
            .unwrap_or_default(),
        route_prefix,
        tag,
        operation: args.operation,
        response_shape: load_shape(args.response_json.as_deref())?,
    };
    tracing::debug!(?request, fields = details.fields.len(), "swagger request");

    let engine = config.template_engine()?;
    let annotation = render_swagger(&engine, &details, &request, &config.responses)?;

    match args.output {
        Some(path) => {
            std::fs::write(&path, format!("{annotation}\n"))
                .with_context(|| format!("failed to write '{}'", path.display()))?;
            output::success(format!("Wrote annotation to {}", path.display()));
        }
        None => output::plain(annotation),
    }
    Ok(())
}
