//! `stubgen curl`: captured requests to request snippets and PHPUnit tests.

use stubgen_sdk::curl::{format_json, CapturedResponse, CurlRequest, HttpMethod};
use stubgen_sdk::phpunit::{render_tests, request_snippet};
use stubgen_sdk::shape::{assert_json_structure, ShapeNode};

use super::{load_shape, read_input};
use crate::cli_config::CliConfig;
use crate::output;
use crate::runner::run_curl;
use crate::CurlCommands;

pub(crate) fn handle_curl_command(cmd: CurlCommands, config: &CliConfig) -> anyhow::Result<()> {
    match cmd {
        CurlCommands::Run {
            command,
            show_raw,
            pretty,
        } => run(config, &command, show_raw, pretty),

        CurlCommands::Extract {
            command,
            method,
            response_json,
        } => {
            let command = read_input(&command)?;
            let request = CurlRequest::parse(&command)?;
            let method = method.unwrap_or(request.method);
            let shape = load_shape(response_json.as_deref())?;

            output::header("Request:");
            output::plain(request_snippet(&request, method));
            output::blank();
            print_tests(config, &request, method, shape.as_ref())
        }
    }
}

fn run(config: &CliConfig, source: &str, show_raw: bool, pretty: bool) -> anyhow::Result<()> {
    let command = read_input(source)?;
    let request = CurlRequest::parse(&command)?;

    let response = CapturedResponse::from_output(&run_curl(&command)?);
    match response.status {
        Some(status) => output::label("Status Code", status),
        None => output::label("Status Code", "unknown"),
    }

    let json = response.json()?;
    if pretty {
        output::header("Response:");
        output::plain(format_json(&json, true)?);
    } else if show_raw {
        output::header("Response:");
        output::plain(&response.body);
    }

    let shape = ShapeNode::from_json(&json);
    output::blank();
    output::plain(format!(
        "assertJsonStructure({})",
        assert_json_structure(&shape, 0)
    ));
    output::blank();
    print_tests(config, &request, request.method, Some(&shape))
}

fn print_tests(
    config: &CliConfig,
    request: &CurlRequest,
    method: HttpMethod,
    shape: Option<&ShapeNode>,
) -> anyhow::Result<()> {
    let engine = config.template_engine()?;
    let tests = render_tests(&engine, request, method, shape, &config.tests)?;
    output::header("Tests:");
    output::plain(tests);
    Ok(())
}
