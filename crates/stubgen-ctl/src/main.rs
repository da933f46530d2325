//! # stubgen
//!
//! Command-line front end for `stubgen-sdk`: reads controller source, captured
//! `curl` commands and JSON bodies, and prints swagger annotations, PHPUnit
//! scaffolding and `assertJsonStructure` assertions.

mod cli_config;
mod commands;
mod output;
mod runner;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use stubgen_sdk::curl::HttpMethod;
use stubgen_sdk::swagger::OperationKind;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "stubgen")]
#[command(about = "Generate swagger-php annotations and PHPUnit scaffolding for Laravel APIs")]
#[command(version, styles = output::clap_styles())]
struct Cli {
    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Generate a swagger-php annotation block from controller source
    Swagger(SwaggerArgs),

    /// Manage the tag list used for annotation tags and route prefixes
    #[command(subcommand)]
    Tags(TagCommands),

    /// Print assertJsonStructure([...]) for a JSON document
    Structure {
        /// JSON file, or `-` for stdin
        #[arg(long)]
        json: String,
    },

    /// Work with captured curl commands
    #[command(subcommand)]
    Curl(CurlCommands),
}

#[derive(Debug, Args)]
pub(crate) struct SwaggerArgs {
    /// Controller source file, or `-` for stdin
    #[arg(long)]
    controller: String,

    /// Operation kind: store, update, index, show or delete
    #[arg(long)]
    operation: OperationKind,

    /// Resource name (e.g. `products`)
    #[arg(long)]
    module: Option<String>,

    /// Tag type (e.g. `Backoffice`)
    #[arg(long)]
    tag: Option<String>,

    /// Route prefix; defaults to the tag's stored prefix
    #[arg(long)]
    route_prefix: Option<String>,

    /// Sample success response whose shape documents the 2xx response
    #[arg(long)]
    response_json: Option<PathBuf>,

    /// Write the annotation to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub(crate) enum TagCommands {
    /// List stored tags and their route prefixes
    List,

    /// Add a tag
    Add {
        /// Tag name
        name: String,

        /// Route prefix (default: /api/v1/<lowercased name>)
        #[arg(long)]
        route_prefix: Option<String>,
    },

    /// Remove a tag
    Remove {
        /// Tag name
        name: String,
    },
}

#[derive(Debug, Subcommand)]
pub(crate) enum CurlCommands {
    /// Execute a curl command and scaffold tests from its response
    Run {
        /// File holding the curl command, or `-` for stdin
        #[arg(long)]
        command: String,

        /// Print the raw response body
        #[arg(long)]
        show_raw: bool,

        /// Print the response body re-indented
        #[arg(long)]
        pretty: bool,
    },

    /// Build request variables and tests from a curl command without running it
    Extract {
        /// File holding the curl command, or `-` for stdin
        #[arg(long)]
        command: String,

        /// Request style: get (query variables) or post (`$data` array)
        #[arg(long)]
        method: Option<HttpMethod>,

        /// Captured response body used for the structure assertion
        #[arg(long)]
        response_json: Option<PathBuf>,
    },
}

/// `RUST_LOG` wins when set; otherwise both crates log at info (debug with `-v`).
fn init_tracing(verbose: bool) -> anyhow::Result<()> {
    let level = if verbose { "debug" } else { "info" };
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(format!("stubgen_ctl={level},stubgen_sdk={level}"))?,
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
    Ok(())
}

fn run(cli: Cli) -> anyhow::Result<()> {
    init_tracing(cli.verbose)?;
    let config = cli_config::load_cli_config();

    match cli.command {
        Commands::Swagger(args) => commands::handle_swagger_command(args, &config),
        Commands::Tags(cmd) => commands::handle_tags_command(cmd, &config),
        Commands::Structure { json } => commands::handle_structure_command(&json),
        Commands::Curl(cmd) => commands::handle_curl_command(cmd, &config),
    }
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        output::error(format!("{e:#}"));
        std::process::exit(1);
    }
}
