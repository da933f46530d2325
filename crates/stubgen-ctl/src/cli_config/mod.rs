//! CLI configuration for tag storage, defaults and fixed response wording.

pub(crate) mod loader;

pub(crate) use loader::load_cli_config;

use std::path::PathBuf;

use serde::Deserialize;
use stubgen_sdk::phpunit::TestSuiteOptions;
use stubgen_sdk::swagger::ResponseText;
use stubgen_sdk::template_engine::{EngineError, TemplateEngine};

use loader::{expand_path, home_dir};

const TAGS_FILENAME: &str = "tags.json";

/// Settings read from `.stubgen.toml`.
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub(crate) struct CliConfig {
    /// Tag list location. Default: `~/.config/stubgen/tags.json`.
    pub tags_file: Option<String>,

    /// Tag used when `--tag` is omitted.
    pub default_tag: Option<String>,

    /// Module used when `--module` is omitted.
    pub default_module: Option<String>,

    /// Route prefix used when neither `--route-prefix` nor the tag supplies one.
    pub default_route_prefix: Option<String>,

    /// Directory of `*.tera` files overriding the built-in templates.
    pub templates_dir: Option<String>,

    #[serde(default)]
    pub responses: ResponseText,

    #[serde(default)]
    pub tests: TestSuiteOptions,
}

impl CliConfig {
    pub(crate) fn tags_path(&self) -> PathBuf {
        match &self.tags_file {
            Some(path) => expand_path(path),
            None => home_dir()
                .map(|home| home.join(".config").join("stubgen").join(TAGS_FILENAME))
                .unwrap_or_else(|| PathBuf::from(TAGS_FILENAME)),
        }
    }

    pub(crate) fn template_engine(&self) -> Result<TemplateEngine, EngineError> {
        match &self.templates_dir {
            Some(dir) => TemplateEngine::with_overrides(&expand_path(dir)),
            None => TemplateEngine::builtin(),
        }
    }
}
