//! Tera-based rendering with embedded built-ins and directory overrides.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tera::{Context, Tera};

use super::filters;
use super::loader::load_templates_from_dir;

/// Template name of the `swagger-php` annotation block.
pub const SWAGGER_TEMPLATE: &str = "swagger.php.tera";

/// Template name of the PHPUnit test-method scaffold.
pub const PHPUNIT_TEMPLATE: &str = "phpunit_tests.php.tera";

const BUILTIN_TEMPLATES: &[(&str, &str)] = &[
    (
        SWAGGER_TEMPLATE,
        include_str!("../../templates/swagger.php.tera"),
    ),
    (
        PHPUNIT_TEMPLATE,
        include_str!("../../templates/phpunit_tests.php.tera"),
    ),
];

/// Template engine wrapping Tera with the case filters registered.
#[derive(Debug)]
pub struct TemplateEngine {
    tera: Tera,
}

impl TemplateEngine {
    /// Engine holding only the built-in templates.
    pub fn builtin() -> Result<Self, EngineError> {
        let mut tera = Tera::default();
        tera.add_raw_templates(BUILTIN_TEMPLATES.iter().copied())
            .map_err(|e| EngineError::Load {
                origin: "built-in templates".to_string(),
                source: e,
            })?;
        filters::register(&mut tera);
        Ok(Self { tera })
    }

    /// Engine whose templates come from `dir` first, then the built-ins.
    pub fn with_overrides(dir: &Path) -> Result<Self, EngineError> {
        let mut tera = load_templates_from_dir(dir)?;
        let overridden: Vec<String> = tera.get_template_names().map(String::from).collect();

        let builtin = Self::builtin()?;
        // extend() keeps templates already present, so the directory wins
        tera.extend(&builtin.tera).map_err(|e| EngineError::Load {
            origin: dir.display().to_string(),
            source: e,
        })?;
        filters::register(&mut tera);

        tracing::debug!(dir = %dir.display(), ?overridden, "loaded template overrides");
        Ok(Self { tera })
    }

    /// Render a named template with a serializable context.
    pub fn render<T: Serialize>(&self, template: &str, data: &T) -> Result<String, EngineError> {
        let context = Context::from_serialize(data).map_err(|e| EngineError::Render {
            template: template.to_string(),
            source: e,
        })?;
        self.tera
            .render(template, &context)
            .map_err(|e| EngineError::Render {
                template: template.to_string(),
                source: e,
            })
    }

    /// Names of every template this engine can render (sorted).
    pub fn template_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tera.get_template_names().collect();
        names.sort_unstable();
        names
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("template directory '{0}' does not exist")]
    MissingDir(PathBuf),
    #[error("template load error ({origin}): {source}")]
    Load { origin: String, source: tera::Error },
    #[error("render error for '{template}': {source}")]
    Render {
        template: String,
        source: tera::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[derive(Serialize)]
    struct Greeting<'a> {
        path: &'a str,
    }

    #[test]
    fn test_builtin_templates_are_registered() {
        let engine = TemplateEngine::builtin().unwrap();
        assert_eq!(
            engine.template_names(),
            vec![PHPUNIT_TEMPLATE, SWAGGER_TEMPLATE]
        );
    }

    #[test]
    fn test_override_replaces_builtin() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(SWAGGER_TEMPLATE),
            "custom {{ path | snake_case }}",
        )
        .unwrap();

        let engine = TemplateEngine::with_overrides(dir.path()).unwrap();
        let rendered = engine
            .render(SWAGGER_TEMPLATE, &Greeting { path: "/api/users" })
            .unwrap();
        assert_eq!(rendered, "custom api_users");

        // Not overridden, still available
        assert!(engine.template_names().contains(&PHPUNIT_TEMPLATE));
    }

    #[test]
    fn test_unknown_template_is_a_render_error() {
        let engine = TemplateEngine::builtin().unwrap();
        let result = engine.render("missing.tera", &Greeting { path: "/" });
        assert!(matches!(result, Err(EngineError::Render { .. })));
    }
}
