//! Tera template engine for annotation blocks and test scaffolds.
//!
//! The built-in templates are embedded at compile time. A project can drop
//! same-named `*.tera` files into an override directory to reword them without
//! rebuilding; anything it does not override falls back to the built-in.

mod engine;
mod filters;
mod loader;

pub use engine::{EngineError, TemplateEngine, PHPUNIT_TEMPLATE, SWAGGER_TEMPLATE};
