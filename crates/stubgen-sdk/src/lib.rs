//! Shared SDK for stubgen: field extraction, JSON shape descriptors, and template rendering.
//!
//! Every transformation here is a pure text-in/text-out function. Shell concerns
//! (reading files, running `curl`, printing) live in `stubgen-ctl`.
//!
//! # Modules
//!
//! ## Extraction
//! - [`controller`]: Field list, route parameter and response literals from controller source
//! - [`curl`]: Captured `curl` command parsing and `-w '%{http_code}'` output splitting
//! - [`shape`]: JSON value → shape descriptor, rendered as test assertions or annotations
//!
//! ## Rendering
//! - [`swagger`]: `swagger-php` annotation blocks per operation kind
//! - [`phpunit`]: Request snippets and PHPUnit test-method scaffolding
//! - [`template_engine`]: Tera engine with embedded built-in templates and case filters
//!
//! ## Persistence
//! - [`tags`]: The user-editable tag list backing annotation `tags={...}`

pub mod controller;
pub mod curl;
pub mod phpunit;
pub mod shape;
pub mod swagger;
pub mod tags;
pub mod template_engine;

pub(crate) mod text;
