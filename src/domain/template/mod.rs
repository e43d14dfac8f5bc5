//! Message templates.
//!
//! This module provides:
//! - Template records keyed by (recipient group, message kind)
//! - Group-to-shared fallback resolution
//! - A two-pass variable substitution engine
//! - Authoring-time validation checks

mod factory;
mod memory_store;
mod postgres_store;
pub mod render;
mod store;
mod types;
mod validate;

pub use factory::create_template_store;
pub use memory_store::MemoryTemplateStore;
pub use postgres_store::PostgresTemplateStore;
pub use render::{placeholders, render, RenderContext};
pub use store::{TemplateResolver, TemplateStore};
pub use types::Template;
pub use validate::{validate_body, TemplateCheck, MAX_BODY_BYTES};
