//! Composition of repository status badge snippets.
//!
//! The library holds catalogs of badge services, visual styles and snippet
//! formats, applies a [`SelectionState`] to them and produces resolved badge
//! URLs plus copyable snippet text. No network access happens here: badge
//! images are referenced by URL only.

mod catalog;
mod compose;
mod config;
mod error;
mod key;
mod preview;
mod selection;
mod template;

pub use catalog::{BadgeStyle, Catalog, FormatDefinition, RenderFn, ServiceDefinition};
pub use compose::{ResolvedBadge, compose_enabled, render_snippet, should_preview};
pub use config::{CatalogDocument, ServiceEntry, load_catalog, parse_catalog};
pub use error::{Error, io_error, output_error};
pub use key::service_key;
pub use preview::render_preview;
pub use selection::SelectionState;
pub use template::{
    BRANCH_PLACEHOLDER, DEFAULT_BRANCH, REPOSITORY_PLACEHOLDER, TemplateParams, apply_style,
    placeholders, resolve, unrecognized_placeholders
};
