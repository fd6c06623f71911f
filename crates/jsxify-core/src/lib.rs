//! SVG to React component conversion.
//!
//! This crate provides the rewrite pipeline that turns SVG markup into the
//! source of a React function component: inline styles become objects,
//! `class` becomes `className`, and hyphenated or namespaced attribute names
//! become camelCase.

pub mod format;
pub mod pipeline;
pub mod rename;
pub mod scanner;
pub mod session;
pub mod style;
pub mod traits;
pub mod validate;

pub use format::{component_name_from_stem, is_valid_identifier, ComponentTemplate};
pub use pipeline::{convert, ConvertOptions, Output, Pipeline};
pub use rename::{RenameMode, ATTRIBUTE_RENAMES};
pub use session::{read_source, Notice, Session};
pub use style::{kebab_to_camel, StyleDeclaration};
pub use traits::{ConvertError, RewriteRule, Stage};
