//! Output module
//!
//! Renders inferred registries as proto declarations and reads them back.
//!
//! # Overview
//!
//! This module provides utilities for:
//! - Rendering messages in dependency-before-use order
//! - Parsing rendered declarations back into signatures
//! - Writing `.proto` files
//! - Dumping the registry as JSON

mod parse;
mod render;
mod writer;

pub use parse::{parse_declarations, parse_document, ProtoDocument};
pub use render::{
    registry_to_json, render_declarations, render_field, render_message, render_schema,
    ProtoOptions, NULLABLE_OPTION,
};
pub use writer::write_proto;
