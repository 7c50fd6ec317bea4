//! Rendering registries as proto declarations

use crate::error::Result;
use crate::schema::{FieldSignature, MessageSignature, SchemaRegistry};

/// Field option carrying the default value of a nullable field
pub const NULLABLE_OPTION: &str = "(nullable)";

/// File-level settings of a rendered proto document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtoOptions {
    /// Value of the `syntax` statement
    pub syntax: String,
    /// Value of the `package` statement
    pub package: String,
}

impl Default for ProtoOptions {
    fn default() -> Self {
        Self {
            syntax: "proto3".to_string(),
            package: "inferred".to_string(),
        }
    }
}

impl ProtoOptions {
    /// Options for the given package
    pub fn with_package(package: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            ..Self::default()
        }
    }
}

/// Render one field line, without the leading indentation
pub fn render_field(field: &FieldSignature) -> String {
    let annotation = if field.nullable {
        format!(" [{NULLABLE_OPTION} = '{}']", field.default_literal())
    } else {
        String::new()
    };
    format!(
        "{} {} = {}{annotation};",
        field.type_name(),
        field.name,
        field.position
    )
}

/// Render one message declaration
pub fn render_message(message: &MessageSignature) -> String {
    let fields = message
        .fields
        .iter()
        .map(|field| format!("\t{}", render_field(field)))
        .collect::<Vec<_>>()
        .join("\n");
    format!("message {} {{\n{fields}\n}}", message.name)
}

/// Render every entry, last created first so dependencies precede their users
pub fn render_declarations(registry: &SchemaRegistry) -> String {
    registry
        .declaration_order()
        .map(render_message)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render a complete proto document
pub fn render_schema(registry: &SchemaRegistry, options: &ProtoOptions) -> String {
    format!(
        "syntax = \"{}\";\n\npackage {};\n\n{}\n",
        options.syntax,
        options.package,
        render_declarations(registry)
    )
}

/// Dump registry entries (insertion order) as pretty JSON
pub fn registry_to_json(registry: &SchemaRegistry) -> Result<String> {
    Ok(serde_json::to_string_pretty(registry.entries())?)
}
