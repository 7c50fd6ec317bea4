//! Reading rendered proto declarations back into signatures

use crate::error::{Error, Result};
use crate::schema::{DeclaredType, FieldSignature, MessageSignature, ScalarKind};
use once_cell::sync::Lazy;
use regex::Regex;

static MESSAGE_OPEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^message\s+([A-Za-z_][A-Za-z0-9_]*)\s*\{$").expect("valid message regex")
});

static FIELD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^([A-Za-z_][A-Za-z0-9_.]*)\s+([A-Za-z_][A-Za-z0-9_]*)\s*=\s*(\d+)(?:\s*\[\s*\(nullable\)\s*=\s*'([^']*)'\s*\])?\s*;$",
    )
    .expect("valid field regex")
});

static SYNTAX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^syntax\s*=\s*"([^"]+)"\s*;$"#).expect("valid syntax regex"));

static PACKAGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^package\s+([A-Za-z_][A-Za-z0-9_.]*)\s*;$").expect("valid package regex")
});

/// A parsed proto document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProtoDocument {
    pub syntax: Option<String>,
    pub package: Option<String>,
    /// Messages in the order they are declared
    pub messages: Vec<MessageSignature>,
}

impl ProtoDocument {
    /// Look up a message by name
    pub fn message(&self, name: &str) -> Option<&MessageSignature> {
        self.messages.iter().find(|m| m.name == name)
    }

    /// Total number of fields across all messages
    pub fn field_count(&self) -> usize {
        self.messages.iter().map(MessageSignature::len).sum()
    }
}

/// Parse only the message declarations of a document
pub fn parse_declarations(text: &str) -> Result<Vec<MessageSignature>> {
    parse_document(text).map(|doc| doc.messages)
}

/// Parse a document produced by the renderer
pub fn parse_document(text: &str) -> Result<ProtoDocument> {
    let mut doc = ProtoDocument::default();
    let mut current: Option<MessageSignature> = None;

    for (index, raw) in text.lines().enumerate() {
        let line_no = index + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with("//") {
            continue;
        }

        if line == "}" {
            let done = current
                .take()
                .ok_or_else(|| Error::parse(line_no, "'}' outside of a message"))?;
            doc.messages.push(done);
        } else if let Some(open) = current.as_mut() {
            let field = parse_field(line, line_no)?;
            if field.position != open.fields.len() + 1 {
                return Err(Error::parse(
                    line_no,
                    format!(
                        "field '{}' has position {}, expected {}",
                        field.name,
                        field.position,
                        open.fields.len() + 1
                    ),
                ));
            }
            open.fields.push(field);
        } else if let Some(caps) = MESSAGE_OPEN.captures(line) {
            current = Some(MessageSignature::new(&caps[1], Vec::new()));
        } else if let Some(caps) = SYNTAX.captures(line) {
            doc.syntax = Some(caps[1].to_string());
        } else if let Some(caps) = PACKAGE.captures(line) {
            doc.package = Some(caps[1].to_string());
        } else {
            return Err(Error::parse(line_no, format!("unexpected line: {line}")));
        }
    }

    if let Some(open) = current {
        return Err(Error::parse(
            text.lines().count(),
            format!("message '{}' is not closed", open.name),
        ));
    }

    Ok(doc)
}

fn parse_field(line: &str, line_no: usize) -> Result<FieldSignature> {
    let caps = FIELD
        .captures(line)
        .ok_or_else(|| Error::parse(line_no, format!("invalid field: {line}")))?;

    let type_name = &caps[1];
    let name = caps[2].to_string();
    let position: usize = caps[3]
        .parse()
        .map_err(|e| Error::parse(line_no, format!("invalid position: {e}")))?;
    let default = caps.get(4).map(|m| m.as_str());
    let nullable = default.is_some();

    // Slots that only ever held nulls render as `string none<N>`
    let declared_type = if nullable
        && type_name == ScalarKind::String.as_str()
        && name == format!("none{position}")
    {
        None
    } else {
        Some(match ScalarKind::from_name(type_name) {
            Some(kind) => DeclaredType::Scalar(kind),
            None => DeclaredType::Message(type_name.to_string()),
        })
    };

    let field = FieldSignature {
        declared_type,
        name,
        position,
        nullable,
    };

    if let Some(literal) = default {
        if literal != field.default_literal() {
            return Err(Error::parse(
                line_no,
                format!(
                    "default '{literal}' does not match type {}, expected '{}'",
                    field.type_name(),
                    field.default_literal()
                ),
            ));
        }
    }

    Ok(field)
}
