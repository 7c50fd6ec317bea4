//! Schema types

use serde::{Deserialize, Serialize};

/// Scalar kind a sample value can be classified as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScalarKind {
    String,
    Bool,
    Int32,
    Double,
}

impl ScalarKind {
    /// Proto type name of this kind
    pub fn as_str(&self) -> &'static str {
        match self {
            ScalarKind::String => "string",
            ScalarKind::Bool => "bool",
            ScalarKind::Int32 => "int32",
            ScalarKind::Double => "double",
        }
    }

    /// Default literal used in the nullable annotation
    pub fn default_literal(&self) -> &'static str {
        match self {
            ScalarKind::String => "",
            ScalarKind::Bool => "false",
            ScalarKind::Int32 => "0",
            ScalarKind::Double => "0.0",
        }
    }

    /// Look up a kind by its proto type name
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "string" => Some(ScalarKind::String),
            "bool" => Some(ScalarKind::Bool),
            "int32" => Some(ScalarKind::Int32),
            "double" => Some(ScalarKind::Double),
            _ => None,
        }
    }
}

impl std::fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Concrete type of a field: a scalar or a reference to another message by name
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclaredType {
    Scalar(ScalarKind),
    Message(String),
}

impl DeclaredType {
    /// Name written in the type column of a declaration
    pub fn type_name(&self) -> &str {
        match self {
            DeclaredType::Scalar(kind) => kind.as_str(),
            DeclaredType::Message(name) => name,
        }
    }

    /// Default literal used in the nullable annotation
    pub fn default_literal(&self) -> &'static str {
        match self {
            DeclaredType::Scalar(kind) => kind.default_literal(),
            DeclaredType::Message(_) => "",
        }
    }
}

impl std::fmt::Display for DeclaredType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.type_name())
    }
}

/// How two fields at the same slot relate to each other
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldMatch {
    /// Type, name and nullability are identical
    Equal,
    /// One side has not been typed yet and at least one side is nullable
    AliasCompatible,
    /// Anything else, e.g. two different concrete types
    Incompatible,
}

/// Inferred signature of one array slot
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldSignature {
    /// Concrete type, absent while only nulls were observed at this slot
    pub declared_type: Option<DeclaredType>,

    /// Field name (`field<N>`, `msg<N>` or `none<N>`)
    pub name: String,

    /// 1-based index of the originating array slot
    pub position: usize,

    /// Whether a null has been observed at this slot
    pub nullable: bool,
}

impl FieldSignature {
    /// Field for a scalar sample value
    pub fn scalar(kind: ScalarKind, position: usize) -> Self {
        Self {
            declared_type: Some(DeclaredType::Scalar(kind)),
            name: format!("field{position}"),
            position,
            nullable: false,
        }
    }

    /// Field referencing a nested message
    pub fn message(message_name: impl Into<String>, position: usize) -> Self {
        Self {
            declared_type: Some(DeclaredType::Message(message_name.into())),
            name: format!("msg{position}"),
            position,
            nullable: false,
        }
    }

    /// Field for a null sample value
    pub fn missing(position: usize) -> Self {
        Self {
            declared_type: None,
            name: format!("none{position}"),
            position,
            nullable: true,
        }
    }

    /// Whether a concrete type is known
    pub fn is_typed(&self) -> bool {
        self.declared_type.is_some()
    }

    /// Type column of the rendered declaration; untyped slots render as `string`
    pub fn type_name(&self) -> &str {
        self.declared_type
            .as_ref()
            .map_or(ScalarKind::String.as_str(), DeclaredType::type_name)
    }

    /// Default literal used in the nullable annotation
    pub fn default_literal(&self) -> &'static str {
        self.declared_type
            .as_ref()
            .map_or("", DeclaredType::default_literal)
    }

    /// Compare a stored field against an incoming one at the same slot
    pub fn compare(&self, other: &FieldSignature) -> FieldMatch {
        if self == other {
            return FieldMatch::Equal;
        }

        let one_untyped = self.is_typed() != other.is_typed();
        if self.position == other.position && one_untyped && (self.nullable || other.nullable) {
            FieldMatch::AliasCompatible
        } else {
            FieldMatch::Incompatible
        }
    }

    /// Widen this stored field with an alias-compatible incoming field.
    ///
    /// A concrete type is adopted together with its name; a type is never
    /// dropped once known.
    pub fn widen(&mut self, incoming: &FieldSignature) {
        if let Some(declared_type) = &incoming.declared_type {
            self.declared_type = Some(declared_type.clone());
            self.name.clone_from(&incoming.name);
        }
        self.nullable = true;
    }

    /// Point this field at a renamed message
    pub(crate) fn retarget(&mut self, from: &str, to: &str) {
        if let Some(DeclaredType::Message(name)) = &mut self.declared_type {
            if name == from {
                *name = to.to_string();
            }
        }
    }
}

/// A canonical message type: an ordered list of field signatures
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageSignature {
    /// Message name
    pub name: String,

    /// Fields ordered by position
    pub fields: Vec<FieldSignature>,
}

impl MessageSignature {
    /// Create a new message signature
    pub fn new(name: impl Into<String>, fields: Vec<FieldSignature>) -> Self {
        Self {
            name: name.into(),
            fields,
        }
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the message has no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Field at a 1-based position
    pub fn field(&self, position: usize) -> Option<&FieldSignature> {
        position
            .checked_sub(1)
            .and_then(|index| self.fields.get(index))
    }

    /// Names of the messages this one references
    pub fn references(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().filter_map(|f| match &f.declared_type {
            Some(DeclaredType::Message(name)) => Some(name.as_str()),
            _ => None,
        })
    }
}
