//! Scalar type guessing for single sample values

use super::types::ScalarKind;
use serde_json::Value;

/// Classify a scalar sample value, or `None` when it has no scalar kind.
///
/// Booleans are tested before numbers.
pub fn classify(value: &Value) -> Option<ScalarKind> {
    match value {
        Value::String(_) => Some(ScalarKind::String),
        Value::Bool(_) => Some(ScalarKind::Bool),
        Value::Number(n) if n.is_i64() || n.is_u64() => Some(ScalarKind::Int32),
        Value::Number(_) => Some(ScalarKind::Double),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Infer the scalar kind of a sample value.
///
/// Unsupported values fall back to `int32` with a warning; this never fails.
pub fn infer(value: &Value) -> ScalarKind {
    classify(value).unwrap_or_else(|| {
        tracing::warn!(value = %value, "Unsupported sample value, falling back to int32");
        ScalarKind::Int32
    })
}
