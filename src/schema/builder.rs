//! Turning sample arrays into registered message shapes

use super::guess;
use super::registry::SchemaRegistry;
use super::types::{FieldSignature, MessageSignature};
use serde_json::Value;

/// Build the message for one sample array.
///
/// Nested arrays are registered before the message that references them.
/// The returned entry may be an existing one, possibly widened by this call.
pub fn build<'r>(registry: &'r mut SchemaRegistry, sample: &[Value]) -> &'r MessageSignature {
    build_counting(registry, sample, &mut 0)
}

fn build_counting<'r>(
    registry: &'r mut SchemaRegistry,
    sample: &[Value],
    fallbacks: &mut usize,
) -> &'r MessageSignature {
    let fields: Vec<FieldSignature> = sample
        .iter()
        .enumerate()
        .map(|(index, value)| build_field(registry, index + 1, value, fallbacks))
        .collect();

    registry.resolve(fields)
}

fn build_field(
    registry: &mut SchemaRegistry,
    position: usize,
    value: &Value,
    fallbacks: &mut usize,
) -> FieldSignature {
    match value {
        Value::Array(nested) => {
            let nested = build_counting(registry, nested, fallbacks);
            FieldSignature::message(nested.name.clone(), position)
        }
        Value::Null => FieldSignature::missing(position),
        other => {
            if guess::classify(other).is_none() {
                *fallbacks += 1;
            }
            FieldSignature::scalar(guess::infer(other), position)
        }
    }
}

/// Builds many samples against one registry so similar records unify
#[derive(Debug, Clone, Default)]
pub struct ShapeBuilder {
    registry: SchemaRegistry,
    samples: usize,
    fallbacks: usize,
}

impl ShapeBuilder {
    /// Create a builder with an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Continue building on an existing registry
    pub fn with_registry(registry: SchemaRegistry) -> Self {
        Self {
            registry,
            ..Self::default()
        }
    }

    /// Build one top-level sample
    pub fn build(&mut self, sample: &[Value]) -> &MessageSignature {
        self.samples += 1;
        build_counting(&mut self.registry, sample, &mut self.fallbacks)
    }

    /// Build every sample in order, returning the message name of each
    pub fn build_all<'a, I>(&mut self, samples: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a Vec<Value>>,
    {
        samples
            .into_iter()
            .map(|sample| self.build(sample).name.clone())
            .collect()
    }

    /// Number of top-level samples built so far
    pub fn sample_count(&self) -> usize {
        self.samples
    }

    /// Number of values that fell back to `int32`
    pub fn fallback_count(&self) -> usize {
        self.fallbacks
    }

    /// The registry built so far
    pub fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }

    /// Mutable access to the registry, e.g. to rename the root message
    pub fn registry_mut(&mut self) -> &mut SchemaRegistry {
        &mut self.registry
    }

    /// Finish building and take the registry
    pub fn into_registry(self) -> SchemaRegistry {
        self.registry
    }
}
