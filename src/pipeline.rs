//! End-to-end inference: decoded samples in, named registry out

use crate::config::InferConfig;
use crate::decode::{decoder_for, Sample};
use crate::error::Result;
use crate::output::{render_schema, ProtoOptions};
use crate::schema::{RegistryStats, SchemaRegistry, ShapeBuilder};
use serde::Serialize;

/// Result of one inference run
#[derive(Debug, Clone)]
pub struct Inference {
    /// Every message inferred, in creation order
    pub registry: SchemaRegistry,

    /// Name of the top-level message, when all samples resolved to one
    pub root: Option<String>,

    /// Number of top-level samples consumed
    pub samples: usize,

    /// Number of values that fell back to `int32`
    pub fallbacks: usize,
}

/// Summary printed by `inspect`
#[derive(Debug, Clone, Serialize)]
pub struct InferenceSummary {
    pub samples: usize,
    pub messages: usize,
    pub root: Option<String>,
    pub fallbacks: usize,
    pub resolutions: RegistryStats,
}

impl Inference {
    /// Render the registry as a proto document
    pub fn render(&self, options: &ProtoOptions) -> String {
        render_schema(&self.registry, options)
    }

    /// Counts describing the run
    pub fn summary(&self) -> InferenceSummary {
        InferenceSummary {
            samples: self.samples,
            messages: self.registry.len(),
            root: self.root.clone(),
            fallbacks: self.fallbacks,
            resolutions: self.registry.stats(),
        }
    }
}

/// Build every sample against one registry and rename the top-level message
pub fn infer_samples(samples: &[Sample], root_name: Option<&str>) -> Inference {
    let mut builder = ShapeBuilder::new();
    let mut tops = builder.build_all(samples);
    tops.sort();
    tops.dedup();

    let mut root = match tops.as_slice() {
        [single] => Some(single.clone()),
        [] => None,
        many => {
            tracing::warn!(
                count = many.len(),
                "Samples resolved to several top-level messages, root left unnamed"
            );
            None
        }
    };

    if let (Some(current), Some(wanted)) = (root.clone(), root_name) {
        if builder.registry_mut().rename(&current, wanted) {
            root = Some(wanted.to_string());
        } else {
            tracing::warn!(from = %current, to = wanted, "Could not rename root message");
        }
    }

    tracing::info!(
        samples = builder.sample_count(),
        messages = builder.registry().len(),
        "Inference finished"
    );

    Inference {
        samples: builder.sample_count(),
        fallbacks: builder.fallback_count(),
        registry: builder.into_registry(),
        root,
    }
}

/// Decode a body with the configured decoder and infer its samples
pub fn infer_body(body: &str, config: &InferConfig) -> Result<Inference> {
    let samples = decoder_for(&config.input).decode(body)?;
    Ok(infer_samples(&samples, config.root_name()))
}

/// Decode several bodies and infer all their samples with one registry
pub fn infer_bodies<'a, I>(bodies: I, config: &InferConfig) -> Result<Inference>
where
    I: IntoIterator<Item = &'a str>,
{
    let decoder = decoder_for(&config.input);
    let mut samples = Vec::new();
    for body in bodies {
        samples.extend(decoder.decode(body)?);
    }
    Ok(infer_samples(&samples, config.root_name()))
}
