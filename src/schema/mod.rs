//! Schema inference module
//!
//! Infers protobuf-style message shapes from array-encoded samples.
//!
//! # Features
//!
//! - **Type Guessing**: Classifies scalar values as string, bool, int32 or double
//! - **Shape Building**: Turns sample arrays into positional field lists, nested arrays first
//! - **Deduplication**: Identical shapes resolve to one canonical message
//! - **Null Merging**: Shapes that differ only by nulls are widened into one message
//! - **Deterministic Naming**: Messages are named by creation order, not content

mod builder;
mod guess;
mod naming;
mod registry;
mod types;

pub use builder::{build, ShapeBuilder};
pub use guess::{classify, infer};
pub use naming::allocate;
pub use registry::{RegistryStats, Resolution, SchemaRegistry, SharedRegistry};
pub use types::{DeclaredType, FieldMatch, FieldSignature, MessageSignature, ScalarKind};

#[cfg(test)]
mod tests;
