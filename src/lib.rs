// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::match_wildcard_for_single_variants)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # proto-shape
//!
//! Infers protobuf message declarations from example arrays, as found in
//! undocumented array-encoded RPC responses.
//!
//! ## Features
//!
//! - **Shape Unification**: Structurally identical arrays resolve to one message
//! - **Null Merging**: A slot seen as null in one sample and typed in another becomes nullable
//! - **Nested Messages**: Nested arrays become their own messages, registered first
//! - **Deterministic Names**: `MsgZero`, `MsgOne`, ... by creation order
//! - **Envelope Decoding**: Pulls JSON-encoded samples out of response envelopes
//!
//! ## Quick Start
//!
//! ```rust
//! use proto_shape::output::{render_schema, ProtoOptions};
//! use proto_shape::schema::{build, SchemaRegistry};
//! use serde_json::json;
//!
//! let mut registry = SchemaRegistry::new();
//! for sample in [json!([1, null, [2, 3]]), json!([1, "x", [4, 5]])] {
//!     if let serde_json::Value::Array(items) = sample {
//!         build(&mut registry, &items);
//!     }
//! }
//!
//! assert_eq!(registry.len(), 2);
//! let proto = render_schema(&registry, &ProtoOptions::default());
//! assert!(proto.contains("string field2 = 2 [(nullable) = ''];"));
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────┐   ┌──────────────────────────────────────────┐   ┌──────────┐
//! │  Decode  │   │                 Schema                   │   │  Output  │
//! ├──────────┤   ├──────────────┬─────────────┬─────────────┤   ├──────────┤
//! │ Envelope │──▶│ ShapeBuilder │ TypeGuesser │   Naming    │──▶│ Render   │
//! │ JSON     │   │      │       └─────────────┴─────────────┤   │ Parse    │
//! │ JSONL    │   │      └──▶ SchemaRegistry (dedup + merge)  │   │ Write    │
//! └──────────┘   └──────────────────────────────────────────┘   └──────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Shape inference and the schema registry
pub mod schema;

/// Sample extraction from raw inputs
pub mod decode;

/// Proto rendering, parsing and writing
pub mod output;

/// YAML configuration
pub mod config;

/// End-to-end inference runs
pub mod pipeline;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use pipeline::{infer_body, infer_samples, Inference};
pub use schema::{MessageSignature, SchemaRegistry, ShapeBuilder};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
