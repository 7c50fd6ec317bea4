//! Input decoder module
//!
//! Supports: response envelopes, JSON, JSONL
//!
//! # Overview
//!
//! The decode module turns raw input bodies into sample arrays for the
//! schema builder. Envelopes follow the layout of array-encoded RPC
//! responses: a guard prefix, a payload line, and the sample itself stored
//! as a JSON-encoded string somewhere inside the payload.

mod decoders;
mod types;

pub use decoders::{decoder_for, EnvelopeDecoder, JsonDecoder, JsonlDecoder};
pub use types::{DecoderConfig, EnvelopeConfig, Sample, SampleDecoder, SampleFormat};
