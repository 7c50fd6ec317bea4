//! Decoder types and traits
//!
//! Defines the core decoder abstractions.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One sample array
pub type Sample = Vec<Value>;

/// Layout of the input body
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum SampleFormat {
    /// A response envelope holding one (possibly JSON-encoded) sample
    #[default]
    Envelope,
    /// Plain JSON: one sample, or an array of samples
    Json,
    /// JSON Lines: one sample per line
    Jsonl,
}

/// Where the sample sits inside an envelope body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvelopeConfig {
    /// 0-based line holding the JSON payload (`None` = whole body)
    pub line: Option<usize>,

    /// JSON pointer to the sample inside the payload (`None` = payload itself)
    pub pointer: Option<String>,

    /// Decode the selected value again when it is a JSON-encoded string
    pub unwrap_strings: bool,
}

impl Default for EnvelopeConfig {
    fn default() -> Self {
        // Third line after the `)]}'` guard and a blank line, then `[0][2]`
        Self {
            line: Some(2),
            pointer: Some("/0/2".to_string()),
            unwrap_strings: true,
        }
    }
}

impl EnvelopeConfig {
    /// Envelope config that takes the whole body as the payload
    pub fn whole_body() -> Self {
        Self {
            line: None,
            pointer: None,
            unwrap_strings: true,
        }
    }

    /// Set the payload line
    #[must_use]
    pub fn with_line(mut self, line: Option<usize>) -> Self {
        self.line = line;
        self
    }

    /// Set the JSON pointer
    #[must_use]
    pub fn with_pointer(mut self, pointer: Option<String>) -> Self {
        self.pointer = pointer;
        self
    }
}

/// Configuration for decoding input bodies
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecoderConfig {
    /// Input format
    pub format: SampleFormat,

    /// Envelope location (envelope format only)
    pub envelope: EnvelopeConfig,

    /// Treat a JSON body as an array of samples (json format only)
    pub records: bool,
}

impl DecoderConfig {
    /// Envelope decoder config
    pub fn envelope(envelope: EnvelopeConfig) -> Self {
        Self {
            format: SampleFormat::Envelope,
            envelope,
            ..Default::default()
        }
    }

    /// JSON decoder config
    pub fn json(records: bool) -> Self {
        Self {
            format: SampleFormat::Json,
            records,
            ..Default::default()
        }
    }

    /// JSONL decoder config
    pub fn jsonl() -> Self {
        Self {
            format: SampleFormat::Jsonl,
            ..Default::default()
        }
    }
}

/// Trait for decoding input bodies into sample arrays
pub trait SampleDecoder: Send + Sync {
    /// Decode the body into samples, in input order
    fn decode(&self, body: &str) -> Result<Vec<Sample>>;
}
