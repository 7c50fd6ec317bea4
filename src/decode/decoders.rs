//! Decoder implementations
//!
//! Each decoder handles a specific input layout.

use super::types::{DecoderConfig, EnvelopeConfig, Sample, SampleDecoder, SampleFormat};
use crate::error::{Error, Result};
use serde_json::Value;

/// Guard line some servers prepend to JSON responses
const XSSI_PREFIX: &str = ")]}'";

/// Build the decoder described by a config
pub fn decoder_for(config: &DecoderConfig) -> Box<dyn SampleDecoder> {
    match config.format {
        SampleFormat::Envelope => Box::new(EnvelopeDecoder::new(config.envelope.clone())),
        SampleFormat::Json => Box::new(JsonDecoder::new(config.records)),
        SampleFormat::Jsonl => Box::new(JsonlDecoder::new()),
    }
}

fn parse_json(text: &str, what: &str) -> Result<Value> {
    serde_json::from_str(text.trim())
        .map_err(|e| Error::decode(format!("Failed to parse {what} as JSON: {e}")))
}

fn into_sample(value: Value) -> Result<Sample> {
    match value {
        Value::Array(items) => Ok(items),
        other => Err(Error::not_a_sample(&other)),
    }
}

// ============================================================================
// Envelope Decoder
// ============================================================================

/// Extracts one sample from a response envelope
#[derive(Debug, Clone, Default)]
pub struct EnvelopeDecoder {
    config: EnvelopeConfig,
}

impl EnvelopeDecoder {
    /// Create an envelope decoder
    pub fn new(config: EnvelopeConfig) -> Self {
        Self { config }
    }

    fn payload<'a>(&self, body: &'a str) -> Result<&'a str> {
        match self.config.line {
            Some(line) => body.lines().nth(line).ok_or_else(|| {
                Error::decode(format!(
                    "Input has {} lines, payload expected on line {line}",
                    body.lines().count()
                ))
            }),
            None => Ok(strip_xssi_prefix(body)),
        }
    }
}

impl SampleDecoder for EnvelopeDecoder {
    fn decode(&self, body: &str) -> Result<Vec<Sample>> {
        let payload = parse_json(self.payload(body)?, "envelope payload")?;

        let selected = match &self.config.pointer {
            Some(pointer) => payload
                .pointer(pointer)
                .ok_or_else(|| Error::decode(format!("Pointer '{pointer}' not found in payload")))?,
            None => &payload,
        };

        let sample = match selected {
            Value::String(embedded) if self.config.unwrap_strings => {
                parse_json(embedded, "embedded sample")?
            }
            other => other.clone(),
        };

        Ok(vec![into_sample(sample)?])
    }
}

/// Drop a leading `)]}'` guard line if present
fn strip_xssi_prefix(body: &str) -> &str {
    let trimmed = body.trim_start();
    match trimmed.strip_prefix(XSSI_PREFIX) {
        Some(rest) => rest,
        None => trimmed,
    }
}

// ============================================================================
// JSON Decoder
// ============================================================================

/// Plain JSON decoder
#[derive(Debug, Clone, Default)]
pub struct JsonDecoder {
    /// Body is an array of samples rather than a single sample
    records: bool,
}

impl JsonDecoder {
    /// Create a JSON decoder
    pub fn new(records: bool) -> Self {
        Self { records }
    }
}

impl SampleDecoder for JsonDecoder {
    fn decode(&self, body: &str) -> Result<Vec<Sample>> {
        let value = parse_json(body, "body")?;
        if self.records {
            into_sample(value)?.into_iter().map(into_sample).collect()
        } else {
            Ok(vec![into_sample(value)?])
        }
    }
}

// ============================================================================
// JSONL Decoder
// ============================================================================

/// JSON Lines decoder (one sample array per line)
#[derive(Debug, Clone, Default)]
pub struct JsonlDecoder;

impl JsonlDecoder {
    /// Create a new JSONL decoder
    pub fn new() -> Self {
        Self
    }
}

impl SampleDecoder for JsonlDecoder {
    fn decode(&self, body: &str) -> Result<Vec<Sample>> {
        let mut samples = Vec::new();

        for (line_num, line) in body.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let value = parse_json(line, &format!("line {}", line_num + 1))?;
            samples.push(into_sample(value)?);
        }

        Ok(samples)
    }
}
