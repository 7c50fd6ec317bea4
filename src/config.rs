//! Inference configuration
//!
//! Settings for one inference run, loaded from YAML. Every field has a
//! default, so an empty document is a valid configuration.
//!
//! ```yaml
//! package: google_flights
//! root_name: Main
//! input:
//!   format: envelope
//!   envelope:
//!     line: 2
//!     pointer: /0/2
//! output: top.proto
//! ```

use crate::decode::DecoderConfig;
use crate::error::{Error, Result};
use crate::output::ProtoOptions;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

static IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("valid identifier regex"));

static PACKAGE_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_.]*$").expect("valid package regex"));

// ============================================================================
// Top-Level Config
// ============================================================================

/// Complete inference configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InferConfig {
    /// Proto `syntax` statement
    pub syntax: String,

    /// Proto `package` statement
    pub package: String,

    /// Name given to the top-level message (empty = keep the allocated name)
    pub root_name: String,

    /// How samples are read from the input
    pub input: DecoderConfig,

    /// Where the rendered document is written (`-` = stdout)
    pub output: PathBuf,
}

impl Default for InferConfig {
    fn default() -> Self {
        let proto = ProtoOptions::default();
        Self {
            syntax: proto.syntax,
            package: proto.package,
            root_name: "Main".to_string(),
            input: DecoderConfig::default(),
            output: PathBuf::from("top.proto"),
        }
    }
}

impl InferConfig {
    /// Proto options for rendering
    pub fn proto_options(&self) -> ProtoOptions {
        ProtoOptions {
            syntax: self.syntax.clone(),
            package: self.package.clone(),
        }
    }

    /// Root message name, if renaming is enabled
    pub fn root_name(&self) -> Option<&str> {
        Some(self.root_name.as_str()).filter(|name| !name.is_empty())
    }

    /// Whether output goes to stdout
    pub fn writes_to_stdout(&self) -> bool {
        self.output.as_os_str() == "-"
    }

    /// Validate field values
    pub fn validate(&self) -> Result<()> {
        if self.syntax.is_empty() {
            return Err(Error::invalid_value("syntax", "cannot be empty"));
        }

        if !PACKAGE_NAME.is_match(&self.package) {
            return Err(Error::invalid_value(
                "package",
                format!("'{}' is not a valid package name", self.package),
            ));
        }

        if let Some(root) = self.root_name() {
            if !IDENTIFIER.is_match(root) {
                return Err(Error::invalid_value(
                    "root_name",
                    format!("'{root}' is not a valid message name"),
                ));
            }
        }

        if let Some(pointer) = &self.input.envelope.pointer {
            if !pointer.is_empty() && !pointer.starts_with('/') {
                return Err(Error::invalid_value(
                    "input.envelope.pointer",
                    format!("'{pointer}' must be empty or start with '/'"),
                ));
            }
        }

        if self.output.as_os_str().is_empty() {
            return Err(Error::invalid_value("output", "cannot be empty"));
        }

        Ok(())
    }
}

// ============================================================================
// Loading
// ============================================================================

/// Load a configuration file
pub fn load_config(path: impl AsRef<Path>) -> Result<InferConfig> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::FileNotFound {
                path: path.display().to_string(),
            }
        } else {
            Error::config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        }
    })?;
    load_config_from_str(&content)
}

/// Load a configuration from a YAML string
pub fn load_config_from_str(yaml: &str) -> Result<InferConfig> {
    // An empty document deserializes as null
    if yaml.trim().is_empty() {
        return Ok(InferConfig::default());
    }

    let config: InferConfig = serde_yaml::from_str(yaml)?;
    config.validate()?;
    Ok(config)
}
