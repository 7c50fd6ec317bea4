//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, InputArgs, OutputFormat};
use crate::config::{load_config, InferConfig};
use crate::error::{Error, Result, ResultExt};
use crate::output::{parse_document, registry_to_json, write_proto};
use crate::pipeline::{infer_bodies, Inference};
use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Infer {
                input,
                output,
                package,
                root_name,
            } => self.infer(input, output.as_ref(), package.as_deref(), root_name.as_deref()),
            Commands::Inspect { input } => self.inspect(input),
            Commands::Validate { proto } => self.validate(proto),
        }
    }

    /// Load configuration
    fn load_config(&self) -> Result<InferConfig> {
        match &self.cli.config {
            Some(path) => load_config(path),
            None => Ok(InferConfig::default()),
        }
    }

    /// Run inference over the input files
    fn run_inference(&self, config: &InferConfig, input: &InputArgs) -> Result<Inference> {
        let bodies = read_inputs(&input.inputs)?;
        infer_bodies(bodies.iter().map(String::as_str), config)
    }

    /// Infer and write declarations
    fn infer(
        &self,
        input: &InputArgs,
        output: Option<&PathBuf>,
        package: Option<&str>,
        root_name: Option<&str>,
    ) -> Result<()> {
        let mut config = self.load_config()?;
        apply_input_args(&mut config, input);
        if let Some(output) = output {
            config.output.clone_from(output);
        }
        if let Some(package) = package {
            config.package = package.to_string();
        }
        if let Some(root_name) = root_name {
            config.root_name = root_name.to_string();
        }
        config.validate()?;

        let inference = self.run_inference(&config, input)?;

        let content = match self.cli.format {
            OutputFormat::Proto => inference.render(&config.proto_options()),
            OutputFormat::Json | OutputFormat::Pretty => registry_to_json(&inference.registry)?,
        };

        if config.writes_to_stdout() {
            print!("{content}");
        } else {
            write_proto(&config.output, &content)?;
            self.output_message(&json!({
                "type": "WRITTEN",
                "path": config.output.display().to_string(),
                "messages": inference.registry.len(),
                "root": inference.root,
            }));
        }

        Ok(())
    }

    /// Infer and report statistics
    fn inspect(&self, input: &InputArgs) -> Result<()> {
        let mut config = self.load_config()?;
        apply_input_args(&mut config, input);
        config.validate()?;

        let inference = self.run_inference(&config, input)?;
        let summary = serde_json::to_value(inference.summary())?;

        self.output_message(&json!({
            "type": "SUMMARY",
            "summary": summary,
        }));

        Ok(())
    }

    /// Validate a rendered proto file
    fn validate(&self, proto: &Path) -> Result<()> {
        let content = read_file(proto)?;
        let doc = parse_document(&content).with_context(|| format!("{}", proto.display()))?;

        self.output_message(&json!({
            "type": "VALID",
            "syntax": doc.syntax,
            "package": doc.package,
            "messages": doc.messages.len(),
            "fields": doc.field_count(),
        }));

        Ok(())
    }

    /// Output a message
    fn output_message(&self, msg: &Value) {
        match self.cli.format {
            OutputFormat::Proto | OutputFormat::Json => {
                println!("{}", serde_json::to_string(msg).unwrap_or_default());
            }
            OutputFormat::Pretty => {
                println!("{}", serde_json::to_string_pretty(msg).unwrap_or_default());
            }
        }
    }
}

/// Override config values with command-line input flags
fn apply_input_args(config: &mut InferConfig, input: &InputArgs) {
    if let Some(format) = input.input_format {
        config.input.format = format;
    }
    if input.whole_body {
        config.input.envelope.line = None;
    } else if let Some(line) = input.line {
        config.input.envelope.line = Some(line);
    }
    if let Some(pointer) = &input.pointer {
        config.input.envelope.pointer = Some(pointer.clone()).filter(|p| !p.is_empty());
    }
    if input.records {
        config.input.records = true;
    }
}

fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::FileNotFound {
                path: path.display().to_string(),
            }
        } else {
            Error::Io(e)
        }
    })
}

fn read_inputs(paths: &[PathBuf]) -> Result<Vec<String>> {
    paths
        .iter()
        .map(|path| {
            tracing::info!(path = %path.display(), "Reading samples");
            read_file(path)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::SampleFormat;
    use clap::Parser;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    fn input_args(args: &[&str]) -> InputArgs {
        let mut argv = vec!["proto-shape", "inspect"];
        argv.extend_from_slice(args);
        match Cli::parse_from(argv).command {
            Commands::Inspect { input } => input,
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_apply_input_args() {
        let mut config = InferConfig::default();
        apply_input_args(
            &mut config,
            &input_args(&["a.txt", "--input-format", "json", "--records", "--pointer", ""]),
        );

        assert_eq!(config.input.format, SampleFormat::Json);
        assert!(config.input.records);
        assert_eq!(config.input.envelope.pointer, None);
    }

    #[test]
    fn test_apply_whole_body() {
        let mut config = InferConfig::default();
        apply_input_args(&mut config, &input_args(&["a.txt", "--whole-body"]));
        assert_eq!(config.input.envelope.line, None);

        apply_input_args(&mut config, &input_args(&["a.txt", "--line", "4"]));
        assert_eq!(config.input.envelope.line, Some(4));
    }

    #[test]
    fn test_infer_writes_file() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("samples.jsonl");
        let output = dir.path().join("out").join("top.proto");
        fs::write(&input, "[1, null]\n[1, \"x\"]\n").unwrap();

        let cli = Cli::parse_from([
            "proto-shape",
            "infer",
            input.to_str().unwrap(),
            "--input-format",
            "jsonl",
            "--package",
            "flights",
            "--output",
            output.to_str().unwrap(),
        ]);
        Runner::new(cli).run().unwrap();

        let written = fs::read_to_string(&output).unwrap();
        assert_eq!(
            written,
            "syntax = \"proto3\";\n\npackage flights;\n\nmessage Main {\n\tint32 field1 = 1;\n\tstring field2 = 2 [(nullable) = ''];\n}\n"
        );
    }

    #[test]
    fn test_validate_reports_missing_file() {
        let cli = Cli::parse_from(["proto-shape", "validate", "/no/such/file.proto"]);
        let err = Runner::new(cli).run().unwrap_err();
        assert!(matches!(err, Error::FileNotFound { .. }));
    }

    #[test]
    fn test_infer_rejects_invalid_package() {
        let cli = Cli::parse_from(["proto-shape", "infer", "a.txt", "--package", "bad name"]);
        let err = Runner::new(cli).run().unwrap_err();
        assert!(matches!(err, Error::InvalidConfigValue { .. }));
    }
}
