//! CLI commands and argument parsing

use crate::decode::SampleFormat;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Infer protobuf message declarations from array-encoded samples
#[derive(Parser, Debug)]
#[command(name = "proto-shape")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, default_value = "proto")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Infer declarations and write them to a .proto file
    Infer {
        #[command(flatten)]
        input: InputArgs,

        /// Output file (`-` for stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Proto package name
        #[arg(long)]
        package: Option<String>,

        /// Name of the top-level message (empty keeps the generated name)
        #[arg(long)]
        root_name: Option<String>,
    },

    /// Infer declarations and report registry statistics
    Inspect {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Check that a rendered .proto file reads back cleanly
    Validate {
        /// Proto file to read
        proto: PathBuf,
    },
}

/// Input selection shared by `infer` and `inspect`
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Input files; all samples share one registry
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Input layout
    #[arg(long, value_enum)]
    pub input_format: Option<SampleFormat>,

    /// 0-based line holding the envelope payload
    #[arg(long)]
    pub line: Option<usize>,

    /// Use the whole body as the envelope payload
    #[arg(long, conflicts_with = "line")]
    pub whole_body: bool,

    /// JSON pointer to the sample inside the envelope payload
    #[arg(long)]
    pub pointer: Option<String>,

    /// Treat a JSON body as an array of samples
    #[arg(long)]
    pub records: bool,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Proto declarations
    Proto,
    /// Registry and reports as compact JSON
    Json,
    /// Registry and reports as indented JSON
    Pretty,
}
