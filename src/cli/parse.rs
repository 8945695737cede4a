//! CLI parse: clap types for rpmgen. No behavior; definitions only.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// rpmgen - Deep-learning lesson plan (RPM) generator
#[derive(Parser)]
#[command(name = "rpmgen")]
#[command(about = "Generate Indonesian deep-learning lesson plans (RPM) from a teacher's form")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root directory (where config/ is looked up)
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Disable logging entirely
    #[arg(long, default_value = "false", conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

/// Where the form comes from, plus command-line edits applied on top.
#[derive(Args, Debug, Clone, Default)]
pub struct FormArgs {
    /// Form file (.toml or .json); an empty form is used when omitted
    #[arg(long, short = 'i')]
    pub input: Option<PathBuf>,

    /// Set a form field, e.g. --set schoolName="SD Negeri 1" (repeatable)
    #[arg(long = "set", value_name = "FIELD=VALUE")]
    pub set: Vec<String>,

    /// Assign a practice to a session, e.g. --practice 2=PjBL (repeatable)
    #[arg(long = "practice", value_name = "SESSION=PRACTICE")]
    pub practice: Vec<String>,

    /// Select a graduate dimension, e.g. --dimension Kreativitas (repeatable)
    #[arg(long = "dimension", value_name = "DIMENSION")]
    pub dimension: Vec<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a lesson plan and render it
    Generate {
        #[command(flatten)]
        form: FormArgs,

        /// Write the document to this file instead of stdout
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Document format (html, text, json)
        #[arg(long, default_value = "html")]
        format: String,

        /// Signature date (YYYY-MM-DD); defaults to today
        #[arg(long)]
        date: Option<String>,
    },
    /// Print the instruction that would be sent, without calling the service
    Prompt {
        #[command(flatten)]
        form: FormArgs,
    },
    /// Check a form and show it as it would be submitted
    Validate {
        #[command(flatten)]
        form: FormArgs,
    },
    /// Print the response schema declared to the service
    Schema,
    /// List levels, grades, practices, dimensions and mood tags
    Options {
        /// Only show grades for this level (SD, SMP, SMA)
        #[arg(long)]
        level: Option<String>,
    },
    /// Fill in a form interactively and save it
    Form {
        /// Form file to write (.toml); printed to stdout when omitted
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },
}

impl Commands {
    /// Command name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Commands::Generate { .. } => "generate",
            Commands::Prompt { .. } => "prompt",
            Commands::Validate { .. } => "validate",
            Commands::Schema => "schema",
            Commands::Options { .. } => "options",
            Commands::Form { .. } => "form",
        }
    }
}
