use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use super::colors::{ColorMode, Colors, ThemeMode};

#[derive(Parser, Debug)]
#[command(name = "oas3-provider-gen")]
#[command(author, version, about = "Derives provider resource projections from an OpenAPI resource model")]
#[command(styles = Colors::clap_styles())]
pub struct Cli {
  #[command(subcommand)]
  pub command: Commands,

  /// Control color output
  #[arg(long, value_enum, default_value = "auto", global = true)]
  pub color: ColorMode,

  /// Terminal theme (dark or light background)
  #[arg(long, value_enum, default_value = "auto", global = true)]
  pub theme: ThemeMode,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
  /// List information from the OpenAPI document
  List {
    #[command(subcommand)]
    list_command: ListCommands,
  },
  /// Generate resource projections
  Generate(GenerateCommand),
}

#[derive(Args, Debug, Clone)]
pub struct GenerateCommand {
  /// Resource path template to generate (e.g. /users/{user-id}); all known resources when omitted
  #[arg(value_name = "RESOURCE_PATH")]
  pub resource_path: Option<String>,

  /// Path to the OpenAPI document (JSON or YAML)
  #[arg(short, long, value_name = "FILE")]
  pub input: PathBuf,

  /// Directory the rendered projections are written to
  #[arg(short, long, value_name = "DIR", default_value = "generated")]
  pub output: PathBuf,

  /// JSON file of per-resource overrides, keyed by resource path
  #[arg(long, value_name = "FILE")]
  pub augment: Option<PathBuf>,

  /// Enable verbose output with per-resource detail
  #[arg(short, long, default_value_t = false)]
  pub verbose: bool,

  /// Suppress non-essential output (failures only)
  #[arg(short, long, default_value_t = false, conflicts_with = "verbose")]
  pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum ListCommands {
  /// List the known resource paths with their names and behavior modes
  Resources {
    /// Path to the OpenAPI document (JSON or YAML)
    #[arg(short, long, value_name = "FILE")]
    input: PathBuf,
  },
}
