use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Command line interface for obmd
#[derive(Parser, Debug)]
#[command(
  author,
  version,
  about = "obmd: Obsidian notes to blog-ready HTML"
)]
pub struct Cli {
  /// Subcommand to execute (see [`Commands`])
  #[command(subcommand)]
  pub command: Commands,

  /// Enable verbose debug logging
  #[arg(short, long, global = true)]
  pub verbose: bool,

  /// Path to configuration file(s) (TOML or JSON, can be specified multiple
  /// times). Multiple files are merged in order, with later files overriding
  /// earlier ones
  #[arg(
    short = 'c',
    long = "config-file",
    global = true,
    action = clap::ArgAction::Append
  )]
  pub config_files: Vec<PathBuf>,

  /// Override configuration values (KEY=VALUE format, can be used multiple
  /// times)
  #[arg(long = "config", global = true, action = clap::ArgAction::Append)]
  pub config_overrides: Vec<String>,
}

/// All supported subcommands for the obmd CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
  /// Initialize a new obmd configuration file
  Init {
    /// Path to create the configuration file at
    #[arg(short, long, default_value = "obmd.toml")]
    output: PathBuf,

    /// Format of the configuration file.
    #[arg(short = 'F', long, default_value = "toml", value_parser = ["toml", "json"])]
    format: String,

    /// Force overwrite if file already exists
    #[arg(short, long)]
    force: bool,
  },

  /// Render a markdown note to HTML.
  Render {
    /// Markdown note to render.
    input: PathBuf,

    /// Output file. Writes to stdout when omitted.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format: bare HTML, or JSON with title and frontmatter.
    #[arg(short = 'F', long, default_value = "html", value_parser = ["html", "json"])]
    format: String,

    /// Wrap the rendered HTML in a `<div>` with this class.
    #[arg(long)]
    wrap_class: Option<String>,
  },
}

impl Cli {
  /// Parse command line arguments into a [`Cli`] struct.
  #[must_use]
  pub fn parse_args() -> Self {
    Self::parse()
  }
}
