//! CLI module - command-line interface definitions and handlers.
//!
//! Uses clap v4 with derive macros for argument parsing.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::import::ImportFormat;

pub mod commands;

/// Guidesmith - import CSV and Markdown outlines into ordered onboarding guides
#[derive(Parser, Debug)]
#[command(name = "guidesmith")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable JSON output for machine consumption
    #[arg(long, global = true)]
    pub robot: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Config file path (default: ~/.config/guidesmith/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Database file path (default: platform data dir, or GUIDESMITH_DB)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage guides
    #[command(subcommand)]
    Guide(GuideCommand),

    /// Import a CSV or Markdown outline into a guide
    Import(ImportArgs),
}

#[derive(Subcommand, Debug)]
pub enum GuideCommand {
    /// Create a new, empty guide
    Create(GuideCreateArgs),
    /// List all guides
    List,
    /// Show a guide's flow boxes and steps
    Show(GuideShowArgs),
}

#[derive(Args, Debug)]
pub struct GuideCreateArgs {
    /// Guide title
    pub title: String,
}

#[derive(Args, Debug)]
pub struct GuideShowArgs {
    /// Guide identifier
    pub guide: i64,
}

#[derive(Args, Debug)]
pub struct ImportArgs {
    /// Target guide identifier
    #[arg(long)]
    pub guide: i64,

    /// Input file; reads stdin when omitted
    pub file: Option<PathBuf>,

    /// Input format; guessed from the file extension when omitted
    #[arg(long, value_enum)]
    pub format: Option<FormatArg>,

    /// Parse and report without writing anything
    #[arg(long)]
    pub dry_run: bool,
}

/// CLI-facing format choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum FormatArg {
    Csv,
    Markdown,
}

impl From<FormatArg> for ImportFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Csv => Self::Csv,
            FormatArg::Markdown => Self::Markdown,
        }
    }
}
