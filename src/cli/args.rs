//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Lab write-up pipeline: normalize, index and render labs
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Print debug messages
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Content root (overrides `content.root`, relative to cwd)
    #[arg(short, long, global = true, value_hint = clap::ValueHint::DirPath)]
    pub root: Option<PathBuf>,

    /// Config file path (default: labkit.toml)
    #[arg(short = 'C', long, global = true, default_value = "labkit.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Normalize every lab in place and write labs.json and index.json
    #[command(visible_alias = "b")]
    Build {
        /// Report what would change without writing anything
        #[arg(short = 'n', long)]
        dry_run: bool,
    },

    /// Print one lab as render-ready JSON blocks
    #[command(visible_alias = "r")]
    Render {
        /// Lab slug (folder name under the content root)
        slug: String,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Print lab cards from the slug index
    #[command(visible_alias = "l")]
    List {
        /// Only labs carrying this tag (case-insensitive)
        #[arg(short, long)]
        tag: Option<String>,

        #[command(flatten)]
        output: OutputArgs,
    },
}

/// JSON output options shared by `render` and `list`.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct OutputArgs {
    /// Pretty-print JSON output
    #[arg(short, long)]
    pub pretty: bool,

    /// Write output to file instead of stdout
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,
}
