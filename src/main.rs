//! labkit - lab write-up pipeline: front-matter, embeds, transcripts and
//! render-ready content blocks.

#![allow(dead_code)]

mod cli;
mod config;
mod lab;
mod logger;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::LabConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    let config = LabConfig::load(&cli)?;

    match &cli.command {
        Commands::Build { dry_run } => cli::build::build_labs(&config, *dry_run).map(|_| ()),
        Commands::Render { slug, output } => cli::render::run_render(&config, slug, output),
        Commands::List { tag, output } => cli::list::run_list(&config, tag.as_deref(), output),
    }
}
