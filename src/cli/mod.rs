//! # CLI Module
//!
//! This module contains the command-line interface implementation.
//! It uses clap for argument parsing with two subcommands: `init` scaffolds
//! a project and `run` is the pre-commit hook entry point.

mod init;
mod run;

use clap::builder::styling::{AnsiColor, Color, Style, Styles};
use clap::{Parser, Subcommand};
pub use init::{InitArgs, run_init};
pub use run::{RunArgs, run_update};

const CUSTOM_STYLES: Styles = Styles::styled()
  .header(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))).bold())
  .usage(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))).bold())
  .literal(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Blue))).bold())
  .placeholder(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Cyan))))
  .error(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Red))).bold())
  .valid(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))))
  .invalid(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Yellow))));

/// Top-level CLI arguments
#[derive(Parser, Debug)]
#[command(
  author,
  version,
  about,
  styles = CUSTOM_STYLES,
  after_help = "Examples:
  # Scaffold config files and install the pre-commit hook
  auto-header init

  # Update headers in specific files (what the hook runs)
  auto-header run src/app.js src/util.js

  # Process a directory recursively
  auto-header run src/

  # Preview without writing, with a diff of the changes
  auto-header run --dry-run --show-diff src/**/*.ts

  # Save the consolidated diff of a dry run to a file
  auto-header run --dry-run --save-diff changes.diff src/
",
  help_template = "{before-help}{name} v{version}
{about-section}
{usage-heading} {usage}

{all-args}{after-help}
"
)]
pub struct Cli {
  #[command(subcommand)]
  pub command: Command,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
  /// Scaffold configuration and the pre-commit hook into the current project
  Init(InitArgs),
  /// Update headers in the given files (the pre-commit hook entry point)
  Run(RunArgs),
}

impl Cli {
  /// Parse CLI arguments and return the Cli struct
  pub fn parse_args() -> Self {
    Self::parse()
  }
}
