//! # auto-header
//!
//! A tool that maintains author/created/last-modified comment headers in
//! source files, run as a git pre-commit hook.

use anyhow::Result;
use auto_header::cli::{Cli, Command, run_init, run_update};

fn main() -> Result<()> {
  let cli = Cli::parse_args();

  match cli.command {
    Command::Init(args) => run_init(args),
    Command::Run(args) => run_update(args),
  }
}
