//! # Init Command
//!
//! This module implements the `init` subcommand: it scaffolds the two
//! configuration documents, keeps the local config out of version control,
//! and wires up a git pre-commit hook.

use std::process;

use anyhow::{Context, Result};
use clap::Args;

use crate::config::LOCAL_CONFIG_FILENAME;
use crate::logging::{ColorMode, init_tracing, set_quiet, set_verbose};
use crate::scaffold::{self, ScaffoldAction};
use crate::{git, info_log};

/// Arguments for the init command
#[derive(Args, Debug, Default)]
pub struct InitArgs {
  /// Overwrite existing configuration files and a foreign pre-commit hook
  #[arg(long)]
  pub force: bool,

  /// Skip installing the pre-commit hook
  #[arg(long)]
  pub no_hook: bool,

  /// Increase verbosity (-v info, -vv debug, -vvv trace)
  #[arg(short, long, action = clap::ArgAction::Count)]
  pub verbose: u8,

  /// Suppress all output except errors
  #[arg(short, long, conflicts_with = "verbose")]
  pub quiet: bool,

  /// Control when to use colored output (auto, never, always)
  #[arg(
    long,
    value_name = "WHEN",
    num_args = 0..=1,
    default_value_t = ColorMode::Auto,
    default_missing_value = "always",
    value_enum
  )]
  pub colors: ColorMode,
}

/// Run the init command with the given arguments
pub fn run_init(args: InitArgs) -> Result<()> {
  init_tracing(args.quiet, args.verbose);

  if args.verbose > 0 {
    set_verbose();
  } else if args.quiet {
    set_quiet();
  }
  args.colors.apply();

  let current_dir = std::env::current_dir().with_context(|| "Failed to get current directory")?;
  let project_root = git::discover_repo_root(&current_dir).unwrap_or(current_dir);

  let total_steps = if args.no_hook { 2 } else { 3 };

  info_log!("1/{} - Writing configuration files...", total_steps);
  let actions = scaffold::write_config_templates(&project_root, args.force)?;
  for action in &actions {
    match action {
      ScaffoldAction::Written(path) => info_log!("  Created {}", path.display()),
      ScaffoldAction::Kept(path) => info_log!("  Kept existing {}", path.display()),
    }
  }

  info_log!("2/{} - Updating .gitignore...", total_steps);
  match scaffold::ensure_gitignore_entry(&project_root) {
    Ok(true) => info_log!("  Added {} to .gitignore", LOCAL_CONFIG_FILENAME),
    Ok(false) => info_log!("  .gitignore already up to date"),
    Err(e) => {
      // Not fatal: headers still work, the local config is just at risk of
      // being committed.
      eprintln!(
        "Warning: could not update .gitignore ({e:#}); add \"{}\" manually",
        LOCAL_CONFIG_FILENAME
      );
    }
  }

  if !args.no_hook {
    info_log!("3/{} - Installing pre-commit hook...", total_steps);
    match scaffold::install_pre_commit_hook(&project_root, args.force) {
      Ok(hook_path) => info_log!("  Installed {}", hook_path.display()),
      Err(e) => {
        eprintln!("ERROR: {e:#}");
        process::exit(1);
      }
    }
  }

  info_log!("");
  info_log!("auto-header setup complete.");
  info_log!("  Edit '{}' with your name and email.", LOCAL_CONFIG_FILENAME);
  if !args.no_hook {
    info_log!("  Headers will be updated automatically on commit.");
  }

  Ok(())
}
