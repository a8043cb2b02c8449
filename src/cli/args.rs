//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `extract`: Collect translation keys from sources and write merged locale files
//! - `init`: Initialize glean configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Extract(cmd)) => cmd.args.common.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

/// Common arguments shared by all commands.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Source code root directory (overrides config file)
    #[arg(long)]
    pub source_root: Option<PathBuf>,

    /// Directory of the existing locale JSON files (overrides config file)
    #[arg(long)]
    pub locales_path: Option<PathBuf>,

    /// Enable verbose output (also turns off `silent`)
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Parser)]
pub struct ExtractArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Output directory for merged locale files (default: <locales-path>/parsed)
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Base language used as fallback (overrides config file)
    #[arg(long)]
    pub base_lang: Option<String>,

    /// Translation function name, can be specified multiple times:
    /// --fn-name t --fn-name translate
    #[arg(long = "fn-name")]
    pub fn_names: Vec<String>,

    /// Merge and report without writing any file
    #[arg(long)]
    pub dry_run: bool,

    /// Exit with status 1 when translation calls with non-literal keys are found
    #[arg(long)]
    pub strict: bool,
}

#[derive(Debug, Args)]
pub struct ExtractCommand {
    #[command(flatten)]
    pub args: ExtractArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract translation keys and merge them into per-locale JSON files
    Extract(ExtractCommand),
    /// Initialize a new .gleanrc.json configuration file
    Init,
}
