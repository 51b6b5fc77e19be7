//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `sync`: Scan Twig views and make an XLIFF file mirror their trans keys
//! - `append`: Add the keys listed in a flat file to an existing XLIFF file
//! - `init`: Write a default configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

use crate::core::LanguagePair;

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
            Some(Command::Sync(cmd)) => cmd.args.common.verbose,
            Some(Command::Append(cmd)) => cmd.args.common.verbose,
            Some(Command::Init(_)) | None => false,
        }
    }
}

/// Common arguments shared by the `sync` and `append` commands.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Root directory of your web application
    pub app_path: PathBuf,

    /// Localization files directory, relative to the application root (default: locales)
    #[arg(long, alias = "locdir")]
    pub locales_dir: Option<PathBuf>,

    /// Do not change any file, print the resulting XLIFF to stdout instead
    #[arg(long)]
    pub dry: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Parser)]
pub struct SyncArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// XLIFF file to create or update (.xlf and .xliff are tried when no extension is given)
    pub document: PathBuf,

    /// Source/target languages used when creating a new file, e.g. en/fr (default: en/en)
    #[arg(long)]
    pub lang: Option<LanguagePair>,

    /// Twig views directory, relative to the application root (default: views)
    #[arg(long, alias = "twigdir")]
    pub views_dir: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct SyncCommand {
    #[command(flatten)]
    pub args: SyncArgs,
}

#[derive(Debug, Parser)]
pub struct AppendArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// File listing the keys to add, one per line
    pub source: PathBuf,

    /// Existing XLIFF file to update (.xlf and .xliff are tried when no extension is given)
    pub document: PathBuf,
}

#[derive(Debug, Args)]
pub struct AppendCommand {
    #[command(flatten)]
    pub args: AppendArgs,
}

#[derive(Debug, Args)]
pub struct InitCommand {
    /// Directory to write the configuration file to
    #[arg(default_value = ".")]
    pub app_path: PathBuf,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Add new trans keys found in Twig views to an XLIFF file and remove unused ones
    Sync(SyncCommand),
    /// Add the keys listed in a text file to an existing XLIFF file
    Append(AppendCommand),
    /// Initialize a new .xlfsyncrc.json configuration file
    Init(InitCommand),
}
