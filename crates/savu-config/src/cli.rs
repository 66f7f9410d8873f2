use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use savu_core::plugin_list::{DisplayLevel, Verbosity};

/// savu-config: inspect and complete Savu plugin lists
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// Framework configuration file (.json, .yaml or .toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the steps of a plugin list
    List(ListArgs),
    /// Validate a plugin list and add savers for unsaved datasets
    Check(CheckArgs),
    /// List the registered plugin classes
    Plugins,
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Plugin list file
    pub file: PathBuf,

    /// Titles only
    #[arg(short, long, conflicts_with_all = ["verbose", "very_verbose"])]
    pub quiet: bool,

    /// Show synopses and parameter descriptions
    #[arg(short, long, conflicts_with = "very_verbose")]
    pub verbose: bool,

    /// Also show plugin information and warnings
    #[arg(short = 'V', long)]
    pub very_verbose: bool,

    /// Which parameters to show
    #[arg(long, value_enum, default_value_t = LevelArg::User)]
    pub level: LevelArg,

    /// Include inactive steps
    #[arg(long)]
    pub all: bool,

    /// First step to show (0-based index)
    #[arg(long, default_value_t = 0)]
    pub start: usize,

    /// Stop before this step index
    #[arg(long)]
    pub stop: Option<usize>,

    /// Colour the output
    #[arg(long)]
    pub colour: bool,
}

impl ListArgs {
    pub fn verbosity(&self) -> Verbosity {
        if self.quiet {
            Verbosity::Quiet
        } else if self.very_verbose {
            Verbosity::VeryVerbose
        } else if self.verbose {
            Verbosity::Verbose
        } else {
            Verbosity::Basic
        }
    }
}

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Plugin list file
    pub file: PathBuf,

    /// Dataset that must be saved; repeat for several
    #[arg(long = "require", value_name = "NAME")]
    pub required: Vec<String>,

    /// Write the completed list here
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LevelArg {
    User,
    Advanced,
}

impl From<LevelArg> for DisplayLevel {
    fn from(level: LevelArg) -> Self {
        match level {
            LevelArg::User => DisplayLevel::User,
            LevelArg::Advanced => DisplayLevel::Advanced,
        }
    }
}
