//! Command-line interface definitions for smupdate.
//!
//! This module contains all CLI argument parsing structures using clap's derive macros.
//! The CLI definitions are shared between the main binary and build tools (like xtask)
//! for man page generation.
//!
//! Note: Field-level documentation is provided via clap attributes (#[arg(help = "...")]),
//! so we allow missing_docs for this module to avoid redundant documentation.

#![allow(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

use clap::{ArgAction, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// Main CLI structure for smupdate.
#[derive(Parser)]
#[command(
    name = "smupdate",
    version = crate::VERSION,
    about = "Update manifest generator for SourceMod plugins",
    long_about = "Walks SourceMod and game mod build trees and writes the KeyValues manifest read by the Updater plugin"
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Show verbose output (repeat for debug logs)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Suppress informational messages
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Configuration file (default: ./smupdate.toml if present)
    #[arg(long, global = true, env = crate::CONFIG_ENV)]
    pub config: Option<PathBuf>,

    /// Report failures as spcomp-style error lines
    #[arg(long, global = true)]
    pub spcomp_errors: bool,
}

/// All available commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Build the update manifest
    Manifest {
        /// SourceMod build directory, published under Path_SM
        #[arg(long)]
        sm_path: Option<PathBuf>,

        /// Game mod build directory, published under Path_Mod
        #[arg(long, requires = "sm_path")]
        mod_path: Option<PathBuf>,

        /// Version written to the manifest (default: config, then git tag)
        #[arg(short, long)]
        release: Option<String>,

        /// Release note; repeat for several notes
        #[arg(short, long = "note")]
        notes: Vec<String>,

        /// Output file (default: config, then stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Checkout to read the version from
        #[arg(long)]
        git_repo: Option<PathBuf>,

        /// Walk directories before their children
        #[arg(long)]
        top_down: bool,

        /// Descend into symlinked directories
        #[arg(long)]
        follow_symlinks: bool,
    },

    /// Write the updater helper include (updater_helpers.inc)
    Include {
        /// Directory to write the include into
        #[arg(long)]
        include_dir: PathBuf,

        /// URL of the published manifest
        #[arg(long)]
        url: String,
    },

    /// Write the build version include (autoversioning.inc)
    Autoversion {
        /// Directory to write the include into
        #[arg(long)]
        include_dir: PathBuf,

        /// Checkout to read the version from (default: working directory)
        #[arg(long)]
        git_repo: Option<PathBuf>,

        /// Tag used when the checkout has none
        #[arg(long)]
        fallback_tag: Option<String>,
    },

    /// Print the version information read from git
    VersionInfo {
        /// Checkout to read the version from (default: working directory)
        #[arg(long)]
        git_repo: Option<PathBuf>,
    },

    /// Print the spcomp compiler that ships next to an include directory
    Compiler {
        /// SourceMod include directory (scripting/include)
        #[arg(long)]
        include_dir: PathBuf,
    },

    /// Write a starter configuration file
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
