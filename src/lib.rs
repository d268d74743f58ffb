#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]
#![allow(clippy::indexing_slicing)] // Bounds checked by logic

//! # smupdate - Update Manifests for SourceMod Plugins
//!
//! smupdate generates the manifest read by the SourceMod Updater plugin. It
//! walks local build-output trees, decides a deployment category for each
//! file, rewrites its path below a remote root such as `Path_SM`, and
//! writes the result as a KeyValues document.
//!
//! ## Pipeline
//!
//! - [`walker`]: lazy recursive traversal of a build tree
//! - [`classify`]: per-file deployment categories (`Plugin`, `Source`)
//! - [`remap`]: local path to `/`-separated remote path
//! - [`manifest`]: assembly of the `Information` and `Files` sections
//! - [`keyvalues`]: ordered multimap and KeyValues text writer
//!
//! Around it sit the [`config`] file, the git [`version`] reader, the
//! SourcePawn [`include`] templates and the [`commands`] behind the CLI.
//!
//! ## Example Usage
//!
//! ```no_run
//! use smupdate::manifest::{ManifestBuilder, Root};
//!
//! # fn main() -> anyhow::Result<()> {
//! let doc = ManifestBuilder::new("1.2.3")
//!     .note("fix bug")
//!     .root(Root::sourcemod("build/addons/sourcemod"))
//!     .root(Root::game_mod("build"))
//!     .build()?;
//!
//! print!("{}", doc.render());
//! # Ok(())
//! # }
//! ```

/// Command-line interface definitions (argument parsing structures).
pub mod cli;

/// Deployment categories and the classifier trait.
pub mod classify;

/// Commands module containing all CLI command implementations.
pub mod commands;

/// Configuration file parsing and validation.
pub mod config;

/// spcomp-style error reporting.
pub mod diagnostics;

/// Error types of the manifest core.
pub mod error;

/// SourcePawn include file templates.
pub mod include;

/// Ordered multimap and KeyValues text output.
pub mod keyvalues;

/// Manifest roots, document and builder.
pub mod manifest;

/// Output formatting and verbosity.
pub mod output;

/// Local to remote path rewriting.
pub mod remap;

/// Utility functions and helpers.
pub mod utils;

/// Version information from git.
pub mod version;

/// Lazy recursive directory traversal.
pub mod walker;

use anyhow::Result;
use std::path::{Path, PathBuf};

/// Current version of the smupdate binary.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Configuration file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "smupdate.toml";

/// Environment variable naming an explicit configuration file.
pub const CONFIG_ENV: &str = "SMUPDATE_CONFIG";

/// State shared by every command.
///
/// Holds the loaded configuration together with the directory relative
/// command-line paths are resolved against.
///
/// # Examples
///
/// ```no_run
/// use smupdate::SmupdateContext;
///
/// # fn main() -> anyhow::Result<()> {
/// // Load ./smupdate.toml if present
/// let ctx = SmupdateContext::new(None)?;
///
/// // Load an explicit file
/// let ctx = SmupdateContext::new(Some("ci/smupdate.toml".into()))?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct SmupdateContext {
    /// Configuration file in use, if one was loaded.
    pub config_path: Option<PathBuf>,

    /// Loaded configuration settings.
    pub config: config::Config,

    /// Directory that relative command-line paths are resolved against.
    pub working_dir: PathBuf,
}

impl SmupdateContext {
    /// Load the context from `config_path`, or from [`DEFAULT_CONFIG_FILE`]
    /// in the working directory when it exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the working directory cannot be read or the
    /// configuration file cannot be loaded.
    pub fn new(config_path: Option<PathBuf>) -> Result<Self> {
        let working_dir = std::env::current_dir()?;
        Self::new_in(working_dir, config_path)
    }

    /// Like [`SmupdateContext::new`] with an explicit working directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file cannot be loaded.
    pub fn new_in(working_dir: PathBuf, config_path: Option<PathBuf>) -> Result<Self> {
        let default_path = working_dir.join(DEFAULT_CONFIG_FILE);
        let explicit = config_path.map(|p| working_dir.join(p));

        let config = config::Config::load_or_default(explicit.as_deref(), &default_path)?;
        let config_path = explicit.or_else(|| default_path.exists().then_some(default_path));

        Ok(Self {
            config_path,
            config,
            working_dir,
        })
    }

    /// Resolve a command-line path against the working directory.
    ///
    /// # Errors
    ///
    /// Returns an error if `~` cannot be expanded.
    pub fn resolve(&self, path: &Path) -> Result<PathBuf> {
        utils::resolve_path(path, &self.working_dir)
    }
}
