//! `smupdate.toml` loading and validation.
//!
//! Relative paths in the file are anchored at the file's own directory, so
//! a config checked into a repository works from any working directory.

/// Unknown-key detection for configuration files.
pub mod validator;

use crate::classify::ClassifierKind;
use crate::manifest::{REMOTE_MOD, REMOTE_SM, Root};
use crate::utils::paths::resolve_path;
use crate::walker::WalkOptions;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Contents of `smupdate.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    /// `[manifest]` settings
    #[serde(default)]
    pub manifest: ManifestConfig,

    /// Traversal options shared by every root
    #[serde(default)]
    pub walk: WalkOptions,

    /// Trees to publish, in manifest order
    #[serde(default)]
    pub roots: Vec<RootConfig>,
}

/// The `[manifest]` section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ManifestConfig {
    /// Version written to `Information.Version.Latest`; read from git when unset
    #[serde(default)]
    pub version: Option<String>,
    /// Release notes, one `Notes` entry each
    #[serde(default)]
    pub notes: Vec<String>,
    /// Where to write the manifest; stdout when unset
    #[serde(default)]
    pub output: Option<PathBuf>,
    /// Checkout to read the version from
    #[serde(default)]
    pub git_repo: Option<PathBuf>,
    /// Version used when the checkout has no tag
    #[serde(default = "default_fallback_tag")]
    pub fallback_tag: String,
}

/// One `[[roots]]` entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RootConfig {
    /// Local build directory
    pub local: PathBuf,
    /// Remote prefix, e.g. `Path_SM`
    pub remote: String,
    /// Classifier applied to every file of the root
    pub classifier: ClassifierKind,
}

impl Default for ManifestConfig {
    fn default() -> Self {
        Self {
            version: None,
            notes: Vec::new(),
            output: None,
            git_repo: None,
            fallback_tag: default_fallback_tag(),
        }
    }
}

impl RootConfig {
    /// The classic SourceMod tree: `Path_SM` with the scripting classifier.
    pub fn sourcemod(local: impl Into<PathBuf>) -> Self {
        Self {
            local: local.into(),
            remote: REMOTE_SM.to_string(),
            classifier: ClassifierKind::Scripting,
        }
    }

    /// The classic game mod tree: `Path_Mod` with the mod classifier.
    pub fn game_mod(local: impl Into<PathBuf>) -> Self {
        Self {
            local: local.into(),
            remote: REMOTE_MOD.to_string(),
            classifier: ClassifierKind::Mod,
        }
    }

    /// Build the manifest root this entry describes.
    #[must_use]
    pub fn to_root(&self) -> Root {
        Root::with_boxed(&self.local, &self.remote, self.classifier.build())
    }
}

impl Config {
    /// Load configuration from a file
    ///
    /// Relative paths inside the file are resolved against the file's
    /// directory and `~` is expanded.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Cannot read the configuration file
    /// - Configuration file contains invalid TOML
    /// - Validation fails (see [`Config::validate`])
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let mut config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        validator::ConfigValidator::new().warn_unknown_keys(&content);

        let base = path.parent().unwrap_or_else(|| Path::new("."));
        config.resolve_paths(base)?;
        config.validate()?;
        Ok(config)
    }

    /// Load `explicit` if given; otherwise load `default_path` when it
    /// exists and fall back to defaults when it doesn't.
    ///
    /// # Errors
    ///
    /// Returns an error if the chosen file cannot be loaded.
    pub fn load_or_default(explicit: Option<&Path>, default_path: &Path) -> Result<Self> {
        match explicit {
            Some(path) => Self::load(path),
            None if default_path.exists() => Self::load(default_path),
            None => Ok(Self::default()),
        }
    }

    /// Save configuration to a file
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Cannot create parent directories
    /// - Cannot write to the file
    /// - TOML serialization fails
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let toml_str = toml::to_string_pretty(self).context("Failed to serialize config")?;
        let mut file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create config file: {}", path.display()))?;
        file.write_all(toml_str.as_bytes())?;
        Ok(())
    }

    /// Check values serde cannot check.
    ///
    /// # Errors
    ///
    /// Returns an error for an empty or absolute remote prefix, or an empty
    /// fallback tag.
    pub fn validate(&self) -> Result<()> {
        for root in &self.roots {
            let remote = root.remote.trim();
            if remote.is_empty() {
                anyhow::bail!(
                    "Root {} has an empty remote prefix",
                    root.local.display()
                );
            }
            if remote.starts_with('/') || remote.starts_with('\\') {
                anyhow::bail!(
                    "Remote prefix must be relative, got {remote:?} for root {}",
                    root.local.display()
                );
            }
        }

        if self.manifest.fallback_tag.trim().is_empty() {
            anyhow::bail!("manifest.fallback_tag cannot be empty");
        }

        Ok(())
    }

    fn resolve_paths(&mut self, base: &Path) -> Result<()> {
        for root in &mut self.roots {
            root.local = resolve_path(&root.local, base)?;
        }
        if let Some(output) = &self.manifest.output {
            self.manifest.output = Some(resolve_path(output, base)?);
        }
        if let Some(repo) = &self.manifest.git_repo {
            self.manifest.git_repo = Some(resolve_path(repo, base)?);
        }
        Ok(())
    }
}

fn default_fallback_tag() -> String {
    "0.0.0".to_string()
}
