//! Update manifest assembly.
//!
//! A manifest build walks every configured [`Root`], classifies each file,
//! remaps it to its remote path and appends `(category, remote path)` to the
//! `Files` section. Roots are processed in the order given and their
//! contributions are never merged, so two roots listing the same remote
//! path produce two entries.
//!
//! The build either returns a complete [`ManifestDocument`] or fails on the
//! first error; nothing partial is ever handed back.

use crate::classify::{FileClassifier, ModAssetClassifier, ScriptingClassifier};
use crate::error::Result;
use crate::keyvalues::{self, KeyValues};
use crate::remap::PathRemapper;
use crate::walker::{TreeWalker, WalkOptions};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{Level, debug, info, span};

/// Remote root of the SourceMod directory (`addons/sourcemod`).
pub const REMOTE_SM: &str = "Path_SM";

/// Remote root of the game mod directory.
pub const REMOTE_MOD: &str = "Path_Mod";

/// Top-level key the Updater plugin expects.
pub const UPDATER_KEY: &str = "Updater";

/// Section holding version and release notes.
pub const INFORMATION_KEY: &str = "Information";

/// Section listing deployable files.
pub const FILES_KEY: &str = "Files";

/// One local tree to publish: where it is, where it lands, and how its
/// files are categorized.
pub struct Root {
    remapper: PathRemapper,
    classifier: Box<dyn FileClassifier>,
}

impl Root {
    /// Create a root from a local directory, a remote prefix and a classifier.
    pub fn new(
        local: impl Into<PathBuf>,
        remote: &str,
        classifier: impl FileClassifier + 'static,
    ) -> Self {
        Self::with_boxed(local, remote, Box::new(classifier))
    }

    /// Like [`Root::new`] for an already boxed classifier.
    pub fn with_boxed(
        local: impl Into<PathBuf>,
        remote: &str,
        classifier: Box<dyn FileClassifier>,
    ) -> Self {
        Self {
            remapper: PathRemapper::new(local, remote),
            classifier,
        }
    }

    /// SourceMod tree published under [`REMOTE_SM`].
    pub fn sourcemod(local: impl Into<PathBuf>) -> Self {
        Self::new(local, REMOTE_SM, ScriptingClassifier)
    }

    /// Game mod tree published under [`REMOTE_MOD`].
    pub fn game_mod(local: impl Into<PathBuf>) -> Self {
        Self::new(local, REMOTE_MOD, ModAssetClassifier)
    }

    /// Local directory of this root.
    #[must_use]
    pub fn local(&self) -> &Path {
        self.remapper.local_root()
    }

    /// Remote prefix of this root.
    #[must_use]
    pub fn remote(&self) -> &str {
        self.remapper.remote_root()
    }

    /// Walk this root and append its files to `files`.
    fn collect(&self, options: WalkOptions, files: &mut KeyValues) -> Result<()> {
        let _span = span!(Level::INFO, "root", local = %self.local().display()).entered();

        let mut listed = 0usize;
        let mut skipped = 0usize;
        for file in TreeWalker::new(self.local()).options(options).files()? {
            let file = file?;
            let Some(category) = self.classifier.classify(&file, self.local()) else {
                debug!("Skipping {}", file.display());
                skipped += 1;
                continue;
            };

            let remote = self.remapper.format(&file)?;
            debug!("{category} {remote}");
            files.append(category, remote);
            listed += 1;
        }

        info!(
            "Listed {listed} files from {} under {} ({skipped} skipped)",
            self.local().display(),
            self.remote()
        );
        Ok(())
    }
}

impl fmt::Debug for Root {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Root")
            .field("local", &self.local())
            .field("remote", &self.remote())
            .finish_non_exhaustive()
    }
}

/// The assembled manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManifestDocument {
    information: KeyValues,
    files: KeyValues,
}

impl ManifestDocument {
    /// `Information` section: `Version.Latest` and `Notes` entries.
    #[must_use]
    pub const fn information(&self) -> &KeyValues {
        &self.information
    }

    /// `Files` section: one `category -> remote path` entry per file.
    #[must_use]
    pub const fn files(&self) -> &KeyValues {
        &self.files
    }

    /// `Information.Version.Latest`.
    #[must_use]
    pub fn version(&self) -> Option<&str> {
        self.information
            .section("Version")
            .and_then(|v| v.values("Latest").next())
    }

    /// Release notes in the order they were added.
    pub fn notes(&self) -> impl Iterator<Item = &str> {
        self.information.values("Notes")
    }

    /// Remote paths listed under `category`, in insertion order.
    pub fn files_in<'a, 'k>(
        &'a self,
        category: &'k str,
    ) -> impl Iterator<Item = &'a str> + use<'a, 'k> {
        self.files.values(category)
    }

    /// Number of files per category, in order of first appearance.
    #[must_use]
    pub fn category_counts(&self) -> Vec<(&str, usize)> {
        let mut counts: Vec<(&str, usize)> = Vec::new();
        for (category, _) in self.files.iter() {
            match counts.iter_mut().find(|(c, _)| *c == category) {
                Some((_, n)) => *n += 1,
                None => counts.push((category, 1)),
            }
        }
        counts
    }

    /// The document as the Updater plugin reads it, wrapped in an
    /// `"Updater"` section.
    #[must_use]
    pub fn to_keyvalues(&self) -> KeyValues {
        let mut updater = KeyValues::new();
        updater.append_section(INFORMATION_KEY, self.information.clone());
        updater.append_section(FILES_KEY, self.files.clone());

        let mut root = KeyValues::new();
        root.append_section(UPDATER_KEY, updater);
        root
    }

    /// KeyValues text of [`ManifestDocument::to_keyvalues`].
    #[must_use]
    pub fn render(&self) -> String {
        keyvalues::to_string(&self.to_keyvalues())
    }
}

/// Build a manifest from `roots`.
///
/// # Errors
///
/// Fails on the first root that cannot be walked or remapped; see
/// [`crate::error::Error`].
pub fn build<I, S>(
    roots: &[Root],
    version: &str,
    notes: I,
    options: WalkOptions,
) -> Result<ManifestDocument>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let _span = span!(Level::DEBUG, "build_manifest", version).entered();

    let mut information = KeyValues::new();
    information.section_mut("Version").append("Latest", version);
    for note in notes {
        information.append("Notes", note);
    }

    let mut files = KeyValues::new();
    for root in roots {
        root.collect(options, &mut files)?;
    }

    Ok(ManifestDocument { information, files })
}

/// Builder-style front end to [`build`].
#[derive(Debug, Default)]
pub struct ManifestBuilder {
    version: String,
    notes: Vec<String>,
    roots: Vec<Root>,
    options: WalkOptions,
}

impl ManifestBuilder {
    /// Start a manifest for `version`.
    pub fn new(version: impl fmt::Display) -> Self {
        Self {
            version: version.to_string(),
            ..Self::default()
        }
    }

    /// Add a release note.
    #[must_use]
    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Add several release notes, keeping their order.
    #[must_use]
    pub fn notes<I, S>(mut self, notes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.notes.extend(notes.into_iter().map(Into::into));
        self
    }

    /// Add a root to walk.
    #[must_use]
    pub fn root(mut self, root: Root) -> Self {
        self.roots.push(root);
        self
    }

    /// Traversal options used for every root.
    #[must_use]
    pub const fn walk_options(mut self, options: WalkOptions) -> Self {
        self.options = options;
        self
    }

    /// Roots added so far.
    #[must_use]
    pub fn roots(&self) -> &[Root] {
        &self.roots
    }

    /// Walk every root and assemble the manifest.
    ///
    /// # Errors
    ///
    /// See [`build`].
    pub fn build(&self) -> Result<ManifestDocument> {
        build(&self.roots, &self.version, &self.notes, self.options)
    }
}
