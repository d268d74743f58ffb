//! Deployment categories for build files.
//!
//! The Updater plugin installs every listed file according to its category
//! key: `Plugin` files are downloaded and installed, `Source` files are only
//! fetched when the server opts into source downloads. A classifier decides
//! the key for one file from its path relative to the root being walked.
//!
//! Classifiers only ever see a single file. They must not keep state between
//! calls, so a manifest's content does not depend on traversal order.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::ffi::OsStr;
use std::fmt;
use std::path::{Component, Path};

/// Category label for a deployable file.
pub type Category = Cow<'static, str>;

/// Category of compiled plugins and any other installable file.
pub const PLUGIN: &str = "Plugin";

/// Category of SourcePawn sources.
pub const SOURCE: &str = "Source";

/// Decides which deployment category, if any, a file belongs to.
pub trait FileClassifier {
    /// Category for `file`, found while walking `root`; `None` leaves the
    /// file out of the manifest.
    fn classify(&self, file: &Path, root: &Path) -> Option<Category>;
}

impl<F> FileClassifier for F
where
    F: Fn(&Path, &Path) -> Option<Category>,
{
    fn classify(&self, file: &Path, root: &Path) -> Option<Category> {
        self(file, root)
    }
}

/// Classifier for the SourceMod tree (`addons/sourcemod` of a build).
///
/// Everything below `scripting/` is `Source`, everything else is `Plugin`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScriptingClassifier;

impl FileClassifier for ScriptingClassifier {
    fn classify(&self, file: &Path, root: &Path) -> Option<Category> {
        let mut parts = relative_parts(file, root)?;
        if parts.next() == Some(OsStr::new("scripting")) {
            Some(Cow::Borrowed(SOURCE))
        } else {
            Some(Cow::Borrowed(PLUGIN))
        }
    }
}

/// Classifier for the game mod tree.
///
/// Files under `addons/sourcemod` are skipped since the SourceMod tree
/// already covers them; everything else is `Plugin`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ModAssetClassifier;

impl FileClassifier for ModAssetClassifier {
    fn classify(&self, file: &Path, root: &Path) -> Option<Category> {
        let mut parts = relative_parts(file, root)?;
        let first = parts.next();
        let second = parts.next();
        if first == Some(OsStr::new("addons")) && second == Some(OsStr::new("sourcemod")) {
            None
        } else {
            Some(Cow::Borrowed(PLUGIN))
        }
    }
}

/// Built-in classifiers selectable from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassifierKind {
    /// [`ScriptingClassifier`]
    Scripting,
    /// [`ModAssetClassifier`]
    Mod,
}

impl ClassifierKind {
    /// Boxed classifier for this kind.
    #[must_use]
    pub fn build(self) -> Box<dyn FileClassifier> {
        match self {
            Self::Scripting => Box::new(ScriptingClassifier),
            Self::Mod => Box::new(ModAssetClassifier),
        }
    }
}

impl fmt::Display for ClassifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scripting => f.write_str("scripting"),
            Self::Mod => f.write_str("mod"),
        }
    }
}

/// Normal components of `file` relative to `root`.
fn relative_parts<'a>(file: &'a Path, root: &Path) -> Option<impl Iterator<Item = &'a OsStr>> {
    let relative = file.strip_prefix(root).ok()?;
    Some(relative.components().filter_map(|c| match c {
        Component::Normal(part) => Some(part),
        _ => None,
    }))
}
