//! Lazy recursive directory traversal.
//!
//! [`TreeWalker`] produces one [`DirGroup`] per directory: the directory
//! itself, its sub-directories and its files. A directory is only listed
//! when the walk reaches it, so nothing is pre-materialized.
//!
//! Symlinked directories are reported among their parent's sub-directories
//! but are only descended into when [`WalkOptions::follow_links`] is set.
//! With links followed, cyclic link structures are not detected here and
//! callers must avoid them.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::trace;
use walkdir::WalkDir;

/// Order in which directory groups are produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WalkOrder {
    /// A directory's group comes before the groups of its children.
    TopDown,
    /// Children's groups come before their parent's.
    #[default]
    BottomUp,
}

/// Traversal knobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WalkOptions {
    /// Group order
    pub order: WalkOrder,
    /// Descend into symlinked directories
    pub follow_links: bool,
}

/// The contents of one directory, as seen by the walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirGroup {
    /// Directory that was listed
    pub dir: PathBuf,
    /// Sub-directories, including symlinks to directories
    pub dirs: Vec<PathBuf>,
    /// Everything else: regular files, broken links, special files
    pub files: Vec<PathBuf>,
}

/// Walks every directory below a root.
#[derive(Debug, Clone)]
pub struct TreeWalker {
    root: PathBuf,
    options: WalkOptions,
}

impl TreeWalker {
    /// Create a bottom-up walker that does not follow links.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            options: WalkOptions::default(),
        }
    }

    /// Replace all traversal options at once.
    #[must_use]
    pub const fn options(mut self, options: WalkOptions) -> Self {
        self.options = options;
        self
    }

    /// Set the group order.
    #[must_use]
    pub const fn order(mut self, order: WalkOrder) -> Self {
        self.options.order = order;
        self
    }

    /// Descend into symlinked directories.
    #[must_use]
    pub const fn follow_links(mut self, yes: bool) -> Self {
        self.options.follow_links = yes;
        self
    }

    /// Root this walker starts from.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Start a walk over directory groups.
    ///
    /// # Errors
    ///
    /// Fails immediately with [`Error::NotFound`] or [`Error::NotADirectory`]
    /// when the root is unusable. Listing errors further down are yielded by
    /// the iterator and end the walk.
    pub fn walk(&self) -> Result<Walk> {
        let meta = fs::metadata(&self.root).map_err(|e| Error::from_io(&self.root, e))?;
        if !meta.is_dir() {
            return Err(Error::NotADirectory {
                path: self.root.clone(),
            });
        }

        Ok(Walk {
            stack: vec![Frame::Enter(self.root.clone())],
            options: self.options,
        })
    }

    /// Start a walk that yields file paths only.
    ///
    /// # Errors
    ///
    /// Same as [`TreeWalker::walk`].
    pub fn files(&self) -> Result<Files> {
        Ok(Files {
            walk: self.walk()?,
            pending: Vec::new().into_iter(),
        })
    }
}

/// Pending work of a walk.
#[derive(Debug)]
enum Frame {
    /// Directory still to be listed
    Enter(PathBuf),
    /// Listed directory whose group is held back until its children are done
    Exit(DirGroup),
}

/// Iterator over the [`DirGroup`]s of a tree. Not restartable.
#[derive(Debug)]
pub struct Walk {
    stack: Vec<Frame>,
    options: WalkOptions,
}

impl Walk {
    /// Frames for the children of `group` that should be descended into.
    fn child_frames(&self, group: &DirGroup) -> Vec<Frame> {
        // Reversed so the first child in name order is popped first.
        group
            .dirs
            .iter()
            .rev()
            .filter(|dir| self.options.follow_links || !is_symlink(dir))
            .map(|dir| Frame::Enter(dir.clone()))
            .collect()
    }
}

impl Iterator for Walk {
    type Item = Result<DirGroup>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(frame) = self.stack.pop() {
            let dir = match frame {
                Frame::Exit(group) => return Some(Ok(group)),
                Frame::Enter(dir) => dir,
            };

            let group = match list_dir(&dir) {
                Ok(group) => group,
                Err(e) => {
                    self.stack.clear();
                    return Some(Err(e));
                }
            };

            let children = self.child_frames(&group);
            match self.options.order {
                WalkOrder::TopDown => {
                    self.stack.extend(children);
                    return Some(Ok(group));
                }
                WalkOrder::BottomUp => {
                    self.stack.push(Frame::Exit(group));
                    self.stack.extend(children);
                }
            }
        }
        None
    }
}

/// Iterator over the files of a tree, in walk order.
#[derive(Debug)]
pub struct Files {
    walk: Walk,
    pending: std::vec::IntoIter<PathBuf>,
}

impl Iterator for Files {
    type Item = Result<PathBuf>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(file) = self.pending.next() {
                return Some(Ok(file));
            }
            match self.walk.next()? {
                Ok(group) => self.pending = group.files.into_iter(),
                Err(e) => return Some(Err(e)),
            }
        }
    }
}

/// List the immediate children of `dir`, sorted by file name.
fn list_dir(dir: &Path) -> Result<DirGroup> {
    trace!("Listing {}", dir.display());

    let mut group = DirGroup {
        dir: dir.to_path_buf(),
        dirs: Vec::new(),
        files: Vec::new(),
    };

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| walk_error(dir, e))?;
        let is_dir = if entry.path_is_symlink() {
            entry.path().is_dir()
        } else {
            entry.file_type().is_dir()
        };

        if is_dir {
            group.dirs.push(entry.into_path());
        } else {
            group.files.push(entry.into_path());
        }
    }

    Ok(group)
}

fn is_symlink(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok_and(|m| m.file_type().is_symlink())
}

fn walk_error(dir: &Path, err: walkdir::Error) -> Error {
    let path = err.path().map_or_else(|| dir.to_path_buf(), Path::to_path_buf);
    match err.into_io_error() {
        Some(source) => Error::from_io(&path, source),
        None => Error::Io {
            path,
            source: io::Error::other("filesystem loop detected"),
        },
    }
}
