//! Local build paths to remote deployment paths.
//!
//! A [`PathRemapper`] swaps a local root directory for a virtual remote
//! root such as `Path_SM`. Remote paths always use `/`, whatever the host,
//! since the manifest describes a cross-platform deployment.

use crate::error::{Error, Result};
use std::fmt;
use std::path::{Component, Path, PathBuf};

/// Separator used in remote paths.
pub const REMOTE_SEPARATOR: char = '/';

/// A `/`-separated path below a remote root.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RemotePath(String);

impl RemotePath {
    /// Borrow the path as a string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Take ownership of the underlying string.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for RemotePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for RemotePath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<RemotePath> for String {
    fn from(path: RemotePath) -> Self {
        path.0
    }
}

/// Rewrites paths below `local_root` into paths below `remote_root`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathRemapper {
    local_root: PathBuf,
    remote_root: String,
}

impl PathRemapper {
    /// Create a remapper. Backslashes and trailing separators in
    /// `remote_root` are normalized away.
    pub fn new(local_root: impl Into<PathBuf>, remote_root: &str) -> Self {
        let remote_root = remote_root
            .replace('\\', "/")
            .trim_end_matches(REMOTE_SEPARATOR)
            .to_string();

        Self {
            local_root: local_root.into(),
            remote_root,
        }
    }

    /// Local directory being replaced.
    #[must_use]
    pub fn local_root(&self) -> &Path {
        &self.local_root
    }

    /// Remote prefix put in its place.
    #[must_use]
    pub fn remote_root(&self) -> &str {
        &self.remote_root
    }

    /// Remove the local root from `local_path`.
    ///
    /// The check is lexical: a remainder containing `..` is treated as
    /// leaving the root.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PathOutsideRoot`] when `local_path` does not live
    /// below the local root.
    pub fn strip<'a>(&self, local_path: &'a Path) -> Result<&'a Path> {
        let outside = || Error::PathOutsideRoot {
            path: local_path.to_path_buf(),
            root: self.local_root.clone(),
        };

        let relative = local_path
            .strip_prefix(&self.local_root)
            .map_err(|_| outside())?;
        if relative
            .components()
            .any(|c| matches!(c, Component::ParentDir))
        {
            return Err(outside());
        }
        Ok(relative)
    }

    /// Re-root `local_path` under the remote root.
    ///
    /// File names that are not valid UTF-8 are converted lossily, with
    /// U+FFFD in place of the invalid bytes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PathOutsideRoot`] when `local_path` does not live
    /// below the local root.
    pub fn format(&self, local_path: &Path) -> Result<RemotePath> {
        let relative = self.strip(local_path)?;

        let mut remote = self.remote_root.clone();
        for component in relative.components() {
            let part = match component {
                Component::Normal(part) => part.to_string_lossy(),
                Component::CurDir
                | Component::ParentDir
                | Component::RootDir
                | Component::Prefix(_) => continue,
            };
            if !remote.is_empty() {
                remote.push(REMOTE_SEPARATOR);
            }
            remote.push_str(&part);
        }

        Ok(RemotePath(remote))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_posix_join() {
        let remapper = PathRemapper::new("/out", "Path_SM");
        let remote = remapper
            .format(Path::new("/out/plugins/a.smx"))
            .unwrap();
        assert_eq!(remote.as_str(), "Path_SM/plugins/a.smx");
    }

    #[test]
    fn test_strip_round_trip() {
        let remapper = PathRemapper::new("/out", "Path_SM");
        let rel = Path::new("scripting/include/x.inc");
        let joined = remapper.local_root().join(rel);
        assert_eq!(remapper.strip(&joined).unwrap(), rel);
    }

    #[test]
    fn test_outside_root() {
        let remapper = PathRemapper::new("/out", "Path_SM");
        let err = remapper.format(Path::new("/other/a.smx")).unwrap_err();
        assert!(matches!(err, Error::PathOutsideRoot { .. }));

        // Sibling directories sharing a name prefix are not descendants.
        let err = remapper.strip(Path::new("/outer/a.smx")).unwrap_err();
        assert!(matches!(err, Error::PathOutsideRoot { .. }));
    }

    #[test]
    fn test_parent_dir_cannot_escape_root() {
        let remapper = PathRemapper::new("/out", "Path_SM");

        let err = remapper
            .format(Path::new("/out/../etc/passwd"))
            .unwrap_err();
        assert!(matches!(err, Error::PathOutsideRoot { .. }));

        let err = remapper
            .strip(Path::new("/out/plugins/../../etc"))
            .unwrap_err();
        assert!(matches!(err, Error::PathOutsideRoot { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_names_are_lossy() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let remapper = PathRemapper::new("/out", "Path_SM");
        let name = OsStr::from_bytes(b"bad\xffname.smx");
        let remote = remapper
            .format(&Path::new("/out/plugins").join(name))
            .unwrap();
        assert_eq!(remote.as_str(), "Path_SM/plugins/bad\u{fffd}name.smx");
    }

    #[test]
    fn test_remote_root_normalized() {
        let remapper = PathRemapper::new("/out", "Path_Mod\\custom/");
        assert_eq!(remapper.remote_root(), "Path_Mod/custom");
        let remote = remapper.format(Path::new("/out/cfg/y.cfg")).unwrap();
        assert_eq!(remote.to_string(), "Path_Mod/custom/cfg/y.cfg");
    }

    #[test]
    fn test_empty_remote_root() {
        let remapper = PathRemapper::new("/out", "");
        let remote = remapper.format(Path::new("/out/cfg/y.cfg")).unwrap();
        assert_eq!(remote.as_str(), "cfg/y.cfg");
    }
}
