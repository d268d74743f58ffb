//! Release version information read from git.

use anyhow::{Context, Result};
use std::fmt;
use std::path::Path;
use std::process::{Command, Stdio};
use tracing::debug;

/// Exit status of `git describe` when no tag is reachable.
const GIT_NO_TAG_STATUS: i32 = 128;

/// Version details of a checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionInfo {
    /// Output of `git describe --tags`, if any tag is reachable
    pub tag: Option<String>,
    /// Number of commits reachable from HEAD
    pub commit_number: u64,
    /// Current branch name (`HEAD` when detached)
    pub branch: String,
}

impl VersionInfo {
    /// Read version information from the git checkout at `repo`.
    ///
    /// # Errors
    ///
    /// Returns an error if git is not installed, `repo` is not a git
    /// checkout, or git prints something unexpected.
    pub fn from_git(repo: &Path) -> Result<Self> {
        let git = which::which("git").context("git executable not found in PATH")?;
        debug!("Reading version from {} with {}", repo.display(), git.display());

        let count = git_output(&git, repo, &["rev-list", "--count", "HEAD"])?;
        let commit_number = count
            .parse()
            .with_context(|| format!("Unexpected commit count from git: {count:?}"))?;

        let branch = git_output(&git, repo, &["rev-parse", "--abbrev-ref", "HEAD"])?;

        let output = git_command(&git, repo, &["describe", "--tags", "HEAD"])
            .output()
            .context("Failed to run git describe")?;
        let tag = if output.status.success() {
            Some(String::from_utf8_lossy(&output.stdout).trim().to_string())
        } else if output.status.code() == Some(GIT_NO_TAG_STATUS) {
            None
        } else {
            anyhow::bail!(
                "git describe failed in {}: {}",
                repo.display(),
                String::from_utf8_lossy(&output.stderr).trim()
            );
        };

        Ok(Self {
            tag,
            commit_number,
            branch,
        })
    }

    /// The tag, or `fallback` when the checkout has none.
    #[must_use]
    pub fn tag_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.tag.as_deref().unwrap_or(fallback)
    }
}

impl fmt::Display for VersionInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} commits on {})",
            self.tag.as_deref().unwrap_or("untagged"),
            self.commit_number,
            self.branch
        )
    }
}

fn git_command(git: &Path, repo: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::new(git);
    cmd.args(args)
        .current_dir(repo)
        .stdin(Stdio::null())
        .stderr(Stdio::piped());
    cmd
}

/// Run git and return its trimmed stdout, failing on a non-zero exit.
fn git_output(git: &Path, repo: &Path, args: &[&str]) -> Result<String> {
    let output = git_command(git, repo, args)
        .output()
        .with_context(|| format!("Failed to run git {}", args.join(" ")))?;

    if !output.status.success() {
        anyhow::bail!(
            "git {} failed in {}: {}",
            args.join(" "),
            repo.display(),
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn git(dir: &Path, args: &[&str]) -> bool {
        Command::new("git")
            .args(args)
            .current_dir(dir)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .is_ok_and(|s| s.success())
    }

    fn init_repo() -> Option<TempDir> {
        let temp = TempDir::new().ok()?;
        let dir = temp.path();
        let ok = git(dir, &["init", "-q", "-b", "main"])
            && git(dir, &["config", "user.email", "test@example.com"])
            && git(dir, &["config", "user.name", "Test"])
            && git(dir, &["config", "commit.gpgsign", "false"])
            && git(dir, &["commit", "-q", "--allow-empty", "-m", "one"])
            && git(dir, &["commit", "-q", "--allow-empty", "-m", "two"]);
        ok.then_some(temp)
    }

    #[test]
    fn test_untagged_repo() {
        let Some(repo) = init_repo() else {
            return;
        };
        let info = VersionInfo::from_git(repo.path()).unwrap();
        assert_eq!(info.tag, None);
        assert_eq!(info.commit_number, 2);
        assert_eq!(info.branch, "main");
        assert_eq!(info.tag_or("0.0.0"), "0.0.0");
    }

    #[test]
    fn test_tagged_repo() {
        let Some(repo) = init_repo() else {
            return;
        };
        assert!(git(repo.path(), &["tag", "1.6.3"]));

        let info = VersionInfo::from_git(repo.path()).unwrap();
        assert_eq!(info.tag.as_deref(), Some("1.6.3"));
        assert_eq!(info.to_string(), "1.6.3 (2 commits on main)");
    }

    #[test]
    fn test_not_a_repo() {
        let temp = TempDir::new().unwrap();
        if which::which("git").is_err() {
            return;
        }
        assert!(VersionInfo::from_git(temp.path()).is_err());
    }
}
