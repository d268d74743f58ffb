use crate::SmupdateContext;
use crate::version::VersionInfo;
use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;

/// Print the tag, commit count and branch of `git_repo`
///
/// # Errors
///
/// Returns an error if the version cannot be read from git.
pub fn execute(ctx: &SmupdateContext, git_repo: Option<&Path>) -> Result<()> {
    let repo = match git_repo {
        Some(repo) => ctx.resolve(repo)?,
        None => ctx.working_dir.clone(),
    };
    let info = VersionInfo::from_git(&repo)
        .with_context(|| format!("Failed to read version from {}", repo.display()))?;

    println!(
        "{} {}",
        "tag:   ".dimmed(),
        info.tag.as_deref().unwrap_or("(none)")
    );
    println!("{} {}", "commit:".dimmed(), info.commit_number);
    println!("{} {}", "branch:".dimmed(), info.branch);
    Ok(())
}
