use crate::SmupdateContext;
use crate::include::{
    AUTOVERSIONING_FILE, UPDATER_HELPER_FILE, autoversioning, updater_helper, write_include,
};
use crate::output;
use crate::version::VersionInfo;
use anyhow::{Context, Result};
use std::path::Path;

/// Write `updater_helpers.inc` pointing plugins at the manifest `url`
///
/// # Errors
///
/// Returns an error if the include directory does not exist or the file
/// cannot be written.
pub fn execute_updater_helper(ctx: &SmupdateContext, include_dir: &Path, url: &str) -> Result<()> {
    let dir = ctx.resolve(include_dir)?;
    let path = write_include(&dir, UPDATER_HELPER_FILE, &updater_helper(url))?;
    output::action("Wrote", &path.display().to_string());
    Ok(())
}

/// Write `autoversioning.inc` from the git state of `git_repo`
///
/// # Errors
///
/// Returns an error if:
/// - The version cannot be read from git
/// - The include directory does not exist or the file cannot be written
pub fn execute_autoversion(
    ctx: &SmupdateContext,
    include_dir: &Path,
    git_repo: Option<&Path>,
    fallback_tag: Option<&str>,
) -> Result<()> {
    let repo = match git_repo {
        Some(repo) => ctx.resolve(repo)?,
        None => ctx.working_dir.clone(),
    };
    let info = VersionInfo::from_git(&repo)
        .with_context(|| format!("Failed to read version from {}", repo.display()))?;
    let fallback = fallback_tag.unwrap_or(&ctx.config.manifest.fallback_tag);

    let dir = ctx.resolve(include_dir)?;
    let path = write_include(&dir, AUTOVERSIONING_FILE, &autoversioning(&info, fallback))?;
    output::action(
        "Wrote",
        &format!("{} ({})", path.display(), info.tag_or(fallback)),
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_updater_helper_written_relative_to_working_dir() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("include")).unwrap();
        let ctx = SmupdateContext::new_in(temp.path().to_path_buf(), None).unwrap();

        execute_updater_helper(&ctx, Path::new("include"), "https://example.com/u.txt").unwrap();

        let text = fs::read_to_string(temp.path().join("include").join(UPDATER_HELPER_FILE)).unwrap();
        assert!(text.contains("#define UPDATER_HELPER_URL \"https://example.com/u.txt\""));
    }

    #[test]
    fn test_missing_include_dir() {
        let temp = TempDir::new().unwrap();
        let ctx = SmupdateContext::new_in(temp.path().to_path_buf(), None).unwrap();
        assert!(execute_updater_helper(&ctx, Path::new("nope"), "u").is_err());
    }
}
