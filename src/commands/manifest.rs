use crate::config::RootConfig;
use crate::manifest::{self, Root};
use crate::output;
use crate::utils::write_atomic;
use crate::version::VersionInfo;
use crate::walker::{WalkOptions, WalkOrder};
use crate::SmupdateContext;
use anyhow::{Context, Result};
use std::io::Write;
use std::path::PathBuf;

/// Command-line overrides for a manifest build.
#[derive(Debug, Clone, Default)]
pub struct ManifestOptions {
    /// Replaces configured roots with a `Path_SM` root
    pub sm_path: Option<PathBuf>,
    /// Adds a `Path_Mod` root next to `sm_path`
    pub mod_path: Option<PathBuf>,
    /// Version string for `Information.Version.Latest`
    pub release: Option<String>,
    /// Release notes; replace configured notes when non-empty
    pub notes: Vec<String>,
    /// Output file; stdout when neither this nor the config sets one
    pub output: Option<PathBuf>,
    /// Checkout to read the version from
    pub git_repo: Option<PathBuf>,
    /// Force top-down traversal
    pub top_down: bool,
    /// Descend into symlinked directories
    pub follow_symlinks: bool,
}

/// Build the manifest and write it out
///
/// # Errors
///
/// Returns an error if:
/// - No roots are configured
/// - The version cannot be determined
/// - Any root cannot be walked or remapped
/// - The output file cannot be written
pub fn execute(ctx: &SmupdateContext, opts: &ManifestOptions) -> Result<()> {
    let roots = root_configs(ctx, opts)?;
    if roots.is_empty() {
        anyhow::bail!(
            "No roots to publish: pass --sm-path or add [[roots]] to {}",
            crate::DEFAULT_CONFIG_FILE
        );
    }

    let version = resolve_version(ctx, opts)?;
    let notes = if opts.notes.is_empty() {
        &ctx.config.manifest.notes
    } else {
        &opts.notes
    };
    let walk = walk_options(ctx, opts);

    for root in &roots {
        output::verbose(&format!(
            "{} -> {} ({})",
            root.local.display(),
            root.remote,
            root.classifier
        ));
    }

    let roots: Vec<Root> = roots.iter().map(RootConfig::to_root).collect();
    let doc = manifest::build(&roots, &version, notes, walk).context("Failed to build manifest")?;
    let text = doc.render();

    match output_path(ctx, opts)? {
        Some(path) => {
            write_atomic(&path, text.as_bytes())?;
            output::action("Wrote", &path.display().to_string());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(text.as_bytes())
                .context("Failed to write manifest to stdout")?;
            stdout.flush()?;
        }
    }

    output::info(&format!("Version {version}"));
    for (category, count) in doc.category_counts() {
        output::info(&format!("{category}: {count} files"));
    }

    Ok(())
}

/// Roots from the command line if given, otherwise from the config.
fn root_configs(ctx: &SmupdateContext, opts: &ManifestOptions) -> Result<Vec<RootConfig>> {
    let Some(sm_path) = &opts.sm_path else {
        return Ok(ctx.config.roots.clone());
    };

    let mut roots = vec![RootConfig::sourcemod(ctx.resolve(sm_path)?)];
    if let Some(mod_path) = &opts.mod_path {
        roots.push(RootConfig::game_mod(ctx.resolve(mod_path)?));
    }
    Ok(roots)
}

/// `--release`, then `manifest.version`, then the git tag (or fallback tag).
fn resolve_version(ctx: &SmupdateContext, opts: &ManifestOptions) -> Result<String> {
    if let Some(release) = opts.release.as_ref().or(ctx.config.manifest.version.as_ref()) {
        return Ok(release.clone());
    }

    let repo = match (&opts.git_repo, &ctx.config.manifest.git_repo) {
        (Some(repo), _) => ctx.resolve(repo)?,
        (None, Some(repo)) => repo.clone(),
        (None, None) => ctx.working_dir.clone(),
    };
    let info = VersionInfo::from_git(&repo)
        .with_context(|| format!("Failed to read version from {}", repo.display()))?;
    output::verbose(&format!("git: {info}"));

    Ok(info.tag_or(&ctx.config.manifest.fallback_tag).to_string())
}

fn walk_options(ctx: &SmupdateContext, opts: &ManifestOptions) -> WalkOptions {
    let mut walk = ctx.config.walk;
    if opts.top_down {
        walk.order = WalkOrder::TopDown;
    }
    if opts.follow_symlinks {
        walk.follow_links = true;
    }
    walk
}

fn output_path(ctx: &SmupdateContext, opts: &ManifestOptions) -> Result<Option<PathBuf>> {
    match &opts.output {
        Some(path) => Ok(Some(ctx.resolve(path)?)),
        None => Ok(ctx.config.manifest.output.clone()),
    }
}
