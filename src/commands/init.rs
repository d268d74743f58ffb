use crate::config::{Config, RootConfig};
use crate::output;
use crate::{DEFAULT_CONFIG_FILE, SmupdateContext};
use anyhow::{Context, Result};

/// Write a starter `smupdate.toml` in the working directory
///
/// The file lists the classic SourceMod and game mod roots so it only needs
/// its paths adjusted.
///
/// # Errors
///
/// Returns an error if:
/// - The file already exists and `force` is not set
/// - The file cannot be written
pub fn execute(ctx: &SmupdateContext, force: bool) -> Result<()> {
    let path = ctx.working_dir.join(DEFAULT_CONFIG_FILE);
    if path.exists() && !force {
        anyhow::bail!(
            "Configuration already exists at {} (use --force to overwrite)",
            path.display()
        );
    }

    let mut config = Config::default();
    config
        .roots
        .push(RootConfig::sourcemod("build/addons/sourcemod"));
    config.roots.push(RootConfig::game_mod("build"));
    config.manifest.output = Some("dist/updater.txt".into());

    config
        .save(&path)
        .context("Failed to save starter configuration")?;
    output::success(&format!("Created {}", path.display()));
    Ok(())
}
