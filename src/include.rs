//! SourcePawn include files generated at build time.
//!
//! Plugins `#include` these to learn where their update manifest lives and
//! which version they were built from.

use crate::version::VersionInfo;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// File name of the updater URL include.
pub const UPDATER_HELPER_FILE: &str = "updater_helpers.inc";

/// File name of the build version include.
pub const AUTOVERSIONING_FILE: &str = "autoversioning.inc";

/// Escape `input` for a SourcePawn string literal, without the quotes.
///
/// This is the body of the JSON string literal for `input`, which
/// SourcePawn's lexer reads back unchanged for the characters that matter
/// here.
#[must_use]
pub fn escape_for_sourcepawn(input: &str) -> String {
    let quoted = serde_json::Value::String(input.to_owned()).to_string();
    quoted
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(&quoted)
        .to_string()
}

/// Include defining `UPDATER_HELPER_URL`.
#[must_use]
pub fn updater_helper(url: &str) -> String {
    format!(
        "#if defined _updater_helper_included\n \
         #endinput\n\
         #endif\n\
         #define _updater_helper_included\n\
         #define UPDATER_HELPER_URL \"{}\"\n",
        escape_for_sourcepawn(url)
    )
}

/// Include defining `AUTOVERSIONING_TAG` and `AUTOVERSIONING_COMMIT`.
#[must_use]
pub fn autoversioning(info: &VersionInfo, fallback_tag: &str) -> String {
    format!(
        "#if defined _autoversioning_included\n \
         #endinput\n\
         #endif\n\
         #define _autoversioning_included\n\
         #define AUTOVERSIONING_TAG \"{}\"\n\
         #define AUTOVERSIONING_COMMIT \"{}\"\n",
        escape_for_sourcepawn(info.tag_or(fallback_tag)),
        escape_for_sourcepawn(&info.commit_number.to_string())
    )
}

/// Write `contents` to `dir/file_name`.
///
/// # Errors
///
/// Returns an error if `dir` is not an existing directory or the file
/// cannot be written.
pub fn write_include(dir: &Path, file_name: &str, contents: &str) -> Result<PathBuf> {
    if !dir.is_dir() {
        anyhow::bail!("Include directory does not exist: {}", dir.display());
    }

    let path = dir.join(file_name);
    fs::write(&path, contents)
        .with_context(|| format!("Failed to write include file: {}", path.display()))?;
    info!("Wrote {}", path.display());
    Ok(path)
}
