//! Compiler-style error lines for build integration.
//!
//! SourcePawn build setups scan tool output for lines shaped like spcomp
//! errors, `file:(line) : error 0: message`. With `--spcomp-errors` the
//! binary reports failures in that shape, both for returned errors and for
//! panics. The panic hook is process-wide, so it is installed through
//! [`PanicHookGuard`], which puts the previous hook back when dropped.
//!
//! [`find_compiler`] locates the spcomp binary that ships next to a
//! SourceMod include directory.

use crate::error::Error;
use std::env::consts::EXE_SUFFIX;
use std::fs;
use std::panic::{self, PanicHookInfo};
use std::path::{Path, PathBuf};

/// Hook signature stored by the standard library.
type PanicHook = Box<dyn Fn(&PanicHookInfo<'_>) + Sync + Send + 'static>;

/// Format one spcomp-style error line.
#[must_use]
pub fn spcomp_line(file: &str, line: u32, notice: Option<&str>, message: &str) -> String {
    let notice = notice.map(|n| format!("{n}: ")).unwrap_or_default();
    format!("{file}:({line}) : error 0: {notice}{message}")
}

/// spcomp-style line for an error returned by a command.
///
/// The location is the offending path when the error chain carries a
/// manifest error, otherwise `program`.
#[must_use]
pub fn format_error(program: &str, notice: Option<&str>, err: &anyhow::Error) -> String {
    let file = err
        .chain()
        .find_map(|cause| cause.downcast_ref::<Error>())
        .map_or_else(|| program.to_string(), |e| display_path(e.path()));
    spcomp_line(&file, 0, notice, &format!("{err:#}"))
}

fn display_path(path: &Path) -> String {
    path.display().to_string()
}

/// The executable `spcomp` in the parent of `include_dir`, as laid out by
/// the SourceMod `scripting/` directory.
///
/// Returns `None` when the file is missing or not executable.
#[must_use]
pub fn find_compiler(include_dir: &Path) -> Option<PathBuf> {
    let candidate = include_dir.parent()?.join(format!("spcomp{EXE_SUFFIX}"));
    let meta = fs::metadata(&candidate).ok()?;
    (meta.is_file() && is_executable(&meta)).then_some(candidate)
}

#[cfg(unix)]
fn is_executable(meta: &fs::Metadata) -> bool {
    use std::os::unix::fs::PermissionsExt;
    meta.permissions().mode() & 0o111 != 0
}

#[cfg(not(unix))]
fn is_executable(_meta: &fs::Metadata) -> bool {
    true
}

/// Installs a spcomp-style panic hook and restores the previous hook when
/// dropped.
pub struct PanicHookGuard {
    previous: Option<PanicHook>,
}

impl PanicHookGuard {
    /// Replace the current panic hook.
    #[must_use]
    pub fn install(notice: Option<String>) -> Self {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            let (file, line) = info
                .location()
                .map_or(("<unknown>", 0), |l| (l.file(), l.line()));
            let message = info
                .payload()
                .downcast_ref::<&str>()
                .map(|s| (*s).to_string())
                .or_else(|| info.payload().downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "panic".to_string());
            eprintln!("{}", spcomp_line(file, line, notice.as_deref(), &message));
        }));

        Self {
            previous: Some(previous),
        }
    }
}

impl Drop for PanicHookGuard {
    fn drop(&mut self) {
        if let Some(previous) = self.previous.take() {
            panic::set_hook(previous);
        }
    }
}
