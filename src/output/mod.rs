//! Status lines for the smupdate CLI.
//!
//! Everything here goes to stderr: stdout is reserved for a manifest that
//! may be piped straight into a file. Messages are filtered by a global
//! [`Verbosity`] set once from `-q` / `-v`.

use colored::{ColoredString, Colorize};
use std::sync::atomic::{AtomicU8, Ordering};

/// How chatty status output is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    /// Errors only.
    Quiet = 0,
    /// Written files, versions and per-category counts.
    Normal = 1,
    /// Also the roots being walked and the git state used.
    Verbose = 2,
}

static VERBOSITY: AtomicU8 = AtomicU8::new(Verbosity::Normal as u8);

/// Set the global verbosity.
pub fn set_verbosity(level: Verbosity) {
    VERBOSITY.store(level as u8, Ordering::Relaxed);
}

/// Current global verbosity.
pub fn get_verbosity() -> Verbosity {
    match VERBOSITY.load(Ordering::Relaxed) {
        0 => Verbosity::Quiet,
        1 => Verbosity::Normal,
        _ => Verbosity::Verbose,
    }
}

fn emit(min: Verbosity, line: impl std::fmt::Display) {
    if get_verbosity() >= min {
        eprintln!("{line}");
    }
}

/// Green confirmation, e.g. after `init`.
pub fn success(message: &str) {
    emit(Verbosity::Normal, message.green());
}

/// Failure report; shown even with `--quiet`.
pub fn error(message: &str) {
    eprintln!("{} {message}", "Error:".red().bold());
}

/// Dimmed summary line such as a category count.
pub fn info(message: &str) {
    emit(Verbosity::Normal, message.dimmed());
}

/// Detail shown only with `-v`.
pub fn verbose(message: &str) {
    emit(Verbosity::Verbose, message.dimmed());
}

/// `<verb> <subject>` with a bold verb, e.g. `Wrote dist/updater.txt`.
pub fn action(verb: &str, subject: &str) {
    let verb: ColoredString = verb.green().bold();
    emit(Verbosity::Normal, format!("{verb} {subject}"));
}
