use crate::SmupdateContext;
use crate::diagnostics::find_compiler;
use anyhow::{Result, bail};
use std::path::Path;

/// Print the spcomp binary found next to `include_dir`
///
/// # Errors
///
/// Returns an error if no executable compiler sits in the parent of
/// `include_dir`.
pub fn execute(ctx: &SmupdateContext, include_dir: &Path) -> Result<()> {
    let include_dir = ctx.resolve(include_dir)?;
    match find_compiler(&include_dir) {
        Some(compiler) => {
            println!("{}", compiler.display());
            Ok(())
        }
        None => bail!("No executable spcomp next to {}", include_dir.display()),
    }
}
