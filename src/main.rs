use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::{Generator, generate};
use smupdate::cli::{Cli, Commands};
use smupdate::commands::manifest::ManifestOptions;
use smupdate::diagnostics::{self, PanicHookGuard};
use smupdate::output::{self, Verbosity};
use smupdate::{SmupdateContext, commands};
use std::io;
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_logging(&cli);

    let spcomp_errors = cli.spcomp_errors;
    let result = {
        let _hook = spcomp_errors.then(|| PanicHookGuard::install(Some("smupdate".to_string())));
        run(cli)
    };

    if let Err(e) = result {
        if spcomp_errors {
            eprintln!("{}", diagnostics::format_error("smupdate", None, &e));
        } else {
            output::error(&format!("{e:#}"));
        }
        process::exit(1);
    }
}

fn init_logging(cli: &Cli) {
    let verbosity = if cli.quiet {
        Verbosity::Quiet
    } else if cli.verbose > 0 {
        Verbosity::Verbose
    } else {
        Verbosity::Normal
    };
    output::set_verbosity(verbosity);

    let default_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    if let Commands::Completion { shell } = cli.command {
        print_completions(shell, &mut Cli::command());
        return Ok(());
    }

    let ctx = SmupdateContext::new(cli.config)?;

    match cli.command {
        Commands::Manifest {
            sm_path,
            mod_path,
            release,
            notes,
            output,
            git_repo,
            top_down,
            follow_symlinks,
        } => {
            let opts = ManifestOptions {
                sm_path,
                mod_path,
                release,
                notes,
                output,
                git_repo,
                top_down,
                follow_symlinks,
            };
            commands::manifest::execute(&ctx, &opts)?;
        }
        Commands::Include { include_dir, url } => {
            commands::include::execute_updater_helper(&ctx, &include_dir, &url)?;
        }
        Commands::Autoversion {
            include_dir,
            git_repo,
            fallback_tag,
        } => {
            commands::include::execute_autoversion(
                &ctx,
                &include_dir,
                git_repo.as_deref(),
                fallback_tag.as_deref(),
            )?;
        }
        Commands::VersionInfo { git_repo } => {
            commands::version::execute(&ctx, git_repo.as_deref())?;
        }
        Commands::Compiler { include_dir } => {
            commands::compiler::execute(&ctx, &include_dir)?;
        }
        Commands::Init { force } => {
            commands::init::execute(&ctx, force)?;
        }
        Commands::Completion { .. } => {}
    }

    Ok(())
}

fn print_completions<G: Generator>(g: G, cmd: &mut clap::Command) {
    generate(g, cmd, cmd.get_name().to_string(), &mut io::stdout());
}
