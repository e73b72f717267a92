//! vpshell - Entry Point

use clap::Parser;
use std::path::PathBuf;
use tracing::info;

/// vpshell - viewport shell demo for a media library
#[derive(Parser, Debug)]
#[command(name = "vpshell")]
#[command(version)]
#[command(about = "Terminal media browser demonstrating viewport coordination and scroll restoration")]
pub struct Args {
    /// Route to open on startup (e.g. /album/3)
    #[arg(short, long)]
    pub route: Option<String>,

    /// URL of the liked-tracks collection (file:// or a local path)
    #[arg(short, long)]
    pub library: Option<String>,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

fn resolve_config(args: &Args) -> Result<vpshell::config::ResolvedConfig, vpshell::model::ShellError> {
    // Defaults → Config File → Env Vars → CLI Args
    let config_file = vpshell::config::load_config_with_precedence(args.config.clone())?;
    let merged = vpshell::config::merge_config(config_file);
    let with_env = vpshell::config::apply_env_overrides(merged)?;
    let config =
        vpshell::config::apply_cli_overrides(with_env, args.route.clone(), args.library.clone());
    // Reject a bad route before the terminal enters raw mode.
    config.initial_route()?;
    Ok(config)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = resolve_config(&args)?;

    vpshell::logging::init(&config.log_file_path)?;

    info!(
        config = ?config,
        "Configuration loaded and resolved"
    );

    vpshell::view::run_with_config(&config)?;

    Ok(())
}
