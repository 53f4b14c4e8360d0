//! CLI entry point for sln-gen.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

/// sln-gen — generate IDE solution files via CMake with generator fallback.
#[derive(Parser, Debug)]
#[command(name = "sln-gen", version, about)]
struct Cli {
    /// Path to the sln-gen.toml configuration file.
    #[arg(default_value = "sln-gen.toml")]
    config: PathBuf,

    /// Source directory containing the project description (defaults to
    /// the config file's directory).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Skip the build smoke test after generating.
    #[arg(long)]
    no_build: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("sln_gen=info")),
        )
        .init();

    let cli = Cli::parse();
    let out = sln_gen::run(&cli.config, cli.source_dir.as_deref(), cli.no_build)?;
    println!("Generated solution files at {}", out.display());
    Ok(())
}
