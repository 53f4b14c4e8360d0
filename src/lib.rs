//! sln-gen — IDE solution-file generation via an external configuration tool.
//!
//! Drives CMake (or a compatible tool) to generate solution/project files
//! for a source tree, falling back across a prioritized list of generator
//! versions, then optionally build-tests the result.  All work happens in
//! a disposable scratch directory that is kept on success and removed on
//! total failure.
//!
//! # Quick start
//!
//! Generate solution files from a config (defaults cover the stock
//! CMake + Visual Studio setup, so the file may not even exist):
//!
//! ```no_run
//! use std::path::Path;
//!
//! // Reads config TOML, runs the generator fallback loop, then the
//! // build smoke test.
//! sln_gen::run(Path::new("sln-gen.toml"), None, false).unwrap();
//! ```
//!
//! Or run just the configure loop against an already-loaded config:
//!
//! ```no_run
//! use std::path::Path;
//!
//! let cfg = sln_gen::config::Config::default();
//! let ok = sln_gen::configure_from_config(&cfg, Path::new("/path/to/project")).unwrap();
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{info, warn};

pub mod config;
pub mod runner;
pub mod scratch;

/// Run the full pipeline: load config, try each generator until one
/// succeeds, and build-test the generated tree.
///
/// `config_path` is the path to a `sln-gen.toml` configuration file
/// (missing file = built-in defaults).
/// `source_dir` optionally overrides the source directory; by default the
/// config file's parent directory is used.
/// `skip_build` disables the post-generation build smoke test.
///
/// Returns the path of the retained scratch directory holding the
/// generated solution files.  When every generator fails, the scratch
/// directory is removed and an error is returned.
pub fn run(config_path: &Path, source_dir: Option<&Path>, skip_build: bool) -> Result<PathBuf> {
    let cfg = config::load_config(config_path)
        .with_context(|| format!("loading config from {}", config_path.display()))?;

    let base_dir = match source_dir {
        Some(p) => p.to_path_buf(),
        None => {
            let parent = config_path.parent().unwrap_or_else(|| Path::new("."));
            if parent.as_os_str().is_empty() {
                PathBuf::from(".")
            } else {
                parent.to_path_buf()
            }
        }
    };
    // The tool receives the source directory as an argument while running
    // inside the scratch directory, so the path must be absolute.
    let source_dir = base_dir
        .canonicalize()
        .with_context(|| format!("resolving source directory {}", base_dir.display()))?;

    if cfg.tool.generators.is_empty() {
        anyhow::bail!(
            "no generators configured in {} — nothing to try",
            config_path.display()
        );
    }

    info!(
        source = %source_dir.display(),
        build_dir = %cfg.build_dir.display(),
        generators = cfg.tool.generators.len(),
        "generating solution files"
    );

    let scratch = scratch::ScratchDir::new(&source_dir, &cfg.build_dir);
    let runner = runner::AttemptRunner::new(&cfg.tool, &scratch, &source_dir);

    if !runner.configure()? {
        anyhow::bail!("every configured generator failed; see the tool output above");
    }

    if cfg.build.smoke_test && !skip_build {
        if runner.build_smoke_test() {
            info!("build smoke test passed");
        } else {
            warn!("build smoke test failed; generated solution files are kept");
        }
    }

    let out = scratch.path();
    info!(path = %out.display(), "wrote solution files");
    Ok(out)
}

/// Run the configure loop from an already-loaded [`config::Config`] —
/// no config file, no smoke test.
///
/// `source_dir` is the directory containing the project description the
/// tool consumes (the scratch directory is created beneath it) and must
/// be absolute.  Returns whether any generator succeeded.
pub fn configure_from_config(
    cfg: &config::Config,
    source_dir: &Path,
) -> Result<bool, scratch::ScratchDirError> {
    let scratch = scratch::ScratchDir::new(source_dir, &cfg.build_dir);
    runner::AttemptRunner::new(&cfg.tool, &scratch, source_dir).configure()
}
