//! Configuration types for `sln-gen.toml`.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

/// Root configuration.
///
/// Every field has a built-in default reproducing the stock CMake /
/// Visual Studio behavior, so the tool runs without any config file:
///
/// ```toml
/// build_dir = "__cmake"
///
/// [tool]
/// program = "cmake"
/// generators = ["Visual Studio 17 2022", "Visual Studio 16 2019"]
/// platform = "Win32"
///
/// [build]
/// smoke_test = true
/// ```
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Scratch directory created beneath the source directory.  Must be a
    /// plain relative name — it is recursively deleted between attempts.
    #[serde(default = "default_build_dir")]
    pub build_dir: PathBuf,
    #[serde(default)]
    pub tool: ToolConfig,
    #[serde(default)]
    pub build: BuildConfig,
}

/// External configuration tool settings.
#[derive(Debug, Deserialize)]
pub struct ToolConfig {
    /// Program to invoke (a name resolved via `PATH`, or a full path).
    #[serde(default = "default_program")]
    pub program: String,
    /// Generator identifiers to try, most-preferred first.  Each is passed
    /// as `-G <generator>`; the first one the tool accepts wins.
    #[serde(default = "default_generators")]
    pub generators: Vec<String>,
    /// Target platform passed as `-A <platform>` with every generator.
    /// Set to an empty string to drop the flag entirely (generators such
    /// as `Unix Makefiles` reject it).
    #[serde(default = "default_platform")]
    pub platform: Option<String>,
}

/// Post-generation build step settings.
#[derive(Debug, Deserialize)]
pub struct BuildConfig {
    /// Run `<program> --build .` in the scratch directory after a
    /// successful generation.  Best-effort; its outcome never affects the
    /// generated files.
    #[serde(default = "default_smoke_test")]
    pub smoke_test: bool,
}

fn default_build_dir() -> PathBuf {
    PathBuf::from("__cmake")
}

fn default_program() -> String {
    "cmake".to_string()
}

fn default_generators() -> Vec<String> {
    vec![
        "Visual Studio 17 2022".to_string(),
        "Visual Studio 16 2019".to_string(),
    ]
}

fn default_platform() -> Option<String> {
    Some("Win32".to_string())
}

fn default_smoke_test() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            build_dir: default_build_dir(),
            tool: ToolConfig::default(),
            build: BuildConfig::default(),
        }
    }
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            generators: default_generators(),
            platform: default_platform(),
        }
    }
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            smoke_test: default_smoke_test(),
        }
    }
}

/// Load and parse a `sln-gen.toml` configuration file.
///
/// A missing file is not an error — the built-in defaults are returned
/// instead.  A file that exists but cannot be read or parsed is.
pub fn load_config(path: &Path) -> anyhow::Result<Config> {
    if !path.exists() {
        info!(path = %path.display(), "no config file found, using built-in defaults");
        return Ok(Config::default());
    }
    let content = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("failed to read config file {}: {}", path.display(), e))?;
    let config: Config = toml::from_str(&content)
        .map_err(|e| anyhow::anyhow!("failed to parse config file {}: {}", path.display(), e))?;
    Ok(config)
}
