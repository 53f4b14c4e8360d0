//! Configuration attempt loop — one external-tool invocation per generator
//! until one succeeds.

use std::path::Path;
use std::process::Command;

use tracing::{info, warn};

use crate::config::ToolConfig;
use crate::scratch::{ScratchDir, ScratchDirError};

/// Drives the external configuration tool through a prioritized list of
/// generators, resetting the scratch directory before each attempt.
///
/// `source_dir` must be absolute: it is passed to the tool as its source
/// argument while the child process runs inside the scratch directory.
pub struct AttemptRunner<'a> {
    tool: &'a ToolConfig,
    scratch: &'a ScratchDir,
    source_dir: &'a Path,
}

impl<'a> AttemptRunner<'a> {
    pub fn new(tool: &'a ToolConfig, scratch: &'a ScratchDir, source_dir: &'a Path) -> Self {
        Self {
            tool,
            scratch,
            source_dir,
        }
    }

    /// Try each generator in priority order against a freshly reset scratch
    /// directory, stopping at the first zero exit status.
    ///
    /// Returns `Ok(true)` on the first success (the scratch directory is
    /// kept for the follow-up build step) and `Ok(false)` once every
    /// generator has failed (the scratch directory is removed).  Tool
    /// failures never propagate; unsafe scratch names and filesystem
    /// errors do.
    pub fn configure(&self) -> Result<bool, ScratchDirError> {
        if self.tool.generators.is_empty() {
            warn!("no generators configured, nothing to try");
            return Ok(false);
        }

        for generator in &self.tool.generators {
            // Clean, empty working directory for every attempt — a failed
            // run leaves a poisoned CMake cache behind.
            self.scratch.ensure_absent()?;
            self.scratch.ensure_present()?;

            if self.invoke(generator) {
                info!(generator, "configuration succeeded");
                return Ok(true);
            }
            warn!(generator, "configuration failed, trying next generator");
        }

        self.scratch.ensure_absent()?;
        Ok(false)
    }

    /// One blocking tool invocation.  A spawn error (program not found,
    /// not executable) counts as a failed attempt, same as a nonzero exit.
    fn invoke(&self, generator: &str) -> bool {
        let mut cmd = Command::new(&self.tool.program);
        cmd.arg(self.source_dir).arg("-G").arg(generator);
        // Empty string = platform flag disabled in the config.
        if let Some(platform) = self.tool.platform.as_deref().filter(|p| !p.is_empty()) {
            cmd.arg("-A").arg(platform);
        }
        cmd.current_dir(self.scratch.path());
        info!(command = ?cmd, "running configuration tool");

        match cmd.status() {
            Ok(status) => status.success(),
            Err(e) => {
                warn!(
                    program = %self.tool.program,
                    error = %e,
                    "failed to spawn configuration tool"
                );
                false
            }
        }
    }

    /// Build the freshly configured tree as a smoke test.
    ///
    /// Only meaningful after a successful [`configure`](Self::configure).
    /// The verdict is reported to the caller and nothing else — a failed
    /// build keeps the generated files in place.
    pub fn build_smoke_test(&self) -> bool {
        let mut cmd = Command::new(&self.tool.program);
        cmd.args(["--build", "."]);
        cmd.current_dir(self.scratch.path());
        info!(command = ?cmd, "running build smoke test");

        match cmd.status() {
            Ok(status) => status.success(),
            Err(e) => {
                warn!(program = %self.tool.program, error = %e, "failed to spawn build tool");
                false
            }
        }
    }
}
