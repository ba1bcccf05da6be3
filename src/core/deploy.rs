//! Deploy pipeline and lock collaborators backed by the external deployer.
//!
//! The deployer owns transport, the symlink-switch release strategy,
//! permission fixes, and cache warming. This module only knows how to
//! invoke it and how to clear its deploy lock.

use std::path::{Path, PathBuf};

use crate::config::ProjectConfig;
use crate::error::{Error, Result};
use crate::release::{DeployPipeline, LockManager};
use crate::utils::command;

fn run_argv(argv: &[String], work_dir: &Path) -> Result<()> {
    // Validated non-empty at config load; double-checked here because the
    // structs are also constructible directly.
    let (program, args) = argv.split_first().ok_or_else(|| {
        Error::config_invalid_value("deploy.command", "deploy command must not be empty")
    })?;

    let display = argv.join(" ");
    let args: Vec<&str> = args.iter().map(String::as_str).collect();
    let output = command::output_in(&work_dir.to_string_lossy(), program, &args, &display)
        .map_err(|e| Error::deploy_command_failed(display.clone(), None, e.message))?;

    if !output.status.success() {
        return Err(Error::deploy_command_failed(
            display,
            output.status.code(),
            command::error_text(&output),
        ));
    }

    Ok(())
}

/// Invokes the configured deployer command.
pub struct DeployCommand {
    argv: Vec<String>,
    work_dir: PathBuf,
}

impl DeployCommand {
    pub fn from_config(config: &ProjectConfig) -> Self {
        Self {
            argv: config.deploy.command.clone(),
            work_dir: config.root().to_path_buf(),
        }
    }
}

impl DeployPipeline for DeployCommand {
    fn invoke(&self) -> Result<()> {
        crate::log_status!("deploy", "Invoking {}", self.argv.join(" "));
        run_argv(&self.argv, &self.work_dir)
    }
}

/// Clears the deployer's mutual-exclusion lock.
///
/// Best-effort by contract: the lock may not be held, the deployer may not
/// even be reachable. Failures are logged and swallowed so unlocking never
/// masks the error that triggered it.
pub struct DeployLock {
    argv: Vec<String>,
    work_dir: PathBuf,
}

impl DeployLock {
    pub fn from_config(config: &ProjectConfig) -> Self {
        Self {
            argv: config.deploy.unlock_command.clone(),
            work_dir: config.root().to_path_buf(),
        }
    }
}

impl LockManager for DeployLock {
    fn release(&self) {
        if let Err(err) = run_argv(&self.argv, &self.work_dir) {
            crate::log_status!("deploy", "Unlock failed (ignored): {}", err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn command_fixture(argv: &[&str]) -> (tempfile::TempDir, Vec<String>) {
        let dir = tempdir().unwrap();
        (dir, argv.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn invoke_succeeds_for_zero_exit() {
        let (dir, argv) = command_fixture(&["true"]);
        let pipeline = DeployCommand {
            argv,
            work_dir: dir.path().to_path_buf(),
        };
        assert!(pipeline.invoke().is_ok());
    }

    #[test]
    fn invoke_maps_non_zero_exit_to_deploy_failure() {
        let (dir, argv) = command_fixture(&["false"]);
        let pipeline = DeployCommand {
            argv,
            work_dir: dir.path().to_path_buf(),
        };
        let err = pipeline.invoke().unwrap_err();
        assert_eq!(err.code, crate::ErrorCode::DeployCommandFailed);
    }

    #[test]
    fn invoke_maps_missing_binary_to_deploy_failure() {
        let (dir, argv) = command_fixture(&["nonexistent_deployer_xyz"]);
        let pipeline = DeployCommand {
            argv,
            work_dir: dir.path().to_path_buf(),
        };
        let err = pipeline.invoke().unwrap_err();
        assert_eq!(err.code, crate::ErrorCode::DeployCommandFailed);
    }

    #[test]
    fn lock_release_swallows_failures() {
        let (dir, argv) = command_fixture(&["false"]);
        let lock = DeployLock {
            argv,
            work_dir: dir.path().to_path_buf(),
        };
        // Must not panic or propagate.
        lock.release();
    }

    #[test]
    fn lock_release_is_idempotent() {
        let (dir, argv) = command_fixture(&["true"]);
        let lock = DeployLock {
            argv,
            work_dir: dir.path().to_path_buf(),
        };
        lock.release();
        lock.release();
    }
}
