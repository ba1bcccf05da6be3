//! Source-control collaborator backed by the system `git` binary.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{Error, Result};
use crate::release::SourceControl;
use crate::utils::command;

/// Working-directory-scoped git client.
pub struct GitCli {
    work_dir: PathBuf,
}

impl GitCli {
    pub fn new(work_dir: impl Into<PathBuf>) -> Self {
        Self {
            work_dir: work_dir.into(),
        }
    }

    fn git(&self, args: &[&str], action: &str) -> Result<()> {
        let context = format!("git {}", action);
        let output = command::output_in(&self.work_dir.to_string_lossy(), "git", args, &context)
            .map_err(|e| Error::git_command_failed(context.clone(), None, e.message))?;

        if !output.status.success() {
            return Err(Error::git_command_failed(
                context,
                output.status.code(),
                command::error_text(&output),
            ));
        }

        Ok(())
    }

    /// Check if the working directory has no uncommitted changes.
    ///
    /// Uses direct Command execution so empty output (clean repo) is
    /// distinguishable from command failure.
    pub fn is_workdir_clean(path: &Path) -> bool {
        let output = Command::new("git")
            .args(["status", "--porcelain"])
            .current_dir(path)
            .output();

        match output {
            Ok(o) if o.status.success() => o.stdout.is_empty(),
            _ => false, // Command failed = assume not clean (conservative)
        }
    }

    pub fn is_git_repo(path: &Path) -> bool {
        command::run_in_optional(&path.to_string_lossy(), "git", &["rev-parse", "--git-dir"])
            .is_some()
    }
}

impl SourceControl for GitCli {
    fn stage_all(&self) -> Result<()> {
        self.git(&["add", "."], "add")
    }

    fn commit(&self, message: &str) -> Result<()> {
        self.git(&["commit", "-m", message], "commit")
    }

    fn tag(&self, name: &str, message: &str) -> Result<()> {
        self.git(&["tag", "-a", name, "-m", message], "tag")
    }

    fn push(&self, remote: &str, branch: &str, include_tags: bool) -> Result<()> {
        let mut args = vec!["push", remote, branch];
        if include_tags {
            args.push("--follow-tags");
        }
        self.git(&args, "push")
    }
}
