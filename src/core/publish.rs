//! Release publication via the GitHub CLI.

use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::release::ReleasePublisher;
use crate::utils::command;

/// Publishes release objects with `gh release create`.
pub struct GhPublisher {
    work_dir: PathBuf,
}

impl GhPublisher {
    pub fn new(work_dir: impl Into<PathBuf>) -> Self {
        Self {
            work_dir: work_dir.into(),
        }
    }
}

impl ReleasePublisher for GhPublisher {
    fn publish(&self, tag: &str, title: &str, notes: &str) -> Result<()> {
        let context = format!("gh release create {}", tag);
        let output = command::output_in(
            &self.work_dir.to_string_lossy(),
            "gh",
            &["release", "create", tag, "--title", title, "--notes", notes],
            &context,
        )
        .map_err(|e| Error::publish_command_failed(context.clone(), None, e.message))?;

        if !output.status.success() {
            return Err(Error::publish_command_failed(
                context,
                output.status.code(),
                command::error_text(&output),
            ));
        }

        crate::log_status!("release", "Published release {}", tag);
        Ok(())
    }
}
