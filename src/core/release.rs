//! Release orchestration.
//!
//! Owns the guarded release sequences distilled from the deployment
//! scripts: clear the deploy lock, bump the version file, commit/tag/push,
//! publish the release object, hand off to the deploy pipeline. Every
//! external action goes through a narrow collaborator trait; the transport
//! and the deploy strategy live on the other side of those seams.
//!
//! Failure semantics are "fail loud, unlock, propagate": any failure after
//! the initial unlock releases the lock again (best effort) and re-raises
//! the original error. Nothing is rolled back — not the version file, not
//! git history, not pushed tags.

use serde::Serialize;

use crate::config::ProjectConfig;
use crate::error::Result;
use crate::utils::io;
use crate::version::{self, Version};

/// Deploy-wide mutual-exclusion marker on the target environment.
/// Releasing is idempotent and never fails the caller.
pub trait LockManager {
    fn release(&self);
}

/// Local source-control operations.
pub trait SourceControl {
    fn stage_all(&self) -> Result<()>;
    fn commit(&self, message: &str) -> Result<()>;
    fn tag(&self, name: &str, message: &str) -> Result<()>;
    fn push(&self, remote: &str, branch: &str, include_tags: bool) -> Result<()>;
}

/// Remote release object creation (e.g. a GitHub release).
pub trait ReleasePublisher {
    fn publish(&self, tag: &str, title: &str, notes: &str) -> Result<()>;
}

/// The opaque external deployment pipeline.
pub trait DeployPipeline {
    fn invoke(&self) -> Result<()>;
}

/// Synchronous user input with a default for empty/unavailable input.
pub trait Prompt {
    fn ask(&self, question: &str, default: &str) -> String;
}

/// Ephemeral per-invocation release plan. Created at the start of a release
/// operation, consumed immediately, never persisted.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleasePlan {
    pub target_version: Version,
    pub commit_message: String,
    pub git_tag: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseOutcome {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<Version>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    pub message: String,
    pub deployed: bool,
}

/// Caller-supplied knobs for one release invocation.
#[derive(Debug, Clone, Default)]
pub struct ReleaseRequest {
    /// Commit message override. None prompts with the operation's default.
    pub message: Option<String>,
}

/// Re-releases the deploy lock on failure exit paths. Disarmed once the
/// sequence succeeds, so the success path unlocks exactly once (at start).
struct UnlockGuard<'a> {
    lock: &'a dyn LockManager,
    armed: bool,
}

impl<'a> UnlockGuard<'a> {
    fn new(lock: &'a dyn LockManager) -> Self {
        Self { lock, armed: true }
    }

    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for UnlockGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            self.lock.release();
        }
    }
}

pub struct ReleaseOrchestrator<'a> {
    config: &'a ProjectConfig,
    lock: &'a dyn LockManager,
    scm: &'a dyn SourceControl,
    publisher: &'a dyn ReleasePublisher,
    deploy: &'a dyn DeployPipeline,
    prompt: &'a dyn Prompt,
}

impl<'a> ReleaseOrchestrator<'a> {
    pub fn new(
        config: &'a ProjectConfig,
        lock: &'a dyn LockManager,
        scm: &'a dyn SourceControl,
        publisher: &'a dyn ReleasePublisher,
        deploy: &'a dyn DeployPipeline,
        prompt: &'a dyn Prompt,
    ) -> Self {
        Self {
            config,
            lock,
            scm,
            publisher,
            deploy,
            prompt,
        }
    }

    /// Compute the release plan without touching the lock, the environment
    /// file, or any collaborator. What you preview is what `run_versioned`
    /// would execute.
    pub fn plan(&self, message: Option<&str>) -> ReleasePlan {
        let target_version = version::next_version(&self.read_env_contents());
        let commit_message = message
            .map(str::to_string)
            .unwrap_or_else(|| format!("Release version {}", target_version));

        ReleasePlan {
            git_tag: target_version.tag(),
            target_version,
            commit_message,
        }
    }

    /// Versioned release: unlock, bump the version file, commit, tag, push,
    /// publish the release object, deploy.
    pub fn run_versioned(&self, request: &ReleaseRequest) -> Result<ReleaseOutcome> {
        self.lock.release();
        let guard = UnlockGuard::new(self.lock);
        let outcome = self.versioned_steps(request)?;
        guard.disarm();
        Ok(outcome)
    }

    /// Plain release: unlock, commit, push, deploy. No version bump, no
    /// published release object.
    pub fn run_plain(&self, request: &ReleaseRequest) -> Result<ReleaseOutcome> {
        self.lock.release();
        let guard = UnlockGuard::new(self.lock);
        let outcome = self.plain_steps(request)?;
        guard.disarm();
        Ok(outcome)
    }

    fn versioned_steps(&self, request: &ReleaseRequest) -> Result<ReleaseOutcome> {
        let new_version = self.bump_env_file()?;
        crate::log_status!("release", "Version bumped to {}", new_version);

        self.scm.stage_all()?;
        let message = self.resolve_message(request, &format!("Release version {}", new_version));
        self.scm.commit(&message)?;

        let tag = new_version.tag();
        self.scm
            .tag(&tag, &format!("Version {}", new_version))?;
        self.scm
            .push(&self.config.remote, &self.config.branch, true)?;

        self.publisher.publish(
            &tag,
            &format!("Release {}", tag),
            &format!("Release version {}", new_version),
        )?;

        self.deploy.invoke()?;
        crate::log_status!("release", "Successfully deployed version {}", new_version);

        Ok(ReleaseOutcome {
            version: Some(new_version),
            tag: Some(tag),
            message,
            deployed: true,
        })
    }

    fn plain_steps(&self, request: &ReleaseRequest) -> Result<ReleaseOutcome> {
        self.scm.stage_all()?;
        let message = self.resolve_message(request, "Update changes");
        self.scm.commit(&message)?;
        self.scm
            .push(&self.config.remote, &self.config.branch, false)?;

        self.deploy.invoke()?;

        Ok(ReleaseOutcome {
            version: None,
            tag: None,
            message,
            deployed: true,
        })
    }

    /// Compute the next version and persist it to the environment file.
    ///
    /// A missing file still yields a version (the default) but skips the
    /// write. An existing file is read-modify-written as a whole; a read
    /// failure here fails the release rather than clobbering the file.
    fn bump_env_file(&self) -> Result<Version> {
        let path = self.config.env_file_path();
        if !path.exists() {
            return Ok(version::next_version(""));
        }

        let contents = io::read_file(&path, "read environment file")?;
        let next = version::next_version(&contents);
        let updated = version::write_version(&contents, &next);
        io::write_file(&path, &updated, "write environment file")?;

        Ok(next)
    }

    // Read failures are swallowed: corruption never blocks a release.
    fn read_env_contents(&self) -> String {
        std::fs::read_to_string(self.config.env_file_path()).unwrap_or_default()
    }

    fn resolve_message(&self, request: &ReleaseRequest, default: &str) -> String {
        match &request.message {
            Some(message) => message.clone(),
            None => self.prompt.ask("Enter commit message", default),
        }
    }
}
