use clap::Args;
use serde::Serialize;

use shipmate::deploy::{DeployCommand, DeployLock};
use shipmate::git::GitCli;
use shipmate::publish::GhPublisher;
use shipmate::release::{ReleaseOrchestrator, ReleaseOutcome, ReleaseRequest};

use super::CmdResult;
use crate::tty::TtyPrompt;

/// Push changes and deploy, without a version bump or release object.
#[derive(Args)]
pub struct PushArgs {
    /// Commit message (skips the interactive prompt)
    #[arg(long, short)]
    message: Option<String>,
}

#[derive(Serialize)]
#[serde(tag = "command")]
pub enum PushOutput {
    #[serde(rename = "push")]
    Push {
        #[serde(flatten)]
        outcome: ReleaseOutcome,
    },
}

pub fn run(args: PushArgs, global: &super::GlobalArgs) -> CmdResult<PushOutput> {
    let config = super::load_config(global)?;

    let lock = DeployLock::from_config(&config);
    let scm = GitCli::new(config.root());
    let publisher = GhPublisher::new(config.root());
    let pipeline = DeployCommand::from_config(&config);
    let orchestrator =
        ReleaseOrchestrator::new(&config, &lock, &scm, &publisher, &pipeline, &TtyPrompt);

    let outcome = orchestrator.run_plain(&ReleaseRequest {
        message: args.message,
    })?;
    Ok((PushOutput::Push { outcome }, 0))
}
